//! `spreadsheets` facade.

use serde_json::{json, Map, Value};

use crate::endpoint::{RequestOptions, Verb};
use crate::error::{Result, SheetsError};
use crate::models::{DataFilter, MetadataEntry, SpreadsheetProperties};
use crate::request::{extend_array, impl_mixin, RequestBuilder};
use crate::traits::{ApiBase, Resource};
use crate::transport::Service;

/// Whole-spreadsheet operations.
#[derive(Debug)]
pub struct Spreadsheets {
    base: ApiBase,
}

impl Resource for Spreadsheets {
    const RESOURCE: &'static str = "spreadsheets";

    fn base(&self) -> &ApiBase {
        &self.base
    }
}

/// Options for [`Spreadsheets::batch_update`].
#[derive(Debug, Clone)]
pub struct BatchUpdateOptions {
    /// Defaults to `true`.
    pub include_spreadsheet_in_response: bool,
    /// Ranges returned in the response spreadsheet; empty by default.
    pub response_ranges: Vec<String>,
    /// Defaults to `true`.
    pub response_include_grid_data: bool,
}

impl Default for BatchUpdateOptions {
    fn default() -> Self {
        Self {
            include_spreadsheet_in_response: true,
            response_ranges: Vec::new(),
            response_include_grid_data: true,
        }
    }
}

impl Spreadsheets {
    /// Target spreadsheet `id`, sending through `service`.
    pub fn new(id: impl Into<String>, service: Service) -> Self {
        Self::with_base(ApiBase::new(Some(id.into()), service))
    }

    pub fn with_base(base: ApiBase) -> Self {
        Self { base }
    }

    /// Read the spreadsheet.
    pub fn get(&self) -> Result<RequestBuilder> {
        self.endpoint("get")?
            .create_request(Verb::Get, self.base.url_params(), RequestOptions::new())
    }

    /// Create a new spreadsheet, asking only for its id back.
    ///
    /// Needs no spreadsheet id, so it also works on a blank facade.
    pub fn create(&self, properties: SpreadsheetProperties) -> Result<RequestBuilder> {
        self.endpoint("create")?.create_request(
            Verb::Post,
            Default::default(),
            RequestOptions::new()
                .params(json!({ "fields": "spreadsheetId" }))
                .payload(json!({ "properties": properties })),
        )
    }

    /// Apply staged update requests atomically.
    pub fn batch_update(&self, options: BatchUpdateOptions) -> Result<BatchUpdateRequest> {
        self.endpoint("batchUpdate")?.create_request_with(
            Verb::Post,
            self.base.url_params(),
            RequestOptions::new().payload(json!({
                "requests": [],
                "includeSpreadsheetInResponse": options.include_spreadsheet_in_response,
                "responseRanges": options.response_ranges,
                "responseIncludeGridData": options.response_include_grid_data,
            })),
        )
    }

    /// Read the spreadsheet restricted to staged data filters.
    pub fn get_by_data_filter(&self) -> Result<GetByDataFilterRequest> {
        self.endpoint("getByDataFilter")?.create_request_with(
            Verb::Post,
            self.base.url_params(),
            // Ignored by the API when a fields mask is sent.
            RequestOptions::new().payload(json!({ "includeGridData": true })),
        )
    }
}

/// Staged `spreadsheets.batchUpdate` request.
#[derive(Debug)]
pub struct BatchUpdateRequest(RequestBuilder);

impl_mixin!(BatchUpdateRequest);

impl BatchUpdateRequest {
    /// Stage one raw update request, e.g. `{"addSheet": {...}}`.
    #[must_use]
    pub fn add_request(mut self, request: Value) -> Self {
        extend_array(self.0.payload_mut(), "requests", [request]);
        self
    }

    /// Stage `{kind: body}`.
    #[must_use]
    pub fn add(self, kind: &str, body: Value) -> Self {
        let mut request = Map::new();
        request.insert(kind.to_string(), body);
        self.add_request(Value::Object(request))
    }

    /// Stage `{kind: body}` with an explicit `fields` mask inside `body`.
    ///
    /// The mask replaces any `fields` entry already in `body`. Use this for
    /// `update*` requests, which require a mask naming the fields to change.
    #[must_use]
    pub fn add_with_fields(self, kind: &str, mut body: Map<String, Value>, fields: &str) -> Self {
        body.insert("fields".to_string(), Value::String(fields.to_string()));
        self.add(kind, Value::Object(body))
    }

    /// Stage a `createDeveloperMetadata` request.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Configuration`] unless the metadata has both a
    /// key and a location.
    pub fn create_metadata(self, metadata: MetadataEntry) -> Result<Self> {
        let mut missing = Vec::new();
        if metadata.metadata_key.as_deref().map_or(true, str::is_empty) {
            missing.push("metadataKey");
        }
        if metadata.location.is_none() {
            missing.push("location");
        }
        if !missing.is_empty() {
            return Err(SheetsError::missing("createDeveloperMetadata", &missing));
        }

        Ok(self.add(
            "createDeveloperMetadata",
            json!({ "developerMetadata": metadata }),
        ))
    }

    /// Number of staged update requests.
    pub fn len(&self) -> usize {
        self.0
            .payload()
            .get("requests")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Staged `spreadsheets.getByDataFilter` request.
#[derive(Debug)]
pub struct GetByDataFilterRequest(RequestBuilder);

impl_mixin!(GetByDataFilterRequest);

impl GetByDataFilterRequest {
    /// Select each A1 range with its own filter.
    #[must_use]
    pub fn add_a1_notations<I, S>(mut self, ranges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_array(
            self.0.payload_mut(),
            "dataFilters",
            ranges.into_iter().map(|r| json!(DataFilter::A1Range(r.into()))),
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::DeveloperMetadataLocation;
    use crate::request::Mixin;
    use crate::transport::RecordingTransport;

    fn spreadsheets() -> Spreadsheets {
        Spreadsheets::new("abc", Arc::new(RecordingTransport::new()))
    }

    #[test]
    fn test_batch_update_defaults() {
        let request = spreadsheets()
            .batch_update(BatchUpdateOptions::default())
            .unwrap();
        let payload = request.request().payload();

        assert_eq!(payload["requests"], json!([]));
        assert_eq!(payload["includeSpreadsheetInResponse"], json!(true));
        assert_eq!(payload["responseRanges"], json!([]));
        assert_eq!(payload["responseIncludeGridData"], json!(true));
        assert!(request.is_empty());
    }

    #[test]
    fn test_add_stages_request_unchanged() {
        let request = spreadsheets()
            .batch_update(BatchUpdateOptions::default())
            .unwrap()
            .add("addSheet", json!({"properties": {"title": "New"}}));

        assert_eq!(
            request.request().payload()["requests"],
            json!([{"addSheet": {"properties": {"title": "New"}}}])
        );
    }

    #[test]
    fn test_add_with_fields_sets_mask() {
        let body = json!({"properties": {"sheetId": 0, "title": "Renamed"}, "fields": "*"});
        let request = spreadsheets()
            .batch_update(BatchUpdateOptions::default())
            .unwrap()
            .add_with_fields(
                "updateSheetProperties",
                body.as_object().cloned().unwrap(),
                "title",
            );

        assert_eq!(
            request.request().payload()["requests"][0]["updateSheetProperties"]["fields"],
            json!("title")
        );
        assert_eq!(request.len(), 1);
    }

    #[test]
    fn test_create_metadata_requires_key_and_location() {
        let request = spreadsheets()
            .batch_update(BatchUpdateOptions::default())
            .unwrap();
        let err = request
            .create_metadata(MetadataEntry {
                metadata_value: Some("v".to_string()),
                ..Default::default()
            })
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("metadataKey"));
        assert!(msg.contains("location"));
    }

    #[test]
    fn test_create_metadata_stages_request() {
        let request = spreadsheets()
            .batch_update(BatchUpdateOptions::default())
            .unwrap()
            .create_metadata(
                MetadataEntry::new("owner", DeveloperMetadataLocation::sheet(3)).with_value("ops"),
            )
            .unwrap();

        assert_eq!(
            request.request().payload()["requests"],
            json!([{
                "createDeveloperMetadata": {
                    "developerMetadata": {
                        "metadataKey": "owner",
                        "metadataValue": "ops",
                        "location": {"sheetId": 3}
                    }
                }
            }])
        );
    }

    #[test]
    fn test_get_by_data_filter_one_filter_per_range() {
        let request = spreadsheets()
            .get_by_data_filter()
            .unwrap()
            .add_a1_notations(["Sheet1!A1", "Sheet2!B2"]);

        assert_eq!(
            request.request().payload()["dataFilters"],
            json!([{"a1Range": "Sheet1!A1"}, {"a1Range": "Sheet2!B2"}])
        );
        assert_eq!(request.request().payload()["includeGridData"], json!(true));
    }

    #[test]
    fn test_create_needs_no_spreadsheet_id() {
        let blank = Spreadsheets::with_base(ApiBase::new(None, Arc::new(RecordingTransport::new())));
        let request = blank
            .create(SpreadsheetProperties::titled("Q3"))
            .unwrap();

        assert_eq!(request.params()["fields"], json!("spreadsheetId"));
        assert_eq!(request.payload()["properties"], json!({"title": "Q3"}));
        assert_eq!(request.prepare().unwrap().path, "v4/spreadsheets");
    }

    #[test]
    fn test_blank_get_fails_before_sending() {
        let blank = Spreadsheets::with_base(ApiBase::new(None, Arc::new(RecordingTransport::new())));
        let err = blank.get().unwrap_err();
        assert!(matches!(err, SheetsError::Configuration(_)));
        assert!(err.to_string().contains("spreadsheetId"));
    }
}
