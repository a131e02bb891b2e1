//! `spreadsheets.values` facade.

use serde_json::{json, Value};

use crate::endpoint::{RequestOptions, Verb};
use crate::error::{Result, SheetsError};
use crate::models::{
    DataFilter, DataFilterValueRange, DateTimeRenderOption, DeveloperMetadataLookup,
    MajorDimension, ValueInputOption, ValueRenderOption,
};
use crate::request::{extend_array, impl_mixin, RequestBuilder};
use crate::traits::{ApiBase, DataFilterBuilder, RangeAccumulator, Resource};
use crate::transport::Service;

/// Cell value operations on one spreadsheet.
#[derive(Debug)]
pub struct Values {
    base: ApiBase,
}

impl Resource for Values {
    const RESOURCE: &'static str = "spreadsheets.values";

    fn base(&self) -> &ApiBase {
        &self.base
    }
}

/// Options for [`Values::update`].
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// Defaults to `RAW`.
    pub value_input_option: ValueInputOption,
    /// Defaults to `ROWS`.
    pub major_dimension: MajorDimension,
}

/// Arguments for [`Values::append`].
///
/// `range` and `values` are required; the rest have defaults.
#[derive(Debug, Clone, Default)]
pub struct AppendOptions {
    /// A1 range used to find the table to append to.
    pub range: Option<String>,
    /// One row (or column, with `COLUMNS`) of values.
    pub values: Option<Vec<Value>>,
    /// Defaults to `ROWS`.
    pub major_dimension: MajorDimension,
    /// Defaults to `RAW`.
    pub value_input_option: ValueInputOption,
}

impl AppendOptions {
    /// Append one row to the table at `range`.
    pub fn new(range: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            range: Some(range.into()),
            values: Some(values),
            ..Default::default()
        }
    }
}

/// Options for [`Values::batch_get`].
#[derive(Debug, Clone)]
pub struct BatchGetOptions {
    /// A single range, appended after `ranges` unless empty.
    pub range: Option<String>,
    pub ranges: Vec<String>,
    /// Defaults to `ROWS`.
    pub major_dimension: MajorDimension,
    /// Defaults to `FORMATTED_VALUE`.
    pub value_render_option: ValueRenderOption,
    /// Defaults to `SERIAL_NUMBER`.
    pub date_time_render_option: DateTimeRenderOption,
}

impl Default for BatchGetOptions {
    fn default() -> Self {
        Self {
            range: None,
            ranges: Vec::new(),
            major_dimension: MajorDimension::Rows,
            value_render_option: ValueRenderOption::FormattedValue,
            date_time_render_option: DateTimeRenderOption::SerialNumber,
        }
    }
}

impl BatchGetOptions {
    /// Read a single range.
    pub fn range(range: impl Into<String>) -> Self {
        Self {
            range: Some(range.into()),
            ..Default::default()
        }
    }
}

/// Options for [`Values::batch_get_by_data_filter`].
#[derive(Debug, Clone)]
pub struct BatchGetByDataFilterOptions {
    /// Defaults to `ROWS`.
    pub major_dimension: MajorDimension,
    /// Defaults to `UNFORMATTED_VALUE`.
    pub value_render_option: ValueRenderOption,
    /// Defaults to `SERIAL_NUMBER`.
    pub date_time_render_option: DateTimeRenderOption,
}

impl Default for BatchGetByDataFilterOptions {
    fn default() -> Self {
        Self {
            major_dimension: MajorDimension::Rows,
            value_render_option: ValueRenderOption::UnformattedValue,
            date_time_render_option: DateTimeRenderOption::SerialNumber,
        }
    }
}

/// Options for [`Values::batch_update_by_data_filter`].
#[derive(Debug, Clone)]
pub struct BatchUpdateByDataFilterOptions {
    /// Defaults to `RAW`.
    pub value_input_option: ValueInputOption,
    /// Defaults to `true`.
    pub include_values_in_response: bool,
    /// Defaults to `UNFORMATTED_VALUE`.
    pub response_value_render_option: ValueRenderOption,
    /// Defaults to `SERIAL_NUMBER`.
    pub response_date_time_render_option: DateTimeRenderOption,
}

impl Default for BatchUpdateByDataFilterOptions {
    fn default() -> Self {
        Self {
            value_input_option: ValueInputOption::Raw,
            include_values_in_response: true,
            response_value_render_option: ValueRenderOption::UnformattedValue,
            response_date_time_render_option: DateTimeRenderOption::SerialNumber,
        }
    }
}

impl Values {
    /// Target spreadsheet `id`, sending through `service`.
    pub fn new(id: impl Into<String>, service: Service) -> Self {
        Self::with_base(ApiBase::new(Some(id.into()), service))
    }

    pub fn with_base(base: ApiBase) -> Self {
        Self { base }
    }

    /// Read one range.
    pub fn get(&self, a1_range: &str) -> Result<RequestBuilder> {
        let mut url_params = self.base.url_params();
        url_params.insert("range".to_string(), a1_range.to_string());
        self.endpoint("get")?
            .create_request(Verb::Get, url_params, RequestOptions::new())
    }

    /// Overwrite the values in `range`.
    pub fn update(
        &self,
        range: &str,
        values: Vec<Vec<Value>>,
        options: UpdateOptions,
    ) -> Result<RequestBuilder> {
        let mut url_params = self.base.url_params();
        url_params.insert("range".to_string(), range.to_string());
        self.endpoint("update")?.create_request(
            Verb::Put,
            url_params,
            RequestOptions::new()
                .params(json!({ "valueInputOption": options.value_input_option }))
                .payload(json!({
                    "values": values,
                    "majorDimension": options.major_dimension,
                })),
        )
    }

    /// Append one row after the table found at `range`.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Configuration`] naming `range` and/or `values`
    /// when they are not supplied.
    pub fn append(&self, options: AppendOptions) -> Result<RequestBuilder> {
        let (range, values) = match (options.range, options.values) {
            (Some(range), Some(values)) if !range.is_empty() => (range, values),
            (range, values) => {
                let mut missing = Vec::new();
                if range.map_or(true, |r| r.is_empty()) {
                    missing.push("range");
                }
                if values.is_none() {
                    missing.push("values");
                }
                return Err(SheetsError::missing("values.append", &missing));
            }
        };

        let mut url_params = self.base.url_params();
        url_params.insert("range".to_string(), range.clone());
        self.endpoint("append")?.create_request(
            Verb::Post,
            url_params,
            RequestOptions::new()
                .params(json!({ "valueInputOption": options.value_input_option }))
                .payload(json!({
                    "range": range,
                    "majorDimension": options.major_dimension,
                    "values": [values],
                })),
        )
    }

    /// Write values to every range matched by staged data filters.
    pub fn batch_update_by_data_filter(
        &self,
        options: BatchUpdateByDataFilterOptions,
    ) -> Result<BatchUpdateByDataFilterRequest> {
        self.endpoint("batchUpdateByDataFilter")?.create_request_with(
            Verb::Post,
            self.base.url_params(),
            RequestOptions::new().payload(json!({
                "data": [],
                "valueInputOption": options.value_input_option,
                "includeValuesInResponse": options.include_values_in_response,
                "responseValueRenderOption": options.response_value_render_option,
                "responseDateTimeRenderOption": options.response_date_time_render_option,
            })),
        )
    }

    /// Read every range matched by staged data filters.
    pub fn batch_get_by_data_filter(
        &self,
        options: BatchGetByDataFilterOptions,
    ) -> Result<BatchGetByDataFilterRequest> {
        self.endpoint("batchGetByDataFilter")?.create_request_with(
            Verb::Post,
            self.base.url_params(),
            RequestOptions::new().payload(json!({
                "dataFilters": [],
                "majorDimension": options.major_dimension,
                "valueRenderOption": options.value_render_option,
                "dateTimeRenderOption": options.date_time_render_option,
            })),
        )
    }

    /// Read several ranges at once.
    pub fn batch_get(&self, options: BatchGetOptions) -> Result<BatchGetRequest> {
        let mut ranges = options.ranges;
        ranges.extend(options.range.filter(|range| !range.is_empty()));

        self.endpoint("batchGet")?.create_request_with(
            Verb::Get,
            self.base.url_params(),
            RequestOptions::new().params(json!({
                "ranges": ranges,
                "majorDimension": options.major_dimension,
                "valueRenderOption": options.value_render_option,
                "dateTimeRenderOption": options.date_time_render_option,
            })),
        )
    }
}

/// Staged `values.batchGet` request.
#[derive(Debug)]
pub struct BatchGetRequest(RequestBuilder);

impl_mixin!(BatchGetRequest);

impl RangeAccumulator for BatchGetRequest {}

/// Staged `values.batchGetByDataFilter` request.
#[derive(Debug)]
pub struct BatchGetByDataFilterRequest(RequestBuilder);

impl_mixin!(BatchGetByDataFilterRequest);

impl DataFilterBuilder for BatchGetByDataFilterRequest {}

impl BatchGetByDataFilterRequest {
    /// Select ranges tagged with metadata `id`.
    #[must_use]
    pub fn metadata_id(self, id: i64) -> Self {
        self.lookup(DeveloperMetadataLookup::by_id(id))
    }

    /// Select ranges tagged with metadata `key`.
    #[must_use]
    pub fn metadata_key(self, key: impl Into<String>) -> Self {
        self.lookup(DeveloperMetadataLookup::by_key(key))
    }

    /// Select ranges tagged with metadata `value`.
    #[must_use]
    pub fn metadata_value(self, value: impl Into<String>) -> Self {
        self.lookup(DeveloperMetadataLookup::by_value(value))
    }
}

/// Staged `values.batchUpdateByDataFilter` request.
#[derive(Debug)]
pub struct BatchUpdateByDataFilterRequest(RequestBuilder);

impl_mixin!(BatchUpdateByDataFilterRequest);

impl BatchUpdateByDataFilterRequest {
    /// Write row-major `values` to the ranges matched by `lookup`.
    #[must_use]
    pub fn add_metadata(self, lookup: DeveloperMetadataLookup, values: Vec<Vec<Value>>) -> Self {
        self.add_data(DataFilterValueRange {
            data_filter: DataFilter::DeveloperMetadataLookup(lookup),
            major_dimension: MajorDimension::Rows,
            values,
        })
    }

    /// Stage one filtered write.
    #[must_use]
    pub fn add_data(mut self, data: DataFilterValueRange) -> Self {
        extend_array(self.0.payload_mut(), "data", [json!(data)]);
        self
    }
}
