//! `spreadsheets.developerMetadata` facade.

use serde_json::json;

use crate::endpoint::{RequestOptions, Verb};
use crate::error::Result;
use crate::models::{DeveloperMetadataLocation, DeveloperMetadataLookup};
use crate::request::{impl_mixin, RequestBuilder};
use crate::traits::{ApiBase, DataFilterBuilder, Resource};
use crate::transport::Service;

/// Developer metadata reads and searches.
#[derive(Debug)]
pub struct DeveloperMetadata {
    base: ApiBase,
}

impl Resource for DeveloperMetadata {
    const RESOURCE: &'static str = "spreadsheets.developerMetadata";

    fn base(&self) -> &ApiBase {
        &self.base
    }
}

impl DeveloperMetadata {
    /// Target spreadsheet `id`, sending through `service`.
    pub fn new(id: impl Into<String>, service: Service) -> Self {
        Self::with_base(ApiBase::new(Some(id.into()), service))
    }

    pub fn with_base(base: ApiBase) -> Self {
        Self { base }
    }

    /// Read one metadata entry by id.
    pub fn get(&self, metadata_id: i64) -> Result<RequestBuilder> {
        let mut url_params = self.base.url_params();
        url_params.insert("metadataId".to_string(), metadata_id.to_string());
        self.endpoint("get")?
            .create_request(Verb::Get, url_params, RequestOptions::new())
    }

    /// Start a search; chain lookups onto the returned request.
    pub fn search(&self) -> Result<MetadataSearchRequest> {
        self.endpoint("search")?.create_request_with(
            Verb::Post,
            self.base.url_params(),
            RequestOptions::new().payload(json!({ "dataFilters": [] })),
        )
    }
}

/// Staged `developerMetadata.search` request.
///
/// Every `by_*` call adds its own `developerMetadataLookup` filter, so
/// `by_key("k").by_value("v")` matches either criterion.
#[derive(Debug)]
pub struct MetadataSearchRequest(RequestBuilder);

impl_mixin!(MetadataSearchRequest);

impl DataFilterBuilder for MetadataSearchRequest {}

impl MetadataSearchRequest {
    #[must_use]
    pub fn by_id(self, id: i64) -> Self {
        self.lookup(DeveloperMetadataLookup::by_id(id))
    }

    #[must_use]
    pub fn by_key(self, key: impl Into<String>) -> Self {
        self.lookup(DeveloperMetadataLookup::by_key(key))
    }

    #[must_use]
    pub fn by_value(self, value: impl Into<String>) -> Self {
        self.lookup(DeveloperMetadataLookup::by_value(value))
    }

    /// One lookup matching both key and value.
    #[must_use]
    pub fn by_key_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.lookup(DeveloperMetadataLookup::by_key_value(key, value))
    }

    /// Pick a location to search; finish with a [`LocationLookup`] method.
    pub fn by_location(self) -> LocationLookup {
        LocationLookup(self)
    }
}

/// Pending location lookup on a [`MetadataSearchRequest`].
#[derive(Debug)]
#[must_use]
pub struct LocationLookup(MetadataSearchRequest);

impl LocationLookup {
    /// Metadata attached to the sheet `sheet_id`.
    pub fn sheet_id(self, sheet_id: i64) -> MetadataSearchRequest {
        self.at(DeveloperMetadataLocation::sheet(sheet_id))
    }

    /// Metadata attached to the spreadsheet itself.
    pub fn spreadsheet(self) -> MetadataSearchRequest {
        self.at(DeveloperMetadataLocation::spreadsheet())
    }

    pub fn at(self, location: DeveloperMetadataLocation) -> MetadataSearchRequest {
        self.0.lookup(DeveloperMetadataLookup::by_location(location))
    }
}
