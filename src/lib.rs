//! Google Sheets API request builders.
//!
//! A Rust library for staging Google Sheets v4 REST requests through
//! resource facades, where each call site returns a request builder with
//! chainable, domain-specific mutators. Nothing touches the network until
//! `send` is called.
//!
//! # Quick Start
//!
//! ```no_run
//! use sheetsapi::{BatchGetOptions, Mixin, RangeAccumulator, SheetsEndpoints};
//!
//! #[tokio::main]
//! async fn main() -> sheetsapi::Result<()> {
//!     // Target a spreadsheet using a client configured from the environment
//!     let endpoints = SheetsEndpoints::from_id("1BxiMVs0XRA5nFMd")?;
//!
//!     // Read one range
//!     let range = endpoints.values().get("Sheet1!A1:B2")?.send().await?;
//!     println!("{range}");
//!
//!     // Read several ranges at once
//!     let batch = endpoints
//!         .values()
//!         .batch_get(BatchGetOptions::range("Sheet1!A1:B2"))?
//!         .add_range("Sheet2!C1")
//!         .send()
//!         .await?;
//!     println!("{batch}");
//!
//!     // Search developer metadata; each lookup is its own filter
//!     let found = endpoints
//!         .developer_metadata()
//!         .search()?
//!         .by_key("owner")
//!         .by_value("ops")
//!         .send()
//!         .await?;
//!     println!("{found}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`SheetsEndpoints`] hands out resource facades for one spreadsheet.
//! - Facades ([`Spreadsheets`], [`Values`], [`Sheets`], [`DeveloperMetadata`])
//!   resolve method descriptors once per instance and stage requests.
//! - [`RequestBuilder`] holds staged params and payload. Call sites that need
//!   extra mutators return a wrapper implementing [`Mixin`], optionally with
//!   the [`DataFilterBuilder`] or [`RangeAccumulator`] capabilities.
//! - [`Transport`] is the only network seam. [`SheetsClient`] sends over
//!   HTTPS; [`RecordingTransport`] records requests for tests and dry runs.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `SHEETS_ACCESS_TOKEN` (required) - OAuth access token
//! - `SHEETS_API_URL` (optional) - Base URL (defaults to `https://sheets.googleapis.com/`)

mod client;
mod endpoint;
mod endpoints;
mod error;
mod request;
mod resources;
mod traits;
mod transport;

pub mod cli;
pub mod models;
pub mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{SheetsClient, API_URL_ENV, TOKEN_ENV};
pub use endpoint::{
    DiscoveryRegistry, Endpoint, EndpointRegistry, RequestDescriptor, RequestOptions, UrlParams,
    Verb, API_NAME, API_VERSION,
};
pub use endpoints::{ActiveSpreadsheet, SheetsEndpoints};
pub use error::{Result, SheetsError};
pub use request::{Mixin, RequestBuilder};
pub use transport::{PreparedRequest, RecordingTransport, Service, Transport};

// Re-export traits
pub use traits::{ApiBase, DataFilterBuilder, DescriptorKey, RangeAccumulator, Resource};

// Re-export facades and staged requests
pub use resources::{
    // Spreadsheets
    BatchUpdateOptions,
    BatchUpdateRequest,
    GetByDataFilterRequest,
    Spreadsheets,
    // Values
    AppendOptions,
    BatchGetByDataFilterOptions,
    BatchGetByDataFilterRequest,
    BatchGetOptions,
    BatchGetRequest,
    BatchUpdateByDataFilterOptions,
    BatchUpdateByDataFilterRequest,
    UpdateOptions,
    Values,
    // Sheets
    CopyToOptions,
    Sheets,
    // Developer metadata
    DeveloperMetadata,
    LocationLookup,
    MetadataSearchRequest,
};

// Re-export models
pub use models::{
    // Values
    AppendValuesResponse,
    BatchGetValuesResponse,
    DateTimeRenderOption,
    MajorDimension,
    UpdateValuesResponse,
    ValueInputOption,
    ValueRange,
    ValueRenderOption,
    // Filters
    DataFilter,
    DeveloperMetadataLocation,
    DeveloperMetadataLookup,
    DimensionRange,
    GridRange,
    // Metadata
    DataFilterValueRange,
    MatchedDeveloperMetadata,
    MetadataEntry,
    MetadataVisibility,
    SearchDeveloperMetadataResponse,
    // Spreadsheets
    Sheet,
    SheetProperties,
    Spreadsheet,
    SpreadsheetProperties,
};
