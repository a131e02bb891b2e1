//! Resource facades.
//!
//! Each facade targets one spreadsheet and stages requests for one group of
//! API methods. Facades hold their own descriptor cache, so two facades for
//! the same resource never share descriptors.

mod developer_metadata;
mod sheets;
mod spreadsheets;
mod values;

pub use developer_metadata::{DeveloperMetadata, LocationLookup, MetadataSearchRequest};
pub use sheets::{CopyToOptions, Sheets};
pub use spreadsheets::{
    BatchUpdateOptions, BatchUpdateRequest, GetByDataFilterRequest, Spreadsheets,
};
pub use values::{
    AppendOptions, BatchGetByDataFilterOptions, BatchGetByDataFilterRequest, BatchGetOptions,
    BatchGetRequest, BatchUpdateByDataFilterOptions, BatchUpdateByDataFilterRequest,
    UpdateOptions, Values,
};
