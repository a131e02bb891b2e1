//! Data filter staging shared by filter-driven requests.

use serde_json::{json, Value};

use crate::models::{DataFilter, DeveloperMetadataLookup};
use crate::request::{extend_array, Mixin};

/// Stage data filters into the request body.
///
/// Each call appends one filter object to the `dataFilters` array; filters
/// are never merged.
pub trait DataFilterBuilder: Mixin {
    /// Body key holding the filter list.
    const FILTERS_KEY: &'static str = "dataFilters";

    /// Append a filter.
    #[must_use]
    fn push_filter(mut self, filter: DataFilter) -> Self {
        extend_array(self.request_mut().payload_mut(), Self::FILTERS_KEY, [json!(filter)]);
        self
    }

    /// Append a developer metadata lookup filter.
    #[must_use]
    fn lookup(self, lookup: DeveloperMetadataLookup) -> Self {
        self.push_filter(DataFilter::DeveloperMetadataLookup(lookup))
    }

    /// Append an A1 range filter.
    #[must_use]
    fn a1_range(self, range: impl Into<String>) -> Self {
        self.push_filter(DataFilter::A1Range(range.into()))
    }

    /// Filters staged so far.
    fn filters(&self) -> &[Value] {
        self.request()
            .payload()
            .get(Self::FILTERS_KEY)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
