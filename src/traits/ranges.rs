//! Range accumulation for multi-range reads.

use serde_json::Value;

use crate::request::{extend_array, Mixin};

/// Accumulate A1 ranges into the `ranges` query parameter.
///
/// The list is created on first use if it is missing, so ranges can be added
/// after [`RangeAccumulator::clear_ranges`] or on a request staged without
/// defaults.
pub trait RangeAccumulator: Mixin {
    /// Query parameter holding the range list.
    const RANGES_KEY: &'static str = "ranges";

    #[must_use]
    fn add_range(mut self, range: impl Into<String>) -> Self {
        extend_array(
            self.request_mut().params_mut(),
            Self::RANGES_KEY,
            [Value::String(range.into())],
        );
        self
    }

    #[must_use]
    fn add_ranges<I, S>(mut self, ranges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_array(
            self.request_mut().params_mut(),
            Self::RANGES_KEY,
            ranges.into_iter().map(|r| Value::String(r.into())),
        );
        self
    }

    /// Drop every staged range.
    #[must_use]
    fn clear_ranges(mut self) -> Self {
        self.request_mut()
            .params_mut()
            .insert(Self::RANGES_KEY.to_string(), Value::Array(Vec::new()));
        self
    }

    /// Ranges staged so far.
    fn ranges(&self) -> Vec<&str> {
        self.request()
            .params()
            .get(Self::RANGES_KEY)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}
