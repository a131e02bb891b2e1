//! Trait definitions shared by resource facades and staged requests.
//!
//! [`Resource`] is implemented by every facade. The capability traits are
//! implemented by the request wrappers whose call sites support them.

mod data_filter;
mod ranges;
mod resource;

pub use data_filter::DataFilterBuilder;
pub use ranges::RangeAccumulator;
pub use resource::{ApiBase, DescriptorKey, Resource};
