//! Data filters: server-side selectors for ranges and developer metadata.

use serde::{Deserialize, Serialize};

use super::MajorDimension;

/// A filter selecting data in a spreadsheet.
///
/// Serializes as a single-field object, e.g. `{"a1Range": "Sheet1!A1:B2"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataFilter {
    /// Select data associated with matching developer metadata.
    DeveloperMetadataLookup(DeveloperMetadataLookup),
    /// Select an A1 range.
    A1Range(String),
    /// Select a grid range.
    GridRange(GridRange),
}

impl DataFilter {
    pub fn a1_range(range: impl Into<String>) -> Self {
        DataFilter::A1Range(range.into())
    }
}

impl From<DeveloperMetadataLookup> for DataFilter {
    fn from(lookup: DeveloperMetadataLookup) -> Self {
        DataFilter::DeveloperMetadataLookup(lookup)
    }
}

/// Criteria matching developer metadata.
///
/// Only the fields that are set are sent, so each constructor produces a
/// single-field lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperMetadataLookup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_location: Option<DeveloperMetadataLocation>,
}

impl DeveloperMetadataLookup {
    pub fn by_id(id: i64) -> Self {
        Self {
            metadata_id: Some(id),
            ..Default::default()
        }
    }

    pub fn by_key(key: impl Into<String>) -> Self {
        Self {
            metadata_key: Some(key.into()),
            ..Default::default()
        }
    }

    pub fn by_value(value: impl Into<String>) -> Self {
        Self {
            metadata_value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Match both key and value in one lookup.
    pub fn by_key_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            metadata_key: Some(key.into()),
            metadata_value: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn by_location(location: DeveloperMetadataLocation) -> Self {
        Self {
            metadata_location: Some(location),
            ..Default::default()
        }
    }
}

/// Where developer metadata is attached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperMetadataLocation {
    /// Attached to a whole sheet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<i64>,

    /// Attached to the spreadsheet itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spreadsheet: Option<bool>,

    /// Attached to rows or columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_range: Option<DimensionRange>,
}

impl DeveloperMetadataLocation {
    pub fn sheet(sheet_id: i64) -> Self {
        Self {
            sheet_id: Some(sheet_id),
            ..Default::default()
        }
    }

    pub fn spreadsheet() -> Self {
        Self {
            spreadsheet: Some(true),
            ..Default::default()
        }
    }
}

/// A span of rows or columns on one sheet. Indexes are zero-based, end exclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    pub sheet_id: i64,
    pub dimension: MajorDimension,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_index: Option<u32>,
}

/// A rectangle on one sheet. Indexes are zero-based, end exclusive; unset
/// bounds are unbounded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    pub sheet_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_row_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_row_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_column_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column_index: Option<u32>,
}
