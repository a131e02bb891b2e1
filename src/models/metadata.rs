//! Developer metadata models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{DataFilter, DeveloperMetadataLocation, MajorDimension};

/// Who can see a piece of developer metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetadataVisibility {
    /// Visible to any project with access to the document.
    Document,
    /// Visible only to the project that created it.
    Project,
}

/// Key/value metadata attached to a location in a spreadsheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<DeveloperMetadataLocation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<MetadataVisibility>,
}

impl MetadataEntry {
    /// Metadata with a key, attached at `location`.
    pub fn new(key: impl Into<String>, location: DeveloperMetadataLocation) -> Self {
        Self {
            metadata_key: Some(key.into()),
            location: Some(location),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.metadata_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: MetadataVisibility) -> Self {
        self.visibility = Some(visibility);
        self
    }
}

/// Values written to every range matched by a data filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFilterValueRange {
    pub data_filter: DataFilter,
    pub major_dimension: MajorDimension,
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

/// Metadata matched by a search, with the filters that matched it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedDeveloperMetadata {
    pub developer_metadata: MetadataEntry,
    #[serde(default)]
    pub data_filters: Vec<DataFilter>,
}

/// Response of `developerMetadata.search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDeveloperMetadataResponse {
    #[serde(default)]
    pub matched_developer_metadata: Vec<MatchedDeveloperMetadata>,
}

impl SearchDeveloperMetadataResponse {
    /// The matched metadata entries, without their filters.
    pub fn entries(&self) -> impl Iterator<Item = &MetadataEntry> {
        self.matched_developer_metadata
            .iter()
            .map(|m| &m.developer_metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_skips_unset_fields() {
        let entry = MetadataEntry::new("owner", DeveloperMetadataLocation::spreadsheet())
            .with_visibility(MetadataVisibility::Document);
        assert_eq!(
            json!(entry),
            json!({
                "metadataKey": "owner",
                "location": {"spreadsheet": true},
                "visibility": "DOCUMENT"
            })
        );
    }

    #[test]
    fn test_search_response_deserialize() {
        let response: SearchDeveloperMetadataResponse = serde_json::from_value(json!({
            "matchedDeveloperMetadata": [{
                "developerMetadata": {"metadataId": 12, "metadataKey": "k", "metadataValue": "v"},
                "dataFilters": [{"developerMetadataLookup": {"metadataKey": "k"}}]
            }]
        }))
        .unwrap();
        let entries: Vec<_> = response.entries().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].metadata_id, Some(12));
        assert_eq!(entries[0].metadata_value.as_deref(), Some("v"));
    }

    #[test]
    fn test_search_response_empty() {
        let response: SearchDeveloperMetadataResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.entries().count(), 0);
    }
}
