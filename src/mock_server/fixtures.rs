//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use serde_json::{json, Value};

use crate::{
    DeveloperMetadataLocation, MetadataEntry, MetadataVisibility, Sheet, SheetProperties,
    Spreadsheet, SpreadsheetProperties,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Spreadsheet Fixtures
    // =========================================================================

    /// Create a grid sheet.
    pub fn sheet(sheet_id: i64, title: &str, index: u32) -> Sheet {
        Sheet {
            properties: SheetProperties {
                sheet_id,
                title: title.to_string(),
                index,
                sheet_type: Some("GRID".to_string()),
            },
        }
    }

    /// Create a spreadsheet with one sheet per title, ids counting from 0.
    pub fn spreadsheet(id: &str, title: &str, sheet_titles: &[&str]) -> Spreadsheet {
        Spreadsheet {
            spreadsheet_id: id.to_string(),
            properties: SpreadsheetProperties {
                locale: Some("en_US".to_string()),
                time_zone: Some("Etc/GMT".to_string()),
                ..SpreadsheetProperties::titled(title)
            },
            sheets: sheet_titles
                .iter()
                .enumerate()
                .map(|(i, t)| Self::sheet(i as i64, t, i as u32))
                .collect(),
            spreadsheet_url: Some(format!("https://docs.google.com/spreadsheets/d/{id}/edit")),
        }
    }

    /// Create a spreadsheet with a single `Sheet1`.
    pub fn minimal_spreadsheet(id: &str, title: &str) -> Spreadsheet {
        Self::spreadsheet(id, title, &["Sheet1"])
    }

    // =========================================================================
    // Value Fixtures
    // =========================================================================

    /// A small table with a header row.
    pub fn header_table() -> Vec<Vec<Value>> {
        vec![
            vec![json!("name"), json!("count")],
            vec![json!("alpha"), json!(1)],
            vec![json!("beta"), json!(2)],
        ]
    }

    // =========================================================================
    // Metadata Fixtures
    // =========================================================================

    /// Document-visible metadata on a sheet.
    pub fn sheet_metadata(key: &str, value: &str, sheet_id: i64) -> MetadataEntry {
        MetadataEntry::new(key, DeveloperMetadataLocation::sheet(sheet_id))
            .with_value(value)
            .with_visibility(MetadataVisibility::Document)
    }

    /// Create a complete test scenario.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete test scenario with related spreadsheets, values and metadata.
pub struct DefaultScenario {
    pub spreadsheets: Vec<Spreadsheet>,
    /// (spreadsheet id, A1 range, rows)
    pub values: Vec<(String, String, Vec<Vec<Value>>)>,
    /// (spreadsheet id, entry)
    pub metadata: Vec<(String, MetadataEntry)>,
}

impl DefaultScenario {
    /// Id of the main test spreadsheet.
    pub const SPREADSHEET_ID: &'static str = "test-spreadsheet";

    /// Id of an empty spreadsheet used as a copy destination.
    pub const ARCHIVE_ID: &'static str = "archive-spreadsheet";

    /// Create the default scenario.
    pub fn new() -> Self {
        Self {
            spreadsheets: vec![
                Fixtures::spreadsheet(Self::SPREADSHEET_ID, "Test Spreadsheet", &["Sheet1", "Data"]),
                Fixtures::minimal_spreadsheet(Self::ARCHIVE_ID, "Archive"),
            ],
            values: vec![(
                Self::SPREADSHEET_ID.to_string(),
                "Sheet1!A1:B3".to_string(),
                Fixtures::header_table(),
            )],
            metadata: vec![
                (
                    Self::SPREADSHEET_ID.to_string(),
                    Fixtures::sheet_metadata("owner", "ops", 0),
                ),
                (
                    Self::SPREADSHEET_ID.to_string(),
                    Fixtures::sheet_metadata("source", "import", 1),
                ),
            ],
        }
    }
}

impl Default for DefaultScenario {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spreadsheet_fixture_numbers_sheets() {
        let spreadsheet = Fixtures::spreadsheet("s1", "Test", &["A", "B", "C"]);
        assert_eq!(spreadsheet.sheets.len(), 3);
        assert_eq!(spreadsheet.sheet_by_title("C").unwrap().sheet_id, 2);
        assert_eq!(spreadsheet.title(), Some("Test"));
    }

    #[test]
    fn test_default_scenario_is_consistent() {
        let scenario = Fixtures::default_scenario();
        for (id, _, _) in &scenario.values {
            assert!(scenario.spreadsheets.iter().any(|s| &s.spreadsheet_id == id));
        }
        for (id, _) in &scenario.metadata {
            assert!(scenario.spreadsheets.iter().any(|s| &s.spreadsheet_id == id));
        }
    }
}
