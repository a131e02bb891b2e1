//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Sheets API server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::{
    AppendValuesResponse, DataFilter, DeveloperMetadataLookup, MatchedDeveloperMetadata,
    MetadataEntry, Sheet, SheetProperties, Spreadsheet, SpreadsheetProperties,
    UpdateValuesResponse, ValueRange,
};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Spreadsheets indexed by id.
    pub spreadsheets: HashMap<String, Spreadsheet>,

    /// Cell values per spreadsheet, keyed by the exact A1 range they were
    /// written to. Ranges are not resolved against each other.
    pub values: HashMap<String, BTreeMap<String, Vec<Vec<Value>>>>,

    /// Developer metadata per spreadsheet.
    pub metadata: HashMap<String, Vec<MetadataEntry>>,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,

    /// Last id handed out for spreadsheets and metadata.
    last_id: i64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a spreadsheet to the state.
    pub fn with_spreadsheet(mut self, spreadsheet: Spreadsheet) -> Self {
        self.spreadsheets
            .insert(spreadsheet.spreadsheet_id.clone(), spreadsheet);
        self
    }

    /// Store values at `range` of spreadsheet `id`.
    pub fn with_values(mut self, id: &str, range: &str, rows: Vec<Vec<Value>>) -> Self {
        self.values
            .entry(id.to_string())
            .or_default()
            .insert(range.to_string(), rows);
        self
    }

    /// Attach metadata to spreadsheet `id`, assigning an id if it has none.
    pub fn with_metadata(mut self, id: &str, entry: MetadataEntry) -> Self {
        self.add_metadata(id, entry);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    /// Get a spreadsheet by id.
    pub fn get_spreadsheet(&self, id: &str) -> Option<&Spreadsheet> {
        self.spreadsheets.get(id)
    }

    /// Create a spreadsheet with a single empty `Sheet1`.
    pub fn create_spreadsheet(&mut self, properties: SpreadsheetProperties) -> &Spreadsheet {
        let id = format!("mock-spreadsheet-{}", self.next_id());
        let spreadsheet = Spreadsheet {
            spreadsheet_id: id.clone(),
            properties,
            sheets: vec![Sheet {
                properties: SheetProperties {
                    sheet_id: 0,
                    title: "Sheet1".to_string(),
                    index: 0,
                    sheet_type: Some("GRID".to_string()),
                },
            }],
            spreadsheet_url: None,
        };
        self.spreadsheets.entry(id).or_insert(spreadsheet)
    }

    /// Read values at `range`; empty if nothing was written there.
    pub fn get_values(&self, id: &str, range: &str) -> Option<ValueRange> {
        self.spreadsheets.get(id)?;
        let values = self
            .values
            .get(id)
            .and_then(|ranges| ranges.get(range))
            .cloned()
            .unwrap_or_default();
        Some(ValueRange {
            range: Some(range.to_string()),
            major_dimension: Some(Default::default()),
            values,
        })
    }

    /// Overwrite values at `range`.
    pub fn update_values(
        &mut self,
        id: &str,
        range: &str,
        rows: Vec<Vec<Value>>,
    ) -> Option<UpdateValuesResponse> {
        self.spreadsheets.get(id)?;
        let response = update_summary(id, range, &rows);
        self.values
            .entry(id.to_string())
            .or_default()
            .insert(range.to_string(), rows);
        Some(response)
    }

    /// Append rows after the table stored at `range`.
    pub fn append_values(
        &mut self,
        id: &str,
        range: &str,
        rows: Vec<Vec<Value>>,
    ) -> Option<AppendValuesResponse> {
        self.spreadsheets.get(id)?;
        let updates = update_summary(id, range, &rows);
        self.values
            .entry(id.to_string())
            .or_default()
            .entry(range.to_string())
            .or_default()
            .extend(rows);
        Some(AppendValuesResponse {
            spreadsheet_id: Some(id.to_string()),
            table_range: Some(range.to_string()),
            updates: Some(updates),
        })
    }

    /// Copy sheet `sheet_id` of `id` into `destination`.
    ///
    /// Returns `None` if either spreadsheet or the sheet does not exist.
    pub fn copy_sheet(
        &mut self,
        id: &str,
        sheet_id: i64,
        destination: &str,
    ) -> Option<SheetProperties> {
        let source = self
            .spreadsheets
            .get(id)?
            .sheet_by_id(sheet_id)?
            .clone();
        let target = self.spreadsheets.get_mut(destination)?;

        let properties = SheetProperties {
            sheet_id: target
                .sheets
                .iter()
                .map(|s| s.properties.sheet_id)
                .max()
                .map_or(0, |max| max + 1),
            title: format!("Copy of {}", source.title),
            index: target.sheets.len() as u32,
            sheet_type: source.sheet_type,
        };
        target.sheets.push(Sheet {
            properties: properties.clone(),
        });
        Some(properties)
    }

    /// Store metadata, assigning an id if it has none.
    pub fn add_metadata(&mut self, id: &str, mut entry: MetadataEntry) -> MetadataEntry {
        if entry.metadata_id.is_none() {
            entry.metadata_id = Some(self.next_id());
        }
        self.metadata
            .entry(id.to_string())
            .or_default()
            .push(entry.clone());
        entry
    }

    /// Get metadata by id.
    pub fn get_metadata(&self, id: &str, metadata_id: i64) -> Option<&MetadataEntry> {
        self.metadata
            .get(id)?
            .iter()
            .find(|m| m.metadata_id == Some(metadata_id))
    }

    /// Metadata matching any of `filters`.
    ///
    /// A lookup matches when every field it sets equals the entry's.
    pub fn search_metadata(&self, id: &str, filters: &[DataFilter]) -> Vec<MatchedDeveloperMetadata> {
        let Some(entries) = self.metadata.get(id) else {
            return Vec::new();
        };

        entries
            .iter()
            .filter_map(|entry| {
                let matched: Vec<DataFilter> = filters
                    .iter()
                    .filter(|f| match f {
                        DataFilter::DeveloperMetadataLookup(lookup) => lookup_matches(lookup, entry),
                        _ => false,
                    })
                    .cloned()
                    .collect();
                (!matched.is_empty()).then(|| MatchedDeveloperMetadata {
                    developer_metadata: entry.clone(),
                    data_filters: matched,
                })
            })
            .collect()
    }
}

fn update_summary(id: &str, range: &str, rows: &[Vec<Value>]) -> UpdateValuesResponse {
    UpdateValuesResponse {
        spreadsheet_id: Some(id.to_string()),
        updated_range: Some(range.to_string()),
        updated_rows: rows.len() as u32,
        updated_columns: rows.iter().map(Vec::len).max().unwrap_or(0) as u32,
        updated_cells: rows.iter().map(Vec::len).sum::<usize>() as u32,
    }
}

fn lookup_matches(lookup: &DeveloperMetadataLookup, entry: &MetadataEntry) -> bool {
    let id = lookup.metadata_id.map_or(true, |id| entry.metadata_id == Some(id));
    let key = lookup
        .metadata_key
        .as_ref()
        .map_or(true, |k| entry.metadata_key.as_ref() == Some(k));
    let value = lookup
        .metadata_value
        .as_ref()
        .map_or(true, |v| entry.metadata_value.as_ref() == Some(v));
    let location = lookup
        .metadata_location
        .as_ref()
        .map_or(true, |l| entry.location.as_ref() == Some(l));
    id && key && value && location
}
