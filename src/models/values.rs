//! Cell value models and rendering options.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How input data is interpreted when writing values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueInputOption {
    /// Values are stored as-is.
    #[default]
    Raw,
    /// Values are parsed as if typed into the UI.
    UserEntered,
}

/// Whether `values` are laid out as rows or columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MajorDimension {
    #[default]
    Rows,
    Columns,
}

/// How values are rendered in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueRenderOption {
    FormattedValue,
    UnformattedValue,
    Formula,
}

/// How dates and times are rendered in responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateTimeRenderOption {
    #[default]
    SerialNumber,
    FormattedString,
}

/// A range of values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    /// The A1 range the values cover.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<MajorDimension>,

    /// Cell values; trailing empty rows and columns are omitted by the API.
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

impl ValueRange {
    /// Number of rows (or columns, for column-major ranges).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Width of the widest row.
    pub fn width(&self) -> usize {
        self.values.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell at `(row, column)`, if present.
    pub fn cell(&self, row: usize, column: usize) -> Option<&Value> {
        self.values.get(row).and_then(|r| r.get(column))
    }
}

/// Response of `values.batchGet`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGetValuesResponse {
    #[serde(default)]
    pub spreadsheet_id: Option<String>,

    #[serde(default)]
    pub value_ranges: Vec<ValueRange>,
}

/// Response of `values.update`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValuesResponse {
    #[serde(default)]
    pub spreadsheet_id: Option<String>,

    #[serde(default)]
    pub updated_range: Option<String>,

    #[serde(default)]
    pub updated_rows: u32,

    #[serde(default)]
    pub updated_columns: u32,

    #[serde(default)]
    pub updated_cells: u32,
}

/// Response of `values.append`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendValuesResponse {
    #[serde(default)]
    pub spreadsheet_id: Option<String>,

    /// The table the values were appended to, before the append.
    #[serde(default)]
    pub table_range: Option<String>,

    #[serde(default)]
    pub updates: Option<UpdateValuesResponse>,
}
