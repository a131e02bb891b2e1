//! Spreadsheet and sheet models.

use serde::{Deserialize, Serialize};

/// Properties of a spreadsheet, as sent to `spreadsheets.create`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Locale in ISO 639-1 / ISO 3166 form, e.g. `en_US`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// CLDR time zone, e.g. `America/New_York`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,

    /// `ON_CHANGE`, `MINUTE` or `HOUR`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_recalc: Option<String>,
}

impl SpreadsheetProperties {
    /// Properties with just a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// Properties of a single sheet (tab).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    #[serde(default)]
    pub sheet_id: i64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub index: u32,

    /// `GRID`, `OBJECT` or `DATA_SOURCE`.
    #[serde(default)]
    pub sheet_type: Option<String>,
}

/// A sheet within a spreadsheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    #[serde(default)]
    pub properties: SheetProperties,
}

/// A spreadsheet, as returned by `spreadsheets.get`.
///
/// Only the fields this crate reads are modelled; the raw response is
/// available from [`RequestBuilder::send`](crate::RequestBuilder::send).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spreadsheet {
    pub spreadsheet_id: String,

    #[serde(default)]
    pub properties: SpreadsheetProperties,

    #[serde(default)]
    pub sheets: Vec<Sheet>,

    #[serde(default)]
    pub spreadsheet_url: Option<String>,
}

impl Spreadsheet {
    pub fn title(&self) -> Option<&str> {
        self.properties.title.as_deref()
    }

    /// Find a sheet by its tab title.
    pub fn sheet_by_title(&self, title: &str) -> Option<&SheetProperties> {
        self.sheets
            .iter()
            .map(|s| &s.properties)
            .find(|p| p.title == title)
    }

    pub fn sheet_by_id(&self, sheet_id: i64) -> Option<&SheetProperties> {
        self.sheets
            .iter()
            .map(|s| &s.properties)
            .find(|p| p.sheet_id == sheet_id)
    }
}
