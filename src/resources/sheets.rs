//! `spreadsheets.sheets` facade.

use serde_json::json;

use crate::endpoint::{RequestOptions, Verb};
use crate::error::{Result, SheetsError};
use crate::request::RequestBuilder;
use crate::traits::{ApiBase, Resource};
use crate::transport::Service;

/// Operations on individual sheets (tabs).
#[derive(Debug)]
pub struct Sheets {
    base: ApiBase,
}

impl Resource for Sheets {
    const RESOURCE: &'static str = "spreadsheets.sheets";

    fn base(&self) -> &ApiBase {
        &self.base
    }
}

/// Arguments for [`Sheets::copy_to`]. Both fields are required.
#[derive(Debug, Clone, Default)]
pub struct CopyToOptions {
    /// Id of the sheet to copy.
    pub source_sheet: Option<i64>,
    /// Spreadsheet receiving the copy.
    pub destination_spreadsheet_id: Option<String>,
}

impl CopyToOptions {
    pub fn new(source_sheet: i64, destination_spreadsheet_id: impl Into<String>) -> Self {
        Self {
            source_sheet: Some(source_sheet),
            destination_spreadsheet_id: Some(destination_spreadsheet_id.into()),
        }
    }
}

impl Sheets {
    /// Target spreadsheet `id`, sending through `service`.
    pub fn new(id: impl Into<String>, service: Service) -> Self {
        Self::with_base(ApiBase::new(Some(id.into()), service))
    }

    pub fn with_base(base: ApiBase) -> Self {
        Self { base }
    }

    /// Copy a sheet into another spreadsheet.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Configuration`] unless both the source sheet
    /// and the destination are given.
    pub fn copy_to(&self, options: CopyToOptions) -> Result<RequestBuilder> {
        let (source_sheet, destination) =
            match (options.source_sheet, options.destination_spreadsheet_id) {
                (Some(sheet), Some(destination)) if !destination.is_empty() => {
                    (sheet, destination)
                }
                (sheet, destination) => {
                    let mut missing = Vec::new();
                    if sheet.is_none() {
                        missing.push("sourceSheet");
                    }
                    if destination.map_or(true, |d| d.is_empty()) {
                        missing.push("destinationSpreadsheetId");
                    }
                    return Err(SheetsError::missing("sheets.copyTo", &missing));
                }
            };

        let mut url_params = self.base.url_params();
        url_params.insert("sheetId".to_string(), source_sheet.to_string());
        self.endpoint("copyTo")?.create_request(
            Verb::Post,
            url_params,
            RequestOptions::new().payload(json!({ "destinationSpreadsheetId": destination })),
        )
    }
}
