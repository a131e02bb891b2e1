//! CLI output formatting tests.
//!
//! JSON output with --json, pretty-print output by default, and the
//! rendering of staged requests for --dry-run.

use std::sync::Arc;

use serde_json::json;
use sheetsapi::output::{cell_text, PrettyPrint};
use sheetsapi::{
    AppendValuesResponse, MetadataEntry, RecordingTransport, SheetProperties, SheetsEndpoints,
    Spreadsheet, UpdateOptions,
};

fn make_test_spreadsheet() -> Spreadsheet {
    serde_json::from_value(json!({
        "spreadsheetId": "abc",
        "properties": {"title": "Budget", "locale": "en_US", "timeZone": "Etc/GMT"},
        "sheets": [
            {"properties": {"sheetId": 0, "title": "Sheet1", "index": 0}},
            {"properties": {"sheetId": 7, "title": "Data", "index": 1}}
        ],
        "spreadsheetUrl": "https://docs.google.com/spreadsheets/d/abc/edit"
    }))
    .unwrap()
}

// ============================================================================
// JSON Output Tests
// ============================================================================

#[test]
fn test_json_output_uses_api_field_names() {
    let spreadsheet = make_test_spreadsheet();
    let json_output = serde_json::to_string_pretty(&spreadsheet).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert_eq!(parsed["spreadsheetId"], "abc");
    assert_eq!(parsed["properties"]["timeZone"], "Etc/GMT");
    assert_eq!(parsed["sheets"][1]["properties"]["sheetId"], 7);
}

#[test]
fn test_dry_run_json_is_staged_request() {
    let endpoints = SheetsEndpoints::with_service("abc", Arc::new(RecordingTransport::new()));
    let prepared = endpoints
        .values()
        .update("Sheet1!A1", vec![vec![json!(1)]], UpdateOptions::default())
        .unwrap()
        .prepare()
        .unwrap();

    let parsed = serde_json::to_value(&prepared).unwrap();
    assert_eq!(parsed["verb"], "PUT");
    assert_eq!(parsed["methodId"], "sheets.spreadsheets.values.update");
    assert_eq!(parsed["path"], "v4/spreadsheets/abc/values/Sheet1%21A1");
    assert_eq!(parsed["params"]["valueInputOption"], "RAW");
    assert_eq!(parsed["payload"]["values"], json!([[1]]));
}

#[test]
fn test_dry_run_get_omits_payload() {
    let endpoints = SheetsEndpoints::with_service("abc", Arc::new(RecordingTransport::new()));
    let prepared = endpoints.spreadsheets().get().unwrap().prepare().unwrap();

    let parsed = serde_json::to_value(&prepared).unwrap();
    assert!(parsed.get("payload").is_none());
}

// ============================================================================
// Pretty Print Tests
// ============================================================================

#[test]
fn test_spreadsheet_pretty_print() {
    let output = make_test_spreadsheet().pretty_print();

    assert!(output.starts_with("Spreadsheet: abc"));
    assert!(output.contains("Title:          Budget"));
    assert!(output.contains("Sheets:         2"));
    assert!(output.contains("Data (id 7)"));
    assert!(output.contains("URL:"));
}

#[test]
fn test_sheet_properties_pretty_print() {
    let sheet = SheetProperties {
        sheet_id: 12,
        title: "Copy of Data".to_string(),
        index: 3,
        sheet_type: Some("GRID".to_string()),
    };

    let output = sheet.pretty_print();
    assert!(output.starts_with("Sheet: Copy of Data"));
    assert!(output.contains("Sheet ID:       12"));
    assert!(output.contains("Type:           GRID"));
}

#[test]
fn test_append_response_pretty_print() {
    let response: AppendValuesResponse = serde_json::from_value(json!({
        "tableRange": "Sheet1!A1:C4",
        "updates": {"updatedRange": "Sheet1!A5:C5", "updatedRows": 1, "updatedColumns": 3, "updatedCells": 3}
    }))
    .unwrap();

    let output = response.pretty_print();
    assert!(output.contains("Table:          Sheet1!A1:C4"));
    assert!(output.contains("Updated: Sheet1!A5:C5"));
    assert!(output.contains("3 (1 rows, 3 columns)"));
}

#[test]
fn test_metadata_pretty_print_skips_missing_fields() {
    let entry: MetadataEntry = serde_json::from_value(json!({"metadataKey": "owner"})).unwrap();

    let output = entry.pretty_print();
    assert!(output.starts_with("Metadata"));
    assert!(output.contains("Key:            owner"));
    assert!(!output.contains("Value:"));
    assert!(!output.contains("Location:"));
}

#[test]
fn test_prepared_request_pretty_print() {
    let endpoints = SheetsEndpoints::with_service("abc", Arc::new(RecordingTransport::new()));
    let prepared = endpoints.values().get("A1").unwrap().prepare().unwrap();

    let output = prepared.pretty_print();
    assert!(output.starts_with("GET v4/spreadsheets/abc/values/A1"));
    assert!(output.contains("Method:         sheets.spreadsheets.values.get"));
    assert!(!output.contains("Body:"));
}

#[test]
fn test_cell_text_unquotes_strings() {
    assert_eq!(cell_text(&json!("x")), "x");
    assert_eq!(cell_text(&json!(3)), "3");
    assert_eq!(cell_text(&json!(null)), "");
}
