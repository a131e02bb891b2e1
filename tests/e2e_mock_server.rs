//! E2E tests using the mock Sheets server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use serde_json::json;
use sheetsapi::mock_server::{DefaultScenario, Fixtures, MockServer, MockState};
use sheetsapi::{
    AppendOptions, AppendValuesResponse, BatchUpdateOptions, CopyToOptions,
    DeveloperMetadataLocation, MetadataEntry, Mixin, SearchDeveloperMetadataResponse,
    SheetProperties, SheetsClient, SheetsEndpoints, SheetsError, Spreadsheet,
    SpreadsheetProperties, UpdateOptions, ValueRange,
};

fn endpoints(server: &MockServer, id: &str) -> SheetsEndpoints {
    let client = SheetsClient::new("test-token", server.url()).unwrap();
    SheetsEndpoints::with_service(id, client.into_service())
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    // Both servers should have different URLs
    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    // After shutdown, server should not respond
    let client = reqwest::Client::new();
    let result = client.get(format!("{}/health", url)).send().await;

    assert!(result.is_err());
}

// =============================================================================
// Spreadsheet Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_create_then_write_workflow() {
    let server = MockServer::start_empty().await;
    let client = SheetsClient::new("test-token", server.url()).unwrap();

    // Step 1: Create a spreadsheet and target it
    let endpoints = SheetsEndpoints::create_with_service(
        SpreadsheetProperties::titled("Quarterly"),
        client.into_service(),
    )
    .await
    .expect("Failed to create spreadsheet");
    let id = endpoints.id().unwrap().to_string();

    // Step 2: Write a table
    endpoints
        .values()
        .update(
            "Sheet1!A1:B1",
            vec![vec![json!("name"), json!("total")]],
            UpdateOptions::default(),
        )
        .unwrap()
        .send()
        .await
        .expect("Failed to update values");

    // Step 3: Read it back
    let range: ValueRange = endpoints
        .values()
        .get("Sheet1!A1:B1")
        .unwrap()
        .send_as()
        .await
        .expect("Failed to get values");
    assert_eq!(range.cell(0, 1), Some(&json!("total")));

    // Step 4: The spreadsheet itself exists with its title
    let spreadsheet: Spreadsheet = endpoints
        .spreadsheets()
        .get()
        .unwrap()
        .send_as()
        .await
        .unwrap();
    assert_eq!(spreadsheet.spreadsheet_id, id);
    assert_eq!(spreadsheet.title(), Some("Quarterly"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_append_reports_updates() {
    let server = MockServer::start().await;

    let response: AppendValuesResponse = endpoints(&server, DefaultScenario::SPREADSHEET_ID)
        .values()
        .append(AppendOptions::new("Sheet1!A1:B3", vec![json!("delta"), json!(4)]))
        .unwrap()
        .send_as()
        .await
        .expect("Failed to append");

    let updates = response.updates.unwrap();
    assert_eq!(updates.updated_rows, 1);
    assert_eq!(updates.updated_cells, 2);

    let state = server.state();
    let state = state.read().await;
    let stored = state
        .get_values(DefaultScenario::SPREADSHEET_ID, "Sheet1!A1:B3")
        .unwrap();
    assert_eq!(stored.len(), Fixtures::header_table().len() + 1);
    drop(state);

    server.shutdown().await;
}

#[tokio::test]
async fn test_copy_sheet_to_archive() {
    let server = MockServer::start().await;

    let copied: SheetProperties = endpoints(&server, DefaultScenario::SPREADSHEET_ID)
        .sheets()
        .copy_to(CopyToOptions::new(1, DefaultScenario::ARCHIVE_ID))
        .unwrap()
        .send_as()
        .await
        .expect("Failed to copy sheet");

    assert_eq!(copied.title, "Copy of Data");

    let archive: Spreadsheet = endpoints(&server, DefaultScenario::ARCHIVE_ID)
        .spreadsheets()
        .get()
        .unwrap()
        .send_as()
        .await
        .unwrap();
    assert!(archive.sheet_by_title("Copy of Data").is_some());

    server.shutdown().await;
}

#[tokio::test]
async fn test_copy_missing_sheet_is_not_found() {
    let server = MockServer::start().await;

    let result = endpoints(&server, DefaultScenario::SPREADSHEET_ID)
        .sheets()
        .copy_to(CopyToOptions::new(99, DefaultScenario::ARCHIVE_ID))
        .unwrap()
        .send()
        .await;

    assert!(matches!(
        result,
        Err(SheetsError::ApiError {
            status_code: Some(404),
            ..
        })
    ));

    server.shutdown().await;
}

// =============================================================================
// Developer Metadata Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_create_then_search_metadata() {
    let server = MockServer::start().await;
    let endpoints = endpoints(&server, DefaultScenario::SPREADSHEET_ID);

    // Step 1: Tag a sheet through batchUpdate
    endpoints
        .spreadsheets()
        .batch_update(BatchUpdateOptions::default())
        .unwrap()
        .create_metadata(
            MetadataEntry::new("reviewed", DeveloperMetadataLocation::sheet(1)).with_value("yes"),
        )
        .unwrap()
        .send()
        .await
        .expect("Failed to create metadata");

    // Step 2: Search by key; the fixture "owner" entry matches the second lookup
    let found: SearchDeveloperMetadataResponse = endpoints
        .developer_metadata()
        .search()
        .unwrap()
        .by_key("reviewed")
        .by_key("owner")
        .into_request()
        .send_as()
        .await
        .expect("Failed to search metadata");

    let mut keys: Vec<&str> = found
        .entries()
        .filter_map(|m| m.metadata_key.as_deref())
        .collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["owner", "reviewed"]);

    // Step 3: Fetch one entry by id
    let id = found.entries().next().and_then(|m| m.metadata_id).unwrap();
    let entry: MetadataEntry = endpoints
        .developer_metadata()
        .get(id)
        .unwrap()
        .send_as()
        .await
        .unwrap();
    assert_eq!(entry.metadata_id, Some(id));

    server.shutdown().await;
}

#[tokio::test]
async fn test_search_by_location() {
    let server = MockServer::start().await;

    let found: SearchDeveloperMetadataResponse = endpoints(&server, DefaultScenario::SPREADSHEET_ID)
        .developer_metadata()
        .search()
        .unwrap()
        .by_location()
        .sheet_id(1)
        .into_request()
        .send_as()
        .await
        .unwrap();

    let entries: Vec<_> = found.entries().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].metadata_key.as_deref(), Some("source"));

    server.shutdown().await;
}

// =============================================================================
// Auth Tests
// =============================================================================

#[tokio::test]
async fn test_wrong_token_is_rejected() {
    let state = MockState::new()
        .with_spreadsheet(Fixtures::minimal_spreadsheet("locked", "Locked"))
        .with_required_token("right-token");
    let server = MockServer::with_state(state).await;

    let result = endpoints(&server, "locked")
        .spreadsheets()
        .get()
        .unwrap()
        .send()
        .await;

    match result {
        Err(SheetsError::ApiError {
            status_code,
            message,
        }) => {
            assert_eq!(status_code, Some(401));
            assert!(message.contains("authentication"));
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }

    server.shutdown().await;
}
