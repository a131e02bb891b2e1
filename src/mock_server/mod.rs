//! Mock Sheets API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Sheets
//! v4 API for integration and end-to-end testing. Unlike wiremock which mocks
//! at the HTTP level per-test, this server maintains state across requests,
//! enabling realistic workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use sheetsapi::mock_server::MockServer;
//! use sheetsapi::{SheetsClient, SheetsEndpoints, Spreadsheet};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = SheetsClient::new("test-token", server.url()).unwrap();
//!     let endpoints = SheetsEndpoints::with_service("test-spreadsheet", client.into_service());
//!
//!     // Server comes with default fixtures
//!     let spreadsheet: Spreadsheet = endpoints
//!         .spreadsheets()
//!         .get()
//!         .unwrap()
//!         .send_as()
//!         .await
//!         .unwrap();
//!     assert_eq!(spreadsheet.title(), Some("Test Spreadsheet"));
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::MockState;
