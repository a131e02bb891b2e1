//! HTTP request handlers for the mock server.
//!
//! Sheets paths put verbs after a colon inside a segment
//! (`values/{range}:append`, `sheets/{id}:copyTo`), so everything below
//! `/v4/spreadsheets/` goes through [`spreadsheet_route`], which splits the
//! raw path itself.

pub mod metadata;
pub mod spreadsheets;
pub mod values;

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

/// State handle shared by every handler.
pub type SharedState = Arc<RwLock<MockState>>;

const PREFIX: &str = "/v4/spreadsheets/";

/// Error body in the Google API format.
pub fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    let reason = status
        .canonical_reason()
        .unwrap_or("Error")
        .to_uppercase()
        .replace(' ', "_");
    (
        status,
        Json(json!({
            "error": {
                "code": status.as_u16(),
                "message": message.into(),
                "status": reason,
            }
        })),
    )
        .into_response()
}

/// 404 for a missing entity.
pub fn not_found(what: &str, id: &str) -> Response {
    api_error(
        StatusCode::NOT_FOUND,
        format!("Requested entity was not found: {what} {id}"),
    )
}

/// 401 unless the request carries the configured bearer token.
async fn authorize(state: &SharedState, headers: &HeaderMap) -> Option<Response> {
    let state = state.read().await;
    let required = state.required_token.as_deref()?;
    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    (presented != Some(required)).then(|| {
        api_error(
            StatusCode::UNAUTHORIZED,
            "Request had invalid authentication credentials.",
        )
    })
}

fn decode(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

/// POST /v4/spreadsheets
pub async fn create_spreadsheet(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(denied) = authorize(&state, &headers).await {
        return denied;
    }
    spreadsheets::create(&state, body).await
}

/// Every route below `/v4/spreadsheets/`.
pub async fn spreadsheet_route(
    State(state): State<SharedState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Response {
    if let Some(denied) = authorize(&state, &headers).await {
        return denied;
    }

    let body: Value = if body.is_empty() {
        Value::Null
    } else {
        match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(e) => {
                return api_error(StatusCode::BAD_REQUEST, format!("Invalid JSON payload: {e}"))
            }
        }
    };

    let decoded: Vec<String> = uri
        .path()
        .strip_prefix(PREFIX)
        .unwrap_or_default()
        .split('/')
        .map(decode)
        .collect();
    let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", [id]) => spreadsheets::get(&state, id).await,
        ("POST", [target]) if target.ends_with(":batchUpdate") => {
            let id = target.trim_end_matches(":batchUpdate");
            spreadsheets::batch_update(&state, id, body).await
        }
        ("POST", [id, "sheets", target]) if target.ends_with(":copyTo") => {
            let sheet_id = target.trim_end_matches(":copyTo");
            spreadsheets::copy_to(&state, id, sheet_id, body).await
        }
        ("GET", [id, "values:batchGet"]) => values::batch_get(&state, id, &query).await,
        ("GET", [id, "values", range]) => values::get(&state, id, range).await,
        ("PUT", [id, "values", range]) => values::update(&state, id, range, body).await,
        ("POST", [id, "values", target]) if target.ends_with(":append") => {
            let range = target.trim_end_matches(":append");
            values::append(&state, id, range, body).await
        }
        ("GET", [id, "developerMetadata", metadata_id]) => {
            metadata::get(&state, id, metadata_id).await
        }
        ("POST", [id, "developerMetadata:search"]) => metadata::search(&state, id, body).await,
        _ => api_error(
            StatusCode::NOT_FOUND,
            format!("No mock route for {} {}", method, uri.path()),
        ),
    }
}

/// Deserialize a request body or answer 400.
fn parse_body<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, Response> {
    serde_json::from_value(body)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Invalid request body: {e}")))
}
