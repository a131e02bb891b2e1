//! Cell value endpoint handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use super::{not_found, parse_body, SharedState};
use crate::{BatchGetValuesResponse, ValueRange};

/// GET /v4/spreadsheets/{id}/values/{range}
pub async fn get(state: &SharedState, id: &str, range: &str) -> Response {
    let state = state.read().await;

    match state.get_values(id, range) {
        Some(values) => (StatusCode::OK, Json(values)).into_response(),
        None => not_found("spreadsheet", id),
    }
}

/// GET /v4/spreadsheets/{id}/values:batchGet
pub async fn batch_get(state: &SharedState, id: &str, query: &[(String, String)]) -> Response {
    let state = state.read().await;

    let mut value_ranges = Vec::new();
    for (_, range) in query.iter().filter(|(key, _)| key == "ranges") {
        match state.get_values(id, range) {
            Some(values) => value_ranges.push(values),
            None => return not_found("spreadsheet", id),
        }
    }

    (
        StatusCode::OK,
        Json(BatchGetValuesResponse {
            spreadsheet_id: Some(id.to_string()),
            value_ranges,
        }),
    )
        .into_response()
}

/// PUT /v4/spreadsheets/{id}/values/{range}
pub async fn update(state: &SharedState, id: &str, range: &str, body: Value) -> Response {
    let body: ValueRange = match parse_body(body) {
        Ok(b) => b,
        Err(response) => return response,
    };

    let mut state = state.write().await;
    match state.update_values(id, range, body.values) {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => not_found("spreadsheet", id),
    }
}

/// POST /v4/spreadsheets/{id}/values/{range}:append
pub async fn append(state: &SharedState, id: &str, range: &str, body: Value) -> Response {
    let body: ValueRange = match parse_body(body) {
        Ok(b) => b,
        Err(response) => return response,
    };

    let mut state = state.write().await;
    match state.append_values(id, range, body.values) {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => not_found("spreadsheet", id),
    }
}
