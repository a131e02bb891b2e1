//! Developer metadata endpoint handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use super::{api_error, not_found, parse_body, SharedState};
use crate::{DataFilter, SearchDeveloperMetadataResponse};

/// Body of `developerMetadata.search`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBody {
    #[serde(default)]
    pub data_filters: Vec<DataFilter>,
}

/// GET /v4/spreadsheets/{id}/developerMetadata/{metadataId}
pub async fn get(state: &SharedState, id: &str, metadata_id: &str) -> Response {
    let Ok(metadata_id) = metadata_id.parse::<i64>() else {
        return api_error(
            StatusCode::BAD_REQUEST,
            format!("Invalid metadata id: {metadata_id}"),
        );
    };

    let state = state.read().await;
    match state.get_metadata(id, metadata_id) {
        Some(entry) => (StatusCode::OK, Json(entry.clone())).into_response(),
        None => not_found("developer metadata", &metadata_id.to_string()),
    }
}

/// POST /v4/spreadsheets/{id}/developerMetadata:search
pub async fn search(state: &SharedState, id: &str, body: Value) -> Response {
    let body: SearchBody = match parse_body(body) {
        Ok(b) => b,
        Err(response) => return response,
    };

    let state = state.read().await;
    if state.get_spreadsheet(id).is_none() {
        return not_found("spreadsheet", id);
    }

    (
        StatusCode::OK,
        Json(SearchDeveloperMetadataResponse {
            matched_developer_metadata: state.search_metadata(id, &body.data_filters),
        }),
    )
        .into_response()
}
