//! Spreadsheet and sheet endpoint handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{api_error, not_found, parse_body, SharedState};
use crate::{MetadataEntry, Sheet, SheetProperties, SpreadsheetProperties};

/// Body of `spreadsheets.create`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateBody {
    #[serde(default)]
    pub properties: SpreadsheetProperties,
}

/// Body of `sheets.copyTo`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyToBody {
    pub destination_spreadsheet_id: String,
}

/// Body of `spreadsheets.batchUpdate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateBody {
    #[serde(default)]
    pub requests: Vec<Value>,
    #[serde(default)]
    pub include_spreadsheet_in_response: bool,
}

/// POST /v4/spreadsheets
pub async fn create(state: &SharedState, body: Value) -> Response {
    let body: CreateBody = match parse_body(body) {
        Ok(b) => b,
        Err(response) => return response,
    };

    let mut state = state.write().await;
    let spreadsheet = state.create_spreadsheet(body.properties);
    (StatusCode::OK, Json(spreadsheet.clone())).into_response()
}

/// GET /v4/spreadsheets/{id}
pub async fn get(state: &SharedState, id: &str) -> Response {
    let state = state.read().await;

    match state.get_spreadsheet(id) {
        Some(spreadsheet) => (StatusCode::OK, Json(spreadsheet.clone())).into_response(),
        None => not_found("spreadsheet", id),
    }
}

/// POST /v4/spreadsheets/{id}/sheets/{sheetId}:copyTo
pub async fn copy_to(state: &SharedState, id: &str, sheet_id: &str, body: Value) -> Response {
    let body: CopyToBody = match parse_body(body) {
        Ok(b) => b,
        Err(response) => return response,
    };
    let Ok(sheet_id) = sheet_id.parse::<i64>() else {
        return api_error(StatusCode::BAD_REQUEST, format!("Invalid sheet id: {sheet_id}"));
    };

    let mut state = state.write().await;
    match state.copy_sheet(id, sheet_id, &body.destination_spreadsheet_id) {
        Some(properties) => (StatusCode::OK, Json(properties)).into_response(),
        None => not_found("sheet", &format!("{id}/{sheet_id}")),
    }
}

/// POST /v4/spreadsheets/{id}:batchUpdate
///
/// Applies `addSheet` and `createDeveloperMetadata`; other request kinds
/// are accepted and answered with an empty reply.
pub async fn batch_update(state: &SharedState, id: &str, body: Value) -> Response {
    let body: BatchUpdateBody = match parse_body(body) {
        Ok(b) => b,
        Err(response) => return response,
    };

    let mut state = state.write().await;
    if state.get_spreadsheet(id).is_none() {
        return not_found("spreadsheet", id);
    }

    let mut replies = Vec::with_capacity(body.requests.len());
    for request in body.requests {
        if let Some(add) = request.get("addSheet") {
            let title = add
                .pointer("/properties/title")
                .and_then(Value::as_str)
                .unwrap_or("Sheet")
                .to_string();
            let Some(spreadsheet) = state.spreadsheets.get_mut(id) else {
                return not_found("spreadsheet", id);
            };
            let properties = SheetProperties {
                sheet_id: spreadsheet
                    .sheets
                    .iter()
                    .map(|s| s.properties.sheet_id)
                    .max()
                    .map_or(0, |max| max + 1),
                title,
                index: spreadsheet.sheets.len() as u32,
                sheet_type: Some("GRID".to_string()),
            };
            spreadsheet.sheets.push(Sheet {
                properties: properties.clone(),
            });
            replies.push(json!({ "addSheet": { "properties": properties } }));
        } else if let Some(create) = request.get("createDeveloperMetadata") {
            let entry: MetadataEntry = match parse_body(
                create.get("developerMetadata").cloned().unwrap_or_default(),
            ) {
                Ok(e) => e,
                Err(response) => return response,
            };
            let entry = state.add_metadata(id, entry);
            replies.push(json!({ "createDeveloperMetadata": { "developerMetadata": entry } }));
        } else {
            replies.push(json!({}));
        }
    }

    let mut response = json!({ "spreadsheetId": id, "replies": replies });
    if body.include_spreadsheet_in_response {
        response["updatedSpreadsheet"] = json!(state.get_spreadsheet(id));
    }
    (StatusCode::OK, Json(response)).into_response()
}
