//! The transport seam between staged requests and the network.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::endpoint::Verb;
use crate::error::Result;

/// A staged request rendered for sending.
///
/// `params` and `payload` are exactly what was staged on the builder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedRequest {
    pub verb: Verb,
    /// Fully qualified method id, e.g. `sheets.spreadsheets.values.get`.
    pub method_id: String,
    /// Path relative to the API base URL, parameters already encoded.
    pub path: String,
    pub params: Map<String, Value>,
    /// JSON body; `None` for verbs without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Map<String, Value>>,
}

impl PreparedRequest {
    /// Query string pairs for `params`.
    ///
    /// Arrays expand to repeated keys, `null` entries are skipped, and other
    /// non-string values use their JSON text.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (key, value) in &self.params {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    for item in items {
                        if let Some(text) = query_text(item) {
                            pairs.push((key.clone(), text));
                        }
                    }
                }
                other => {
                    if let Some(text) = query_text(other) {
                        pairs.push((key.clone(), text));
                    }
                }
            }
        }
        pairs
    }
}

fn query_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Sends prepared requests.
///
/// This is the only network-performing seam in the crate. Authentication,
/// retries and timeouts are the implementor's concern.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the decoded JSON response body.
    async fn execute(&self, request: PreparedRequest) -> Result<Value>;
}

/// Opaque service handle shared by facades and the builders they create.
pub type Service = Arc<dyn Transport>;

/// Transport that records requests instead of sending them.
///
/// Every request receives the same canned response. Useful for tests and
/// dry runs.
#[derive(Debug)]
pub struct RecordingTransport {
    requests: Mutex<Vec<PreparedRequest>>,
    response: Value,
}

impl RecordingTransport {
    /// Record requests and answer each with an empty JSON object.
    pub fn new() -> Self {
        Self::with_response(Value::Object(Map::new()))
    }

    /// Record requests and answer each with `response`.
    pub fn with_response(response: Value) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            response,
        }
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<PreparedRequest> {
        self.requests.lock().last().cloned()
    }
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<Value> {
        tracing::debug!(method = %request.method_id, path = %request.path, "recorded request");
        self.requests.lock().push(request);
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn prepared(params: Value) -> PreparedRequest {
        PreparedRequest {
            verb: Verb::Get,
            method_id: "sheets.spreadsheets.values.batchGet".to_string(),
            path: "v4/spreadsheets/abc/values:batchGet".to_string(),
            params: params.as_object().cloned().unwrap_or_default(),
            payload: None,
        }
    }

    #[test]
    fn test_query_pairs_repeat_arrays() {
        let request = prepared(json!({"ranges": ["A1", "B2"], "majorDimension": "ROWS"}));
        let pairs = request.query_pairs();
        assert!(pairs.contains(&("ranges".to_string(), "A1".to_string())));
        assert!(pairs.contains(&("ranges".to_string(), "B2".to_string())));
        assert!(pairs.contains(&("majorDimension".to_string(), "ROWS".to_string())));
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn test_query_pairs_skip_nulls_and_render_scalars() {
        let request = prepared(json!({"a": null, "b": true, "c": 3}));
        let pairs = request.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("b".to_string(), "true".to_string()),
                ("c".to_string(), "3".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_recording_transport_returns_canned_response() {
        let transport = RecordingTransport::with_response(json!({"spreadsheetId": "new"}));
        let response = transport.execute(prepared(json!({}))).await.unwrap();
        assert_eq!(response["spreadsheetId"], "new");
        assert_eq!(transport.requests().len(), 1);
    }
}
