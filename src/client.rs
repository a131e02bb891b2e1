//! Sheets API HTTP client.
//!
//! Low-level transport that handles bearer authentication and raw requests.
//! Request shapes are staged by the resource facades; this client only sends
//! them.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde_json::Value;
use url::Url;

use crate::endpoint::Verb;
use crate::error::{Result, SheetsError};
use crate::transport::{PreparedRequest, Service, Transport};

const DEFAULT_API_URL: &str = "https://sheets.googleapis.com/";
const USER_AGENT: &str = concat!("sheetsapi/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding the OAuth access token.
pub const TOKEN_ENV: &str = "SHEETS_ACCESS_TOKEN";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "SHEETS_API_URL";

/// Low-level Sheets API client.
///
/// Implements [`Transport`] by sending prepared requests with a bearer token.
/// The token is obtained elsewhere; this client never refreshes it.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use sheetsapi::SheetsClient;
///
/// # fn example() -> sheetsapi::Result<()> {
/// // Create from environment variables
/// let client = SheetsClient::from_env()?;
///
/// // Or configure manually
/// let client = SheetsClient::new("ya29.token", "https://sheets.googleapis.com")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SheetsClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
}

impl std::fmt::Debug for SheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl SheetsClient {
    /// Create a client from environment variables.
    ///
    /// Uses `SHEETS_ACCESS_TOKEN` for authentication and optionally
    /// `SHEETS_API_URL` for the base URL (defaults to
    /// `https://sheets.googleapis.com/`).
    ///
    /// # Errors
    ///
    /// Returns an error if `SHEETS_ACCESS_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var(TOKEN_ENV).map_err(|_| {
            SheetsError::ConfigMissing(format!("{TOKEN_ENV} environment variable not set"))
        })?;

        let base_url = env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&token, &base_url)
    }

    /// Create a new client with the provided token and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(SheetsError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Wrap the client as a shareable service handle.
    pub fn into_service(self) -> Service {
        Arc::new(self)
    }

    /// Absolute URL for a prepared request, query string included.
    pub fn url_for(&self, request: &PreparedRequest) -> Result<Url> {
        let mut url = self.base_url.join(&request.path)?;
        let pairs = request.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(SheetsError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(SheetsError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    ///
    /// Google APIs report errors as `{"error": {"code", "message", "status"}}`.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        if let Ok(json) = serde_json::from_str::<Value>(&body) {
            if let Some(msg) = json.pointer("/error/message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
        }

        body
    }
}

fn http_method(verb: Verb) -> Method {
    match verb {
        Verb::Get => Method::GET,
        Verb::Post => Method::POST,
        Verb::Put => Method::PUT,
        Verb::Patch => Method::PATCH,
        Verb::Delete => Method::DELETE,
    }
}

#[async_trait]
impl Transport for SheetsClient {
    #[tracing::instrument(skip(self, request), fields(method = %request.method_id))]
    async fn execute(&self, request: PreparedRequest) -> Result<Value> {
        let url = self.url_for(&request)?;
        tracing::debug!("{} {}", request.verb, url);

        let mut builder = self
            .http
            .request(http_method(request.verb), url)
            .bearer_auth(&self.token);
        if let Some(payload) = &request.payload {
            builder = builder.json(payload);
        }

        let response = builder.send().await.map_err(SheetsError::HttpError)?;
        let response = Self::check_response(response).await?;

        let body = response.text().await.map_err(SheetsError::HttpError)?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    #[test]
    fn test_client_debug() {
        let client = SheetsClient::new("test-token", "https://sheets.googleapis.com").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("SheetsClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = SheetsClient::new("token", "https://sheets.googleapis.com").unwrap();
        let client2 = SheetsClient::new("token", "https://sheets.googleapis.com/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_url_for_repeats_array_params() {
        let client = SheetsClient::new("token", "https://sheets.googleapis.com").unwrap();
        let mut params = Map::new();
        params.insert("ranges".to_string(), json!(["A1", "B1:C2"]));
        let request = PreparedRequest {
            verb: Verb::Get,
            method_id: "sheets.spreadsheets.values.batchGet".to_string(),
            path: "v4/spreadsheets/abc/values:batchGet".to_string(),
            params,
            payload: None,
        };

        let url = client.url_for(&request).unwrap();
        assert_eq!(url.path(), "/v4/spreadsheets/abc/values:batchGet");
        assert_eq!(url.query(), Some("ranges=A1&ranges=B1%3AC2"));
    }
}
