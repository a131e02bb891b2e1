//! Error types for Sheets API operations.

use thiserror::Error;

/// Errors that can occur while staging or sending Sheets API requests.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// Environment configuration is missing or incomplete.
    #[error("Sheets configuration required: {0}")]
    ConfigMissing(String),

    /// Required arguments or URL parameters are missing or invalid.
    ///
    /// Always raised before any network activity.
    #[error("Invalid request configuration: {0}")]
    Configuration(String),

    /// The endpoint registry does not know the requested method.
    #[error("Unknown method '{method}' for resource '{resource}'")]
    UnknownMethod { resource: String, method: String },

    /// API request failed.
    #[error("Sheets API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

impl SheetsError {
    /// Build a [`SheetsError::Configuration`] naming the missing fields.
    pub(crate) fn missing(context: &str, fields: &[&str]) -> Self {
        SheetsError::Configuration(format!("{context} requires {}", fields.join(", ")))
    }
}

/// Result type alias for Sheets operations.
pub type Result<T> = core::result::Result<T, SheetsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_names_every_field() {
        let err = SheetsError::missing("copyTo", &["sourceSheet", "destinationSpreadsheetId"]);
        let msg = err.to_string();
        assert!(msg.contains("copyTo"));
        assert!(msg.contains("sourceSheet"));
        assert!(msg.contains("destinationSpreadsheetId"));
    }
}
