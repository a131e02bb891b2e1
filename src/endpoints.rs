//! Top-level factory for resource facades.

use std::fmt;
use std::sync::Arc;

use crate::client::SheetsClient;
use crate::endpoint::{DiscoveryRegistry, EndpointRegistry};
use crate::error::{Result, SheetsError};
use crate::models::SpreadsheetProperties;
use crate::resources::{DeveloperMetadata, Sheets, Spreadsheets, Values};
use crate::traits::ApiBase;
use crate::transport::Service;

/// Source of the spreadsheet a caller is currently working in.
///
/// Hosts that have a notion of an "active" spreadsheet (an add-on, an editor
/// session) implement this so [`SheetsEndpoints::from_attached`] can pick it
/// up.
pub trait ActiveSpreadsheet {
    /// Id of the active spreadsheet.
    fn active_spreadsheet_id(&self) -> Result<String>;
}

impl ActiveSpreadsheet for String {
    fn active_spreadsheet_id(&self) -> Result<String> {
        Ok(self.clone())
    }
}

impl ActiveSpreadsheet for str {
    fn active_spreadsheet_id(&self) -> Result<String> {
        Ok(self.to_string())
    }
}

/// Entry point handing out resource facades for one spreadsheet.
///
/// Each accessor returns a fresh facade with its own descriptor cache.
///
/// # Example
///
/// ```no_run
/// use sheetsapi::{AppendOptions, Mixin, SheetsEndpoints};
/// use serde_json::json;
///
/// # async fn example() -> sheetsapi::Result<()> {
/// let endpoints = SheetsEndpoints::from_id("1BxiMVs0XRA5nFMd")?;
/// endpoints
///     .values()
///     .append(AppendOptions::new("Sheet1!A1", vec![json!(1), json!(2)]))?
///     .send()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SheetsEndpoints {
    id: Option<String>,
    service: Service,
    registry: Arc<dyn EndpointRegistry>,
}

impl fmt::Debug for SheetsEndpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetsEndpoints")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl SheetsEndpoints {
    /// Target spreadsheet `id`, sending through `service`.
    pub fn with_service(id: impl Into<String>, service: Service) -> Self {
        Self {
            id: Some(id.into()),
            service,
            registry: DiscoveryRegistry::shared(),
        }
    }

    /// No target spreadsheet; only id-free methods (like create) succeed.
    pub fn blank_with_service(service: Service) -> Self {
        Self {
            id: None,
            service,
            registry: DiscoveryRegistry::shared(),
        }
    }

    /// Target spreadsheet `id` using a client configured from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Configuration`] for an empty id and
    /// [`SheetsError::ConfigMissing`] when no access token is configured.
    pub fn from_id(id: impl Into<String>) -> Result<Self> {
        let id = non_empty(id.into())?;
        Ok(Self::with_service(id, SheetsClient::from_env()?.into_service()))
    }

    /// No target spreadsheet, using a client configured from the environment.
    pub fn blank() -> Result<Self> {
        Ok(Self::blank_with_service(SheetsClient::from_env()?.into_service()))
    }

    /// Target the host's active spreadsheet.
    pub fn from_attached<P>(host: &P) -> Result<Self>
    where
        P: ActiveSpreadsheet + ?Sized,
    {
        Self::from_id(host.active_spreadsheet_id()?)
    }

    /// Target the host's active spreadsheet, sending through `service`.
    pub fn from_attached_with_service<P>(host: &P, service: Service) -> Result<Self>
    where
        P: ActiveSpreadsheet + ?Sized,
    {
        let id = non_empty(host.active_spreadsheet_id()?)?;
        Ok(Self::with_service(id, service))
    }

    /// Create a spreadsheet and target it.
    pub async fn create(properties: SpreadsheetProperties) -> Result<Self> {
        Self::create_with_service(properties, SheetsClient::from_env()?.into_service()).await
    }

    /// Create a spreadsheet through `service` and target it.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::ApiError`] when the response carries no
    /// `spreadsheetId`.
    #[tracing::instrument(skip(service), fields(title = ?properties.title))]
    pub async fn create_with_service(
        properties: SpreadsheetProperties,
        service: Service,
    ) -> Result<Self> {
        let blank = Self::blank_with_service(service);
        let response = blank.spreadsheets().create(properties)?.send().await?;

        let id = response
            .get("spreadsheetId")
            .and_then(|v| v.as_str())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SheetsError::ApiError {
                message: "create response has no spreadsheetId".to_string(),
                status_code: None,
            })?;
        tracing::info!(spreadsheet_id = id, "created spreadsheet");

        Ok(Self::with_service(id, blank.service))
    }

    /// Resolve descriptors through `registry` instead of the built-in table.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<dyn EndpointRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// The targeted spreadsheet, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn service(&self) -> &Service {
        &self.service
    }

    pub fn spreadsheets(&self) -> Spreadsheets {
        Spreadsheets::with_base(self.base())
    }

    pub fn values(&self) -> Values {
        Values::with_base(self.base())
    }

    pub fn sheets(&self) -> Sheets {
        Sheets::with_base(self.base())
    }

    pub fn developer_metadata(&self) -> DeveloperMetadata {
        DeveloperMetadata::with_base(self.base())
    }

    fn base(&self) -> ApiBase {
        ApiBase::with_registry(self.id.clone(), self.service.clone(), self.registry.clone())
    }
}

fn non_empty(id: String) -> Result<String> {
    if id.trim().is_empty() {
        return Err(SheetsError::Configuration(
            "spreadsheet id must not be empty".to_string(),
        ));
    }
    Ok(id)
}
