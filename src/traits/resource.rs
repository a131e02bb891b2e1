//! Resource trait and the shared facade state.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::endpoint::{
    DiscoveryRegistry, Endpoint, EndpointRegistry, RequestDescriptor, UrlParams, API_NAME,
    API_VERSION,
};
use crate::error::{Result, SheetsError};
use crate::transport::Service;

/// Cache key for a resolved descriptor.
///
/// The resource is fixed per facade, so it is not part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DescriptorKey {
    pub api: &'static str,
    pub version: &'static str,
    pub method: String,
}

impl DescriptorKey {
    pub fn new(method: &str) -> Self {
        Self {
            api: API_NAME,
            version: API_VERSION,
            method: method.to_string(),
        }
    }
}

/// State shared by every resource facade: the spreadsheet id, the service
/// that sends requests, and a per-instance descriptor cache.
///
/// The cache is guarded by a mutex so facades can be shared across tasks;
/// it is never shared between facade instances.
pub struct ApiBase {
    id: Option<String>,
    service: Service,
    registry: Arc<dyn EndpointRegistry>,
    cache: Mutex<HashMap<DescriptorKey, Arc<RequestDescriptor>>>,
}

impl fmt::Debug for ApiBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiBase")
            .field("id", &self.id)
            .field("cached", &self.cached_descriptors())
            .finish_non_exhaustive()
    }
}

impl ApiBase {
    /// Create facade state resolving methods through the default registry.
    pub fn new(id: Option<String>, service: Service) -> Self {
        Self::with_registry(id, service, DiscoveryRegistry::shared())
    }

    pub fn with_registry(
        id: Option<String>,
        service: Service,
        registry: Arc<dyn EndpointRegistry>,
    ) -> Self {
        Self {
            id,
            service,
            registry,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Number of descriptors resolved by this instance so far.
    pub fn cached_descriptors(&self) -> usize {
        self.cache.lock().len()
    }

    /// Resolve `resource.method`, building its descriptor at most once.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Configuration`] for an empty method name and
    /// propagates registry errors unchanged. Failures are not cached.
    pub fn endpoint(&self, resource: &str, method: &str) -> Result<Endpoint> {
        if method.is_empty() {
            return Err(SheetsError::Configuration(format!(
                "method name for '{resource}' must not be empty"
            )));
        }

        let key = DescriptorKey::new(method);
        let mut cache = self.cache.lock();
        let cached = cache.get(&key).cloned();
        let descriptor = match cached {
            Some(descriptor) => descriptor,
            None => {
                tracing::debug!(resource, method, "resolving request descriptor");
                let descriptor =
                    Arc::new(self.registry.resolve(API_NAME, API_VERSION, resource, method)?);
                cache.insert(key, descriptor.clone());
                descriptor
            }
        };

        Ok(Endpoint::new(descriptor, self.service.clone()))
    }

    /// URL parameters every request of this facade starts from.
    pub fn url_params(&self) -> UrlParams {
        let mut params = UrlParams::new();
        if let Some(id) = &self.id {
            params.insert("spreadsheetId".to_string(), id.clone());
        }
        params
    }
}

/// A logical group of Sheets API methods.
///
/// Implementors name their resource path and expose the shared
/// [`ApiBase`]; descriptor resolution comes for free.
pub trait Resource {
    /// Dotted resource path, e.g. `spreadsheets.values`.
    const RESOURCE: &'static str;

    fn base(&self) -> &ApiBase;

    /// The spreadsheet this facade targets, if any.
    fn id(&self) -> Option<&str> {
        self.base().id()
    }

    /// Resolve one of this resource's methods.
    fn endpoint(&self, method: &str) -> Result<Endpoint> {
        self.base().endpoint(Self::RESOURCE, method)
    }
}
