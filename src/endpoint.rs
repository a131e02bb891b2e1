//! Request descriptors and the endpoint registry.
//!
//! A [`RequestDescriptor`] is the immutable shape of one API method: which
//! resource it belongs to, which HTTP verb it uses, and the URL template its
//! parameters are substituted into. Descriptors come from an
//! [`EndpointRegistry`]; the default [`DiscoveryRegistry`] is a precomputed
//! table of the Sheets v4 methods this crate stages requests for.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SheetsError};
use crate::request::{Mixin, RequestBuilder};
use crate::transport::Service;

/// Name of the API every descriptor in this crate belongs to.
pub const API_NAME: &str = "sheets";

/// API version used for every descriptor.
pub const API_VERSION: &str = "v4";

/// URL template substitutions, keyed by placeholder name (e.g. `spreadsheetId`).
pub type UrlParams = BTreeMap<String, String>;

/// HTTP verb of an API method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    /// The verb as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
        }
    }

    /// Whether requests with this verb carry a JSON body.
    pub fn has_body(self) -> bool {
        matches!(self, Verb::Post | Verb::Put | Verb::Patch)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable definition of one callable API method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    api: String,
    version: String,
    resource: String,
    method: String,
    verb: Verb,
    path_template: String,
}

impl RequestDescriptor {
    /// Create a descriptor.
    ///
    /// `path_template` is relative to the API base URL and may contain
    /// `{name}` placeholders, e.g. `v4/spreadsheets/{spreadsheetId}`.
    pub fn new(
        api: &str,
        version: &str,
        resource: &str,
        method: &str,
        verb: Verb,
        path_template: &str,
    ) -> Self {
        Self {
            api: api.to_string(),
            version: version.to_string(),
            resource: resource.to_string(),
            method: method.to_string(),
            verb,
            path_template: path_template.to_string(),
        }
    }

    pub fn api(&self) -> &str {
        &self.api
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Dotted resource path, e.g. `spreadsheets.values`.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn path_template(&self) -> &str {
        &self.path_template
    }

    /// Fully qualified method id, e.g. `sheets.spreadsheets.values.append`.
    pub fn method_id(&self) -> String {
        format!("{}.{}.{}", self.api, self.resource, self.method)
    }

    /// Names of the `{placeholders}` in the path template, in order.
    pub fn placeholders(&self) -> Vec<&str> {
        self.path_template
            .split('{')
            .skip(1)
            .filter_map(|rest| rest.split_once('}').map(|(name, _)| name))
            .collect()
    }

    /// Substitute URL parameters into the path template.
    ///
    /// Values are percent-encoded. Every placeholder must have a non-empty
    /// value, otherwise a [`SheetsError::Configuration`] naming all missing
    /// parameters is returned.
    pub fn render_path(&self, url_params: &UrlParams) -> Result<String> {
        let missing: Vec<&str> = self
            .placeholders()
            .into_iter()
            .filter(|name| url_params.get(*name).map_or(true, |v| v.is_empty()))
            .collect();
        if !missing.is_empty() {
            return Err(SheetsError::missing(&self.method_id(), &missing));
        }

        let mut path = self.path_template.clone();
        for name in self.placeholders() {
            if let Some(value) = url_params.get(name) {
                path = path.replace(&format!("{{{name}}}"), &urlencoding::encode(value));
            }
        }
        Ok(path)
    }
}

/// Options carried into a new request: default query parameters and body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub params: Map<String, Value>,
    pub payload: Map<String, Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default query parameters from a JSON object.
    ///
    /// Non-object values leave the parameters empty.
    #[must_use]
    pub fn params(mut self, params: Value) -> Self {
        self.params = into_object(params);
        self
    }

    /// Set the default body from a JSON object.
    ///
    /// Non-object values leave the body empty.
    #[must_use]
    pub fn payload(mut self, payload: Value) -> Self {
        self.payload = into_object(payload);
        self
    }
}

fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// A resolved descriptor bound to the service that will send its requests.
#[derive(Clone)]
pub struct Endpoint {
    descriptor: Arc<RequestDescriptor>,
    service: Service,
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

impl Endpoint {
    pub fn new(descriptor: Arc<RequestDescriptor>, service: Service) -> Self {
        Self {
            descriptor,
            service,
        }
    }

    pub fn descriptor(&self) -> &Arc<RequestDescriptor> {
        &self.descriptor
    }

    /// Stage a new request for this method.
    ///
    /// The options are moved into the builder, so no two builders ever share
    /// a params or payload map.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Configuration`] if `verb` does not match the
    /// method's verb or a URL parameter is missing. Nothing is sent.
    pub fn create_request(
        &self,
        verb: Verb,
        url_params: UrlParams,
        options: RequestOptions,
    ) -> Result<RequestBuilder> {
        if verb != self.descriptor.verb() {
            return Err(SheetsError::Configuration(format!(
                "{} is a {} method, not {}",
                self.descriptor.method_id(),
                self.descriptor.verb(),
                verb
            )));
        }
        // Fail fast on missing parameters; the path is rendered again on send.
        self.descriptor.render_path(&url_params)?;

        Ok(RequestBuilder::new(
            self.descriptor.clone(),
            url_params,
            options,
            self.service.clone(),
        ))
    }

    /// Stage a new request and attach the mixin `M` to it.
    ///
    /// Defaults are populated before `M` is attached, so mixin methods always
    /// see them.
    pub fn create_request_with<M: Mixin>(
        &self,
        verb: Verb,
        url_params: UrlParams,
        options: RequestOptions,
    ) -> Result<M> {
        self.create_request(verb, url_params, options).map(M::attach)
    }
}

/// Resolves API methods to descriptors.
pub trait EndpointRegistry: Send + Sync {
    /// Build the descriptor for `resource.method`.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::UnknownMethod`] if the method is not known.
    fn resolve(
        &self,
        api: &str,
        version: &str,
        resource: &str,
        method: &str,
    ) -> Result<RequestDescriptor>;
}

/// Sheets v4 methods: (resource, method, verb, path relative to the version).
const SHEETS_V4_METHODS: &[(&str, &str, Verb, &str)] = &[
    ("spreadsheets", "get", Verb::Get, "spreadsheets/{spreadsheetId}"),
    ("spreadsheets", "create", Verb::Post, "spreadsheets"),
    (
        "spreadsheets",
        "batchUpdate",
        Verb::Post,
        "spreadsheets/{spreadsheetId}:batchUpdate",
    ),
    (
        "spreadsheets",
        "getByDataFilter",
        Verb::Post,
        "spreadsheets/{spreadsheetId}:getByDataFilter",
    ),
    (
        "spreadsheets.values",
        "get",
        Verb::Get,
        "spreadsheets/{spreadsheetId}/values/{range}",
    ),
    (
        "spreadsheets.values",
        "update",
        Verb::Put,
        "spreadsheets/{spreadsheetId}/values/{range}",
    ),
    (
        "spreadsheets.values",
        "append",
        Verb::Post,
        "spreadsheets/{spreadsheetId}/values/{range}:append",
    ),
    (
        "spreadsheets.values",
        "batchGet",
        Verb::Get,
        "spreadsheets/{spreadsheetId}/values:batchGet",
    ),
    (
        "spreadsheets.values",
        "batchGetByDataFilter",
        Verb::Post,
        "spreadsheets/{spreadsheetId}/values:batchGetByDataFilter",
    ),
    (
        "spreadsheets.values",
        "batchUpdateByDataFilter",
        Verb::Post,
        "spreadsheets/{spreadsheetId}/values:batchUpdateByDataFilter",
    ),
    (
        "spreadsheets.sheets",
        "copyTo",
        Verb::Post,
        "spreadsheets/{spreadsheetId}/sheets/{sheetId}:copyTo",
    ),
    (
        "spreadsheets.developerMetadata",
        "get",
        Verb::Get,
        "spreadsheets/{spreadsheetId}/developerMetadata/{metadataId}",
    ),
    (
        "spreadsheets.developerMetadata",
        "search",
        Verb::Post,
        "spreadsheets/{spreadsheetId}/developerMetadata:search",
    ),
];

/// Registry backed by a static table of Sheets v4 methods.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscoveryRegistry;

impl DiscoveryRegistry {
    /// Shared handle to the default registry.
    pub fn shared() -> Arc<dyn EndpointRegistry> {
        Arc::new(DiscoveryRegistry)
    }

    /// Every `(resource, method)` pair the registry knows.
    pub fn methods() -> impl Iterator<Item = (&'static str, &'static str)> {
        SHEETS_V4_METHODS.iter().map(|(r, m, _, _)| (*r, *m))
    }
}

impl EndpointRegistry for DiscoveryRegistry {
    fn resolve(
        &self,
        api: &str,
        version: &str,
        resource: &str,
        method: &str,
    ) -> Result<RequestDescriptor> {
        let unknown = || SheetsError::UnknownMethod {
            resource: format!("{api}.{version}.{resource}"),
            method: method.to_string(),
        };

        if api != API_NAME || version != API_VERSION {
            return Err(unknown());
        }

        SHEETS_V4_METHODS
            .iter()
            .find(|(r, m, _, _)| *r == resource && *m == method)
            .map(|(r, m, verb, path)| {
                RequestDescriptor::new(api, version, r, m, *verb, &format!("{version}/{path}"))
            })
            .ok_or_else(unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::RecordingTransport;

    fn append_descriptor() -> RequestDescriptor {
        DiscoveryRegistry
            .resolve(API_NAME, API_VERSION, "spreadsheets.values", "append")
            .unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> UrlParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_registry_resolves_known_method() {
        let descriptor = append_descriptor();
        assert_eq!(descriptor.verb(), Verb::Post);
        assert_eq!(
            descriptor.path_template(),
            "v4/spreadsheets/{spreadsheetId}/values/{range}:append"
        );
        assert_eq!(descriptor.method_id(), "sheets.spreadsheets.values.append");
    }

    #[test]
    fn test_registry_rejects_unknown_method() {
        let err = DiscoveryRegistry
            .resolve(API_NAME, API_VERSION, "spreadsheets.values", "explode")
            .unwrap_err();
        assert!(matches!(err, SheetsError::UnknownMethod { ref method, .. } if method == "explode"));
    }

    #[test]
    fn test_registry_rejects_other_versions() {
        let result = DiscoveryRegistry.resolve(API_NAME, "v3", "spreadsheets", "get");
        assert!(matches!(result, Err(SheetsError::UnknownMethod { .. })));
    }

    #[test]
    fn test_every_table_entry_resolves() {
        for (resource, method) in DiscoveryRegistry::methods() {
            assert!(
                DiscoveryRegistry
                    .resolve(API_NAME, API_VERSION, resource, method)
                    .is_ok(),
                "{resource}.{method} should resolve"
            );
        }
    }

    #[test]
    fn test_placeholders_in_order() {
        assert_eq!(append_descriptor().placeholders(), vec!["spreadsheetId", "range"]);
    }

    #[test]
    fn test_render_path_encodes_values() {
        let path = append_descriptor()
            .render_path(&params(&[("spreadsheetId", "abc"), ("range", "Sheet1!A1:B2")]))
            .unwrap();
        assert_eq!(path, "v4/spreadsheets/abc/values/Sheet1%21A1%3AB2:append");
    }

    #[test]
    fn test_render_path_names_all_missing_params() {
        let err = append_descriptor()
            .render_path(&params(&[("spreadsheetId", "")]))
            .unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, SheetsError::Configuration(_)));
        assert!(msg.contains("spreadsheetId"));
        assert!(msg.contains("range"));
    }

    #[test]
    fn test_create_request_rejects_wrong_verb() {
        let endpoint = Endpoint::new(
            Arc::new(append_descriptor()),
            Arc::new(RecordingTransport::new()),
        );
        let result = endpoint.create_request(
            Verb::Get,
            params(&[("spreadsheetId", "abc"), ("range", "A1")]),
            RequestOptions::new(),
        );
        assert!(matches!(result, Err(SheetsError::Configuration(_))));
    }

    #[test]
    fn test_create_request_rejects_missing_url_params() {
        let transport = Arc::new(RecordingTransport::new());
        let endpoint = Endpoint::new(Arc::new(append_descriptor()), transport.clone());

        let err = endpoint
            .create_request(
                Verb::Post,
                params(&[("spreadsheetId", "abc")]),
                RequestOptions::new(),
            )
            .unwrap_err();

        assert!(matches!(err, SheetsError::Configuration(ref msg) if msg.contains("range")));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_request_options_ignore_non_objects() {
        let options = RequestOptions::new()
            .params(serde_json::json!([1, 2]))
            .payload(serde_json::json!({"a": 1}));
        assert!(options.params.is_empty());
        assert_eq!(options.payload.get("a"), Some(&serde_json::json!(1)));
    }
}
