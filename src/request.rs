//! Staged requests and mixin composition.
//!
//! A [`RequestBuilder`] accumulates query parameters and a JSON body for one
//! API call. Call sites that need domain-specific mutators wrap the builder in
//! their own type implementing [`Mixin`]; the wrapper owns the builder and
//! exposes only the chainable methods that call site supports.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::endpoint::{RequestDescriptor, RequestOptions, UrlParams};
use crate::error::Result;
use crate::transport::{PreparedRequest, Service};

/// A mutable request staged for one API method.
///
/// The builder is consumed by [`RequestBuilder::send`], so a request is sent
/// at most once and cannot be mutated afterwards.
pub struct RequestBuilder {
    descriptor: Arc<RequestDescriptor>,
    url_params: UrlParams,
    params: Map<String, Value>,
    payload: Map<String, Value>,
    service: Service,
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("method", &self.descriptor.method_id())
            .field("url_params", &self.url_params)
            .field("params", &self.params)
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

impl RequestBuilder {
    pub(crate) fn new(
        descriptor: Arc<RequestDescriptor>,
        url_params: UrlParams,
        options: RequestOptions,
        service: Service,
    ) -> Self {
        Self {
            descriptor,
            url_params,
            params: options.params,
            payload: options.payload,
            service,
        }
    }

    pub fn descriptor(&self) -> &Arc<RequestDescriptor> {
        &self.descriptor
    }

    pub fn url_params(&self) -> &UrlParams {
        &self.url_params
    }

    /// Staged query parameters.
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.params
    }

    /// Staged JSON body.
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.payload
    }

    /// Set a single query parameter.
    #[must_use]
    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Render the request exactly as it would be handed to the transport.
    pub fn prepare(&self) -> Result<PreparedRequest> {
        let verb = self.descriptor.verb();
        Ok(PreparedRequest {
            verb,
            method_id: self.descriptor.method_id(),
            path: self.descriptor.render_path(&self.url_params)?,
            params: self.params.clone(),
            payload: verb.has_body().then(|| self.payload.clone()),
        })
    }

    /// Send the staged request and return the decoded JSON response.
    #[tracing::instrument(skip(self), fields(method = %self.descriptor.method_id()))]
    pub async fn send(self) -> Result<Value> {
        let prepared = self.prepare()?;
        tracing::debug!(path = %prepared.path, "sending staged request");
        self.service.execute(prepared).await
    }

    /// Send the staged request and deserialize the response into `T`.
    pub async fn send_as<T: DeserializeOwned>(self) -> Result<T> {
        let value = self.send().await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Append `items` to the array stored under `key`.
///
/// A missing or non-array entry is replaced with a fresh array first.
pub(crate) fn extend_array<I>(map: &mut Map<String, Value>, key: &str, items: I)
where
    I: IntoIterator<Item = Value>,
{
    let entry = map.entry(key.to_string()).or_insert(Value::Null);
    let mut array = match entry.take() {
        Value::Array(array) => array,
        _ => Vec::new(),
    };
    array.extend(items);
    *entry = Value::Array(array);
}

/// A call-site specific extension of a [`RequestBuilder`].
///
/// Implementors own the builder they are attached to and add chainable
/// mutators that stage payload or params. Mutators never perform I/O; only
/// [`Mixin::send`] does.
#[async_trait]
pub trait Mixin: Sized + Send {
    /// Wrap a builder whose defaults are already populated.
    fn attach(request: RequestBuilder) -> Self;

    fn request(&self) -> &RequestBuilder;

    fn request_mut(&mut self) -> &mut RequestBuilder;

    /// Detach the underlying builder.
    fn into_request(self) -> RequestBuilder;

    fn prepare(&self) -> Result<PreparedRequest> {
        self.request().prepare()
    }

    async fn send(self) -> Result<Value> {
        self.into_request().send().await
    }
}

impl Mixin for RequestBuilder {
    fn attach(request: RequestBuilder) -> Self {
        request
    }

    fn request(&self) -> &RequestBuilder {
        self
    }

    fn request_mut(&mut self) -> &mut RequestBuilder {
        self
    }

    fn into_request(self) -> RequestBuilder {
        self
    }
}

/// Implement [`Mixin`] for a newtype wrapping a [`RequestBuilder`].
macro_rules! impl_mixin {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl $crate::request::Mixin for $ty {
                fn attach(request: $crate::request::RequestBuilder) -> Self {
                    Self(request)
                }

                fn request(&self) -> &$crate::request::RequestBuilder {
                    &self.0
                }

                fn request_mut(&mut self) -> &mut $crate::request::RequestBuilder {
                    &mut self.0
                }

                fn into_request(self) -> $crate::request::RequestBuilder {
                    self.0
                }
            }
        )+
    };
}

pub(crate) use impl_mixin;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{DiscoveryRegistry, Endpoint, EndpointRegistry, Verb};
    use crate::transport::RecordingTransport;
    use serde_json::json;

    fn endpoint(transport: Arc<RecordingTransport>) -> Endpoint {
        let descriptor = DiscoveryRegistry
            .resolve("sheets", "v4", "spreadsheets.values", "update")
            .unwrap();
        Endpoint::new(Arc::new(descriptor), transport)
    }

    fn url_params() -> UrlParams {
        [("spreadsheetId", "abc"), ("range", "A1")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_builders_do_not_share_defaults() {
        let transport = Arc::new(RecordingTransport::new());
        let endpoint = endpoint(transport);
        let options = RequestOptions::new().payload(json!({"values": []}));

        let mut first = endpoint
            .create_request(Verb::Put, url_params(), options.clone())
            .unwrap();
        let second = endpoint
            .create_request(Verb::Put, url_params(), options)
            .unwrap();

        extend_array(first.payload_mut(), "values", [json!(["x"])]);

        assert_eq!(first.payload()["values"], json!([["x"]]));
        assert_eq!(second.payload()["values"], json!([]));
    }

    #[test]
    fn test_extend_array_replaces_non_arrays() {
        let mut map = Map::new();
        map.insert("ranges".to_string(), json!("oops"));
        extend_array(&mut map, "ranges", [json!("A1")]);
        assert_eq!(map["ranges"], json!(["A1"]));
    }

    #[test]
    fn test_extend_array_creates_and_appends() {
        let mut map = Map::new();
        extend_array(&mut map, "requests", [json!(1)]);
        extend_array(&mut map, "requests", [json!(2), json!(3)]);
        extend_array(&mut map, "empty", []);
        assert_eq!(map["requests"], json!([1, 2, 3]));
        assert_eq!(map["empty"], json!([]));
    }

    #[test]
    fn test_prepare_omits_body_for_get() {
        let descriptor = DiscoveryRegistry
            .resolve("sheets", "v4", "spreadsheets.values", "get")
            .unwrap();
        let endpoint = Endpoint::new(Arc::new(descriptor), Arc::new(RecordingTransport::new()));
        let request = endpoint
            .create_request(Verb::Get, url_params(), RequestOptions::new())
            .unwrap();

        let prepared = request.prepare().unwrap();
        assert_eq!(prepared.verb, Verb::Get);
        assert!(prepared.payload.is_none());
    }

    #[test]
    fn test_send_hands_staged_graph_to_transport() {
        let transport = Arc::new(RecordingTransport::new());
        let request = endpoint(transport.clone())
            .create_request(
                Verb::Put,
                url_params(),
                RequestOptions::new()
                    .params(json!({"valueInputOption": "RAW"}))
                    .payload(json!({"values": [[1]], "majorDimension": "ROWS"})),
            )
            .unwrap()
            .param("includeValuesInResponse", true);
        let staged = request.prepare().unwrap();

        tokio_test::block_on(request.send()).unwrap();

        assert_eq!(transport.requests(), vec![staged]);
    }
}
