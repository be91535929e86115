//! reqwest-based Transport implementation

use async_trait::async_trait;

use crate::request::ServiceRequest;
use crate::service::ServiceMethod;
use crate::transport::{RawOutcome, RawResponse, Transport, TransportError};

/// [`Transport`] backed by a [`reqwest::Client`]
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with default client settings
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Create a transport from a configured reqwest::Client (timeouts, proxies)
    pub fn from_reqwest(client: reqwest::Client) -> Self {
        Self { inner: client }
    }

    fn prepare_request(&self, request: &ServiceRequest) -> reqwest::RequestBuilder {
        let url = request.url().clone();
        let builder = match request.method() {
            ServiceMethod::Get => self.inner.get(url),
            ServiceMethod::Put => self.inner.put(url),
            ServiceMethod::Post => self.inner.post(url),
        };

        request
            .headers()
            .iter()
            .fold(builder, |builder, (key, value)| builder.header(key.as_str(), value.as_str()))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ServiceRequest) -> RawOutcome {
        let response = match self.prepare_request(request).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!("Request to {} failed: {}", request.url(), err);
                return RawOutcome::failure(err.into());
            }
        };

        let status = response.status().as_u16();

        match response.bytes().await {
            Ok(bytes) => RawOutcome::response(RawResponse::new(status, bytes.to_vec())),
            Err(err) => RawOutcome::response(RawResponse::empty(status))
                .with_error(TransportError::Body(err.to_string())),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection(err.to_string())
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}
