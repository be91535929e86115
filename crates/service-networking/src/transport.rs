//! Transport capability
//!
//! The [`Transport`] performs one HTTP exchange and reports what it saw as a
//! [`RawOutcome`]. It never classifies the outcome; that is left to
//! [`crate::dispatch::classify`].

use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;

use crate::request::ServiceRequest;

/// Failures reported by a transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),
    /// Request timeout
    #[error("Request timeout")]
    Timeout,
    /// Reading the response body failed
    #[error("Body error: {0}")]
    Body(String),
    /// Other error
    #[error("{0}")]
    Other(String),
}

/// HTTP-shaped response: a status code and an optional body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Body bytes, `None` when the transport produced none
    pub body: Option<Vec<u8>>,
}

impl RawResponse {
    /// Create a response with a body
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: Some(body.into()),
        }
    }

    /// Create a response without a body
    pub fn empty(status: u16) -> Self {
        Self { status, body: None }
    }
}

/// Everything a transport observed for one request
///
/// `response` is `None` when no HTTP-shaped response was obtained. `error`
/// may be set together with a response, e.g. when the status line arrived
/// but the body could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawOutcome {
    /// HTTP response, if any
    pub response: Option<RawResponse>,
    /// Error reported by the transport, if any
    pub error: Option<TransportError>,
}

impl RawOutcome {
    /// Outcome carrying only a response
    pub fn response(response: RawResponse) -> Self {
        Self {
            response: Some(response),
            error: None,
        }
    }

    /// Outcome where the transport failed before any response
    pub fn failure(error: TransportError) -> Self {
        Self {
            response: None,
            error: Some(error),
        }
    }

    /// Attach a transport error to this outcome
    pub fn with_error(mut self, error: TransportError) -> Self {
        self.error = Some(error);
        self
    }
}

/// Performs HTTP exchanges
///
/// Implementations must be safe to share between concurrent calls and are
/// responsible for their own timeouts.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Send `request` once and report what happened
    async fn send(&self, request: &ServiceRequest) -> RawOutcome;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: &ServiceRequest) -> RawOutcome {
        (**self).send(request).await
    }
}
