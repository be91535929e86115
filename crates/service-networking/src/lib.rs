//! Declarative HTTP services with typed loading
//!
//! Describe an endpoint with the [`Service`] trait, then let a
//! [`ServiceProvider`] build the request, send it through a [`Transport`] and
//! turn the outcome into either the body or one [`NetworkingError`].
//!
//! # Example
//!
//! ```no_run
//! use serde::Deserialize;
//! use service_networking::{
//!     HeaderConfig, NetworkingError, ServiceDescriptor, ServiceMethod, ServiceProvider,
//! };
//!
//! #[derive(Deserialize)]
//! struct SearchResult {
//!     status: String,
//! }
//!
//! async fn example() -> Result<SearchResult, NetworkingError> {
//!     let provider = ServiceProvider::new().with_config(HeaderConfig::from_env());
//!     let service =
//!         ServiceDescriptor::new("https://api.example.com", "/api/v2/search", ServiceMethod::Get)
//!             .with_parameter("q", "rust");
//!
//!     provider.load_decoded(&service).await
//! }
//! ```

pub mod backends;
pub mod config;
pub mod dispatch;
mod error;
pub mod provider;
pub mod request;
pub mod service;
pub mod transport;

#[cfg(feature = "reqwest")]
pub use backends::ReqwestTransport;
pub use config::HeaderConfig;
pub use dispatch::classify;
pub use error::NetworkingError;
#[cfg(feature = "reqwest")]
pub use provider::HttpServiceProvider;
pub use provider::ServiceProvider;
pub use request::{build_request, ServiceRequest};
pub use service::{QueryParameters, Service, ServiceDescriptor, ServiceMethod};
pub use transport::{RawOutcome, RawResponse, Transport, TransportError};
