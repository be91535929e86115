//! Service provider
//!
//! [`ServiceProvider`] runs the whole pipeline for a [`Service`]: build the
//! request, send it through its [`Transport`], classify the outcome and,
//! for typed loads, decode the body as JSON.

use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::instrument;

#[cfg(feature = "reqwest")]
use crate::backends::ReqwestTransport;
use crate::config::HeaderConfig;
use crate::dispatch::classify;
use crate::error::NetworkingError;
use crate::request::{build_request, ServiceRequest};
use crate::service::Service;
use crate::transport::Transport;

/// Service provider using the reqwest transport
#[cfg(feature = "reqwest")]
pub type HttpServiceProvider = ServiceProvider<ReqwestTransport>;

/// Loads services through a transport
#[derive(Debug, Clone)]
pub struct ServiceProvider<T> {
    transport: T,
    config: HeaderConfig,
}

#[cfg(feature = "reqwest")]
impl ServiceProvider<ReqwestTransport> {
    /// Provider over a default reqwest client, without ambient headers
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::new())
    }
}

#[cfg(feature = "reqwest")]
impl Default for ServiceProvider<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ServiceProvider<T>
where
    T: Transport,
{
    /// Provider over `transport`, without ambient headers
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            config: HeaderConfig::default(),
        }
    }

    /// Use `config` for the headers of every request built from now on
    pub fn with_config(mut self, config: HeaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Ambient header configuration
    pub fn config(&self) -> &HeaderConfig {
        &self.config
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the concrete request for `service`
    pub fn build<S>(&self, service: &S) -> Result<ServiceRequest, NetworkingError>
    where
        S: Service + ?Sized,
    {
        build_request(service, &self.config)
    }

    /// Send `request` once and classify the outcome
    #[instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    pub async fn dispatch(&self, request: &ServiceRequest) -> Result<Vec<u8>, NetworkingError> {
        let outcome = self.transport.send(request).await;
        classify(outcome)
    }

    /// Load the raw body of `service`
    pub async fn load<S>(&self, service: &S) -> Result<Vec<u8>, NetworkingError>
    where
        S: Service + ?Sized,
    {
        let request = self.build(service)?;
        self.dispatch(&request).await
    }

    /// Load `service` and decode its JSON body as `U`
    pub async fn load_decoded<U, S>(&self, service: &S) -> Result<U, NetworkingError>
    where
        U: DeserializeOwned,
        S: Service + ?Sized,
    {
        let body = self.load(service).await?;
        decode(&body)
    }

    /// Load `service` on the current tokio runtime and hand the result to
    /// `completion`
    ///
    /// `completion` runs exactly once, on a runtime worker, including when
    /// the request cannot be built.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn load_with<S, F>(&self, service: &S, completion: F) -> JoinHandle<()>
    where
        T: Clone + 'static,
        S: Service + ?Sized,
        F: FnOnce(Result<Vec<u8>, NetworkingError>) + Send + 'static,
    {
        let request = self.build(service);
        self.spawn_dispatch(request, completion)
    }

    /// Typed form of [`ServiceProvider::load_with`]
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn load_decoded_with<U, S, F>(&self, service: &S, completion: F) -> JoinHandle<()>
    where
        T: Clone + 'static,
        U: DeserializeOwned + 'static,
        S: Service + ?Sized,
        F: FnOnce(Result<U, NetworkingError>) + Send + 'static,
    {
        let request = self.build(service);
        self.spawn_dispatch(request, move |result| {
            completion(result.and_then(|body| decode(&body)))
        })
    }

    fn spawn_dispatch<F>(
        &self,
        request: Result<ServiceRequest, NetworkingError>,
        completion: F,
    ) -> JoinHandle<()>
    where
        T: Clone + 'static,
        F: FnOnce(Result<Vec<u8>, NetworkingError>) + Send + 'static,
    {
        let provider = self.clone();

        tokio::spawn(async move {
            let result = match request {
                Ok(request) => provider.dispatch(&request).await,
                Err(err) => Err(err),
            };
            completion(result);
        })
    }
}

fn decode<U>(body: &[u8]) -> Result<U, NetworkingError>
where
    U: DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|err| {
        tracing::warn!("Could not decode response: {}", err);
        NetworkingError::from(err)
    })
}
