//! Request construction
//!
//! Turns a [`Service`] into a [`ServiceRequest`] without touching the network.

use std::collections::BTreeMap;

use url::Url;

use crate::config::HeaderConfig;
use crate::error::NetworkingError;
use crate::service::{Service, ServiceMethod};

/// `Authorization` header name
pub const AUTHORIZATION: &str = "Authorization";
/// `User-Agent` header name
pub const USER_AGENT: &str = "User-Agent";

/// Concrete request derived from a [`Service`]
///
/// The URL is always absolute and has a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    url: Url,
    method: ServiceMethod,
    headers: BTreeMap<String, String>,
}

impl ServiceRequest {
    /// Build a request from `service`, see [`build_request`]
    pub fn new<S>(service: &S, config: &HeaderConfig) -> Result<Self, NetworkingError>
    where
        S: Service + ?Sized,
    {
        build_request(service, config)
    }

    /// Resolved URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// HTTP method
    pub fn method(&self) -> ServiceMethod {
        self.method
    }

    /// All headers
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Value of a single header
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Build a [`ServiceRequest`] from a service and the ambient header config
///
/// Fails with [`NetworkingError::InvalidURL`] when the base URL does not
/// parse, has no host, or the composed URL is not a valid absolute URL.
pub fn build_request<S>(service: &S, config: &HeaderConfig) -> Result<ServiceRequest, NetworkingError>
where
    S: Service + ?Sized,
{
    let url = compose_url(service)?;

    let mut headers = BTreeMap::new();

    if let Some(token) = &config.authorization {
        headers.insert(AUTHORIZATION.to_string(), format!("Bearer {}", token));
    }

    if let Some(user_agent) = &config.user_agent {
        headers.insert(USER_AGENT.to_string(), user_agent.clone());
    }

    Ok(ServiceRequest {
        url,
        method: service.method(),
        headers,
    })
}

fn compose_url<S>(service: &S) -> Result<Url, NetworkingError>
where
    S: Service + ?Sized,
{
    let mut url = Url::parse(service.base_url())?;

    if url.cannot_be_a_base() || url.host_str().map_or(true, str::is_empty) {
        tracing::debug!("Base URL has no host: {}", service.base_url());
        return Err(NetworkingError::InvalidURL);
    }

    let path = service.path();
    if !is_verbatim_path(path) {
        tracing::debug!("Path would be rewritten by URL composition: {}", path);
        return Err(NetworkingError::InvalidURL);
    }

    url.set_path(path);

    if let Some(parameters) = service.parameters().filter(|p| !p.is_empty()) {
        url.set_query(None);
        url.query_pairs_mut()
            .extend_pairs(parameters.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    // The composed URL must survive a round trip through the parser.
    let url = Url::parse(url.as_str())?;

    if url.host_str().is_none() {
        return Err(NetworkingError::InvalidURL);
    }

    Ok(url)
}

/// Whether `Url::set_path` keeps `path` as given, up to percent-encoding
///
/// A hosted URL needs an absolute path. Dot segments are resolved and
/// backslashes become slashes, so those paths are refused.
fn is_verbatim_path(path: &str) -> bool {
    if path.is_empty() {
        return true;
    }

    path.starts_with('/') && !path.contains('\\') && !path.split('/').any(is_dot_segment)
}

fn is_dot_segment(segment: &str) -> bool {
    matches!(
        segment.to_ascii_lowercase().as_str(),
        "." | ".." | "%2e" | ".%2e" | "%2e." | "%2e%2e"
    )
}
