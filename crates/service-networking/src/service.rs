//! Service descriptors
//!
//! A [`Service`] declares one HTTP call: where it goes, which query items it
//! carries and which method it uses. It performs no I/O; the request builder
//! turns it into a [`crate::ServiceRequest`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Query parameters attached to a service call
pub type QueryParameters = HashMap<String, String>;

/// HTTP method of a service call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceMethod {
    /// GET
    #[default]
    Get,
    /// PUT
    Put,
    /// POST
    Post,
}

impl ServiceMethod {
    /// Method name as it appears on the request line
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceMethod::Get => "GET",
            ServiceMethod::Put => "PUT",
            ServiceMethod::Post => "POST",
        }
    }
}

impl fmt::Display for ServiceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(ServiceMethod::Get),
            "PUT" => Ok(ServiceMethod::Put),
            "POST" => Ok(ServiceMethod::Post),
            _ => Err(format!("Unsupported service method: {}", s)),
        }
    }
}

/// Declarative description of one HTTP call
///
/// Implement this on any value type that knows its endpoint. The accessors
/// must be side-effect free.
pub trait Service {
    /// Scheme and host, e.g. `https://api.example.com`
    fn base_url(&self) -> &str;

    /// Path placed verbatim on the base URL, e.g. `/api/v2/search`
    fn path(&self) -> &str;

    /// Query items, if any
    fn parameters(&self) -> Option<&QueryParameters> {
        None
    }

    /// HTTP method
    fn method(&self) -> ServiceMethod;
}

impl<S: Service + ?Sized> Service for &S {
    fn base_url(&self) -> &str {
        (**self).base_url()
    }

    fn path(&self) -> &str {
        (**self).path()
    }

    fn parameters(&self) -> Option<&QueryParameters> {
        (**self).parameters()
    }

    fn method(&self) -> ServiceMethod {
        (**self).method()
    }
}

/// Plain [`Service`] value for call sites that do not need their own type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Scheme and host
    pub base_url: String,
    /// Request path
    pub path: String,
    /// Query items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<QueryParameters>,
    /// HTTP method
    #[serde(default)]
    pub method: ServiceMethod,
}

impl ServiceDescriptor {
    /// Create a descriptor without query parameters
    pub fn new(base_url: impl Into<String>, path: impl Into<String>, method: ServiceMethod) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
            parameters: None,
            method,
        }
    }

    /// Add a single query item, replacing any previous value for `key`
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Replace all query items
    pub fn with_parameters(mut self, parameters: QueryParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

impl Service for ServiceDescriptor {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn parameters(&self) -> Option<&QueryParameters> {
        self.parameters.as_ref()
    }

    fn method(&self) -> ServiceMethod {
        self.method
    }
}
