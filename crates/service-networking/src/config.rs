//! Ambient header configuration
//!
//! Two optional values are added to every request built from a service: a
//! bearer token and a user agent. They are passed explicitly to the request
//! builder; [`HeaderConfig::from_env`] is the bridge from process environment.

use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Environment variable holding the bearer token
pub const ENV_AUTHORIZATION_HEADER: &str = "AUTHORIZATION_HEADER";
/// Environment variable holding the user agent
pub const ENV_USER_AGENT: &str = "USER_AGENT";

/// Optional headers injected into every built request
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderConfig {
    /// Token sent as `Authorization: Bearer <token>`
    #[serde(default)]
    pub authorization: Option<String>,
    /// Value sent as `User-Agent`
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl HeaderConfig {
    /// Config with neither header set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bearer token
    pub fn with_authorization(mut self, token: impl Into<String>) -> Self {
        self.authorization = Some(token.into());
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Read both values from the process environment
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Override fields with any values present in the process environment
    pub fn merge_env(mut self) -> Self {
        if let Ok(token) = env::var(ENV_AUTHORIZATION_HEADER) {
            self.authorization = Some(token);
        }

        if let Ok(user_agent) = env::var(ENV_USER_AGENT) {
            self.user_agent = Some(user_agent);
        }

        self
    }
}

impl fmt::Debug for HeaderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderConfig")
            .field(
                "authorization",
                &self.authorization.as_ref().map(|_| "<redacted>"),
            )
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
