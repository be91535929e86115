//! Networking error types

use thiserror::Error;

/// Every way a service call can fail
///
/// The set is closed: request construction, dispatch and decoding all report
/// through one of these five kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum NetworkingError {
    /// The service could not be composed into a valid absolute URL
    #[error("Invalid URL")]
    InvalidURL,
    /// The transport did not produce an HTTP response
    #[error("No response from server")]
    NoResponseFromServer,
    /// The server answered with a status other than 200, or the transport
    /// reported an error alongside the response
    #[error("Server error")]
    ServerError,
    /// The server answered 200 with an empty body
    #[error("No data returned")]
    NoDataReturned,
    /// The body could not be decoded into the requested type
    #[error("Error decoding response")]
    ErrorDecodingResponse,
}

impl From<serde_json::Error> for NetworkingError {
    fn from(_err: serde_json::Error) -> Self {
        NetworkingError::ErrorDecodingResponse
    }
}

impl From<url::ParseError> for NetworkingError {
    fn from(_err: url::ParseError) -> Self {
        NetworkingError::InvalidURL
    }
}
