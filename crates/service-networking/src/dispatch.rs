//! Outcome classification
//!
//! Checks run in a fixed order: response shape, then transport error and
//! status, then body presence. Response bodies are logged at debug level and
//! never influence the result.

use crate::error::NetworkingError;
use crate::transport::RawOutcome;

/// Only status treated as success
pub const STATUS_OK: u16 = 200;

/// Reduce a transport outcome to body bytes or a [`NetworkingError`]
///
/// Never returns [`NetworkingError::InvalidURL`].
pub fn classify(outcome: RawOutcome) -> Result<Vec<u8>, NetworkingError> {
    let RawOutcome { response, error } = outcome;

    let Some(response) = response else {
        match &error {
            Some(err) => tracing::warn!("No HTTP response from transport: {}", err),
            None => tracing::warn!("No HTTP response from transport"),
        }
        return Err(NetworkingError::NoResponseFromServer);
    };

    if let Some(err) = &error {
        tracing::warn!("API error: status {}, {}", response.status, err);
        return Err(NetworkingError::ServerError);
    }

    if response.status != STATUS_OK {
        tracing::warn!("API error: status {}", response.status);
        return Err(NetworkingError::ServerError);
    }

    match response.body {
        Some(body) if !body.is_empty() => {
            log_body(&body);
            Ok(body)
        }
        _ => Err(NetworkingError::NoDataReturned),
    }
}

fn log_body(body: &[u8]) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    match serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
    {
        Some(pretty) => tracing::debug!("Response: {}", pretty),
        None => tracing::debug!("Response: {}", String::from_utf8_lossy(body)),
    }
}
