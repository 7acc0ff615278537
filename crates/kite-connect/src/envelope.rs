//! Response envelope decoding.
//!
//! Every response is `{"status": "success", "data": ...}` or
//! `{"status": "error", "error_type": ..., "message": ...}`.

use kite_core::error::{ErrorKind, KiteError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

const STATUS_SUCCESS: &str = "success";
const MAX_BODY_IN_ERROR: usize = 200;

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    error_type: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Decode a response body into `T` or the error it declares.
pub fn decode_envelope<T: DeserializeOwned>(http_status: u16, body: &[u8]) -> Result<T, KiteError> {
    let http_ok = (200..300).contains(&http_status);

    let envelope: RawEnvelope = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(e) if http_ok => {
            return Err(KiteError::Decode(format!("invalid response envelope: {}", e)));
        }
        Err(_) => {
            return Err(KiteError::Api {
                kind: ErrorKind::from_http_status(http_status),
                message: format!("HTTP {}: {}", http_status, body_snippet(body)),
            });
        }
    };

    if !http_ok || envelope.status != STATUS_SUCCESS {
        let kind = match envelope.error_type.as_deref() {
            Some(error_type) if !error_type.is_empty() => ErrorKind::from_error_type(error_type),
            _ => ErrorKind::from_http_status(http_status),
        };
        let message = envelope
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("request failed with HTTP {}", http_status));
        return Err(KiteError::Api { kind, message });
    }

    serde_json::from_value(envelope.data)
        .map_err(|e| KiteError::Decode(format!("unexpected response data: {}", e)))
}

fn body_snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    match text.char_indices().nth(MAX_BODY_IN_ERROR) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
