//! Shared-attribute payloads (manual LED value).
//!
//! Two shapes carry the value:
//!
//! ```json
//! {"shared": {"led": 50}}     // reply to a shared-attribute request
//! {"led": 50}                 // attribute-update push
//! ```
//!
//! The nested form wins when both are present, and the losing value is
//! not inspected.  Whole-number floats (`50.0`) are accepted.  Unknown keys
//! are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::app::model::Level;
use crate::error::CodecError;

/// Attribute key holding the manual value.
pub const LED_KEY: &str = "led";

#[derive(Debug, Deserialize)]
struct AttributeMessage {
    #[serde(default)]
    shared: Option<Value>,
    #[serde(default)]
    led: Option<Value>,
}

#[derive(Debug, Serialize)]
struct SharedKeysRequest<'a> {
    #[serde(rename = "sharedKeys")]
    shared_keys: &'a str,
}

/// Decode a manual push.  Values outside 0–255 are rejected rather than
/// clamped.
pub fn decode_manual_level(payload: &[u8]) -> Result<Level, CodecError> {
    let msg: AttributeMessage =
        serde_json::from_slice(payload).map_err(|_| CodecError::InvalidJson)?;

    let value = msg
        .shared
        .as_ref()
        .and_then(|s| s.get(LED_KEY))
        .filter(|v| !v.is_null())
        .or(msg.led.as_ref())
        .ok_or(CodecError::MissingField(LED_KEY))?;

    let raw = integer(value)?;
    Level::checked(raw).ok_or(CodecError::OutOfRange(raw))
}

fn integer(value: &Value) -> Result<i64, CodecError> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 => Ok(f as i64),
        _ => Err(CodecError::InvalidJson),
    }
}

/// Body of the request asking the server for the current shared `led`.
pub fn encode_shared_request() -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(&SharedKeysRequest {
        shared_keys: LED_KEY,
    })
    .map_err(|_| CodecError::EncodeFailed)
}
