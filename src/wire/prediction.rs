//! Inference-server payloads.
//!
//! ```text
//! GET  /status   → "ready" (200) | "not_ready" (404)
//! POST /predict  {"ldr": 800, "motion": 1} → {"led": 200}
//! ```

use serde::{Deserialize, Serialize};

use crate::app::model::{Level, SensorReading};
use crate::error::CodecError;

/// Literal body signalling a loaded model.
pub const READY_BODY: &[u8] = b"ready";

#[derive(Debug, Serialize)]
struct PredictionRequest {
    ldr: u16,
    motion: u8,
}

#[derive(Debug, Deserialize)]
struct PredictionResponse {
    led: i64,
}

pub fn encode_request(reading: &SensorReading) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(&PredictionRequest {
        ldr: reading.light_level,
        motion: super::flag(reading.motion_detected),
    })
    .map_err(|_| CodecError::EncodeFailed)
}

/// Decode `{"led": n}`, clamping into 0–255 like the server does.
pub fn decode_response(body: &[u8]) -> Result<Level, CodecError> {
    let resp: PredictionResponse =
        serde_json::from_slice(body).map_err(|_| CodecError::InvalidJson)?;
    Ok(Level::clamped(resp.led))
}

/// `true` only for the literal `ready` body (surrounding whitespace ignored).
pub fn is_ready(body: &[u8]) -> bool {
    body.trim_ascii() == READY_BODY
}
