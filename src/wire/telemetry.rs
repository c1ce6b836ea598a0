//! Telemetry payload.
//!
//! ```json
//! {"ldr": 800, "motion": 1, "led": 200, "mode": "AI"}
//! ```

use serde::Serialize;

use crate::app::model::Mode;
use crate::app::telemetry::TelemetryFrame;
use crate::error::CodecError;

#[derive(Debug, Serialize)]
struct TelemetryPayload {
    ldr: u16,
    motion: u8,
    led: u8,
    mode: Mode,
}

impl From<&TelemetryFrame> for TelemetryPayload {
    fn from(f: &TelemetryFrame) -> Self {
        Self {
            ldr: f.light_level,
            motion: super::flag(f.motion_detected),
            led: f.level.get(),
            mode: f.mode,
        }
    }
}

pub fn encode(frame: &TelemetryFrame) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(&TelemetryPayload::from(frame)).map_err(|_| CodecError::EncodeFailed)
}
