//! Telemetry frame packaging.

use super::model::{Level, Mode, SensorReading};

/// Snapshot published once per cycle, after actuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryFrame {
    pub light_level: u16,
    pub motion_detected: bool,
    /// The level actually written to the actuator this cycle.
    pub level: Level,
    pub mode: Mode,
}

impl TelemetryFrame {
    pub fn build(reading: &SensorReading, mode: Mode, applied: Level) -> Self {
        Self {
            light_level: reading.light_level,
            motion_detected: reading.motion_detected,
            level: applied,
            mode,
        }
    }
}
