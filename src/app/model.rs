//! Domain value types shared by the ports and the arbiter.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Sensor reading (produced fresh every cycle)
// ---------------------------------------------------------------------------

/// A point-in-time sample of both inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorReading {
    /// Raw LDR ADC value (0 – 4095 on a 12-bit ADC).
    pub light_level: u16,
    /// PIR output: `true` while motion is detected.
    pub motion_detected: bool,
}

// ---------------------------------------------------------------------------
// Actuator level
// ---------------------------------------------------------------------------

/// LED brightness, 0 (off) – 255 (full).
///
/// The `u8` backing makes the device range a type-level guarantee: any
/// value that exists is applicable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Level(pub u8);

impl Level {
    /// Safe default: output off.
    pub const OFF: Self = Self(0);
    pub const MAX: Self = Self(u8::MAX);

    /// Strict conversion for externally pushed values.  `None` when out
    /// of range.
    pub fn checked(raw: i64) -> Option<Self> {
        u8::try_from(raw).ok().map(Self)
    }

    /// Saturating conversion for service responses.
    pub fn clamped(raw: i64) -> Self {
        Self(raw.clamp(0, u8::MAX as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl From<u8> for Level {
    fn from(v: u8) -> Self {
        Self(v)
    }
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Who drives the actuator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Mode {
    /// Level follows externally pushed manual values.
    #[default]
    Manual,
    /// Level follows the inference service.
    #[serde(rename = "AI")]
    Predictive,
}

impl Mode {
    /// Label used in the telemetry `mode` field.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Manual => "Manual",
            Self::Predictive => "AI",
        }
    }
}

// ---------------------------------------------------------------------------
// Availability probe outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// The service answered `ready`.
    Ready,
    /// The service answered, but not with `ready`.
    NotReady,
    /// No answer (transport error or timeout).
    Unreachable,
}

impl Availability {
    pub fn is_ready(self) -> bool {
        self == Self::Ready
    }
}
