//! Unified error types for the AiLed firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping
//! the control loop's error handling uniform.  All variants are `Copy` so
//! they can be passed through the arbiter and event sink without
//! allocation.  None of them is fatal: every path has a degraded
//! behaviour (see [`AppService`](crate::app::service::AppService)).

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read.
    Sensor(SensorError),
    /// Network, MQTT or HTTP transport failed.
    Comms(CommsError),
    /// A wire payload could not be encoded or decoded.
    Codec(CodecError),
    /// The inference service did not yield a prediction.
    Prediction(PredictionError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Comms(e) => write!(f, "comms: {e}"),
            Self::Codec(e) => write!(f, "codec: {e}"),
            Self::Prediction(e) => write!(f, "prediction: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// ADC read returned an error or timed out.
    AdcReadFailed,
    /// GPIO read returned an error.
    GpioReadFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcReadFailed => write!(f, "ADC read failed"),
            Self::GpioReadFailed => write!(f, "GPIO read failed"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Communications errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommsError {
    WifiConnectFailed,
    WifiDisconnected,
    MqttConnectFailed,
    MqttNotConnected,
    MqttSubscribeFailed,
    MqttPublishFailed,
    HttpRequestFailed,
    /// Response body exceeded the receive buffer.
    HttpBodyTooLarge,
}

impl fmt::Display for CommsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WifiConnectFailed => write!(f, "WiFi connect failed"),
            Self::WifiDisconnected => write!(f, "WiFi disconnected"),
            Self::MqttConnectFailed => write!(f, "MQTT connect failed"),
            Self::MqttNotConnected => write!(f, "MQTT session not established"),
            Self::MqttSubscribeFailed => write!(f, "MQTT subscribe failed"),
            Self::MqttPublishFailed => write!(f, "MQTT publish failed"),
            Self::HttpRequestFailed => write!(f, "HTTP request failed"),
            Self::HttpBodyTooLarge => write!(f, "HTTP response body too large"),
        }
    }
}

impl From<CommsError> for Error {
    fn from(e: CommsError) -> Self {
        Self::Comms(e)
    }
}

// ---------------------------------------------------------------------------
// Codec errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// Payload is not valid JSON or does not match the expected shape.
    InvalidJson,
    /// The expected key is absent.
    MissingField(&'static str),
    /// A numeric value is outside the accepted range.
    OutOfRange(i64),
    /// Serialisation failed.
    EncodeFailed,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson => write!(f, "invalid JSON payload"),
            Self::MissingField(key) => write!(f, "missing field '{key}'"),
            Self::OutOfRange(v) => write!(f, "value {v} out of range"),
            Self::EncodeFailed => write!(f, "encode failed"),
        }
    }
}

impl From<CodecError> for Error {
    fn from(e: CodecError) -> Self {
        Self::Codec(e)
    }
}

// ---------------------------------------------------------------------------
// Prediction errors
// ---------------------------------------------------------------------------

/// Every variant is treated as "unreachable" by the arbiter: the last
/// applied level persists until the next availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionError {
    /// Transport failure or timeout.
    Unreachable,
    /// The service answered with a non-200 status (404 = model not loaded).
    HttpStatus(u16),
    /// The response body did not decode.
    MalformedResponse,
}

impl fmt::Display for PredictionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable => write!(f, "service unreachable"),
            Self::HttpStatus(code) => write!(f, "HTTP status {code}"),
            Self::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

impl From<PredictionError> for Error {
    fn from(e: PredictionError) -> Self {
        Self::Prediction(e)
    }
}

impl From<CommsError> for PredictionError {
    fn from(_: CommsError) -> Self {
        Self::Unreachable
    }
}

impl From<CodecError> for PredictionError {
    fn from(_: CodecError) -> Self {
        Self::MalformedResponse
    }
}

impl std::error::Error for Error {}
impl std::error::Error for SensorError {}
impl std::error::Error for CommsError {}
impl std::error::Error for CodecError {}
impl std::error::Error for PredictionError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
