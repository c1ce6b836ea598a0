//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, LED, MQTT channel, inference client, clock)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! or sockets directly.
//!
//! Every network-facing call MUST be bounded by a timeout in the adapter;
//! the core treats a timeout exactly like an unreachable peer.

use crate::error::{CommsError, PredictionError};

use super::commands::AppCommand;
use super::model::{Availability, Level, SensorReading};
use super::telemetry::TelemetryFrame;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per cycle.
///
/// Infallible by contract.  Hardware read failures are absorbed by the
/// adapter (last good value is retained).
pub trait SensorPort {
    fn read(&mut self) -> SensorReading;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the illumination output.
pub trait ActuatorPort {
    /// Drive the output to `level`.  Idempotent, unconditional.
    fn apply(&mut self, level: Level);

    /// Level most recently applied.
    fn applied(&self) -> Level;
}

// ───────────────────────────────────────────────────────────────
// Prediction port (driven adapter: domain ↔ inference service)
// ───────────────────────────────────────────────────────────────

/// Request/response collaborator for the remote model.
///
/// Both calls block until the adapter's timeout at the latest.
pub trait PredictionPort {
    /// Cheap readiness probe.
    fn check_availability(&mut self) -> Availability;

    /// Ask for a level given the current reading.
    fn predict(&mut self, reading: &SensorReading) -> Result<Level, PredictionError>;
}

// ───────────────────────────────────────────────────────────────
// Attribute channel port (driven adapter: domain ↔ cloud)
// ───────────────────────────────────────────────────────────────

/// Bidirectional cloud channel: inbound manual pushes, outbound telemetry.
pub trait AttributePort {
    /// (Re-)establish the session if needed.  Called once per cycle while
    /// the network is up.
    fn ensure_connected(&mut self) -> Result<(), CommsError>;

    /// Non-blocking: next decoded inbound command in arrival order, or
    /// `None` when the inbox is drained.
    fn poll(&mut self) -> Option<AppCommand>;

    /// Send a telemetry frame.
    fn publish(&mut self, frame: &TelemetryFrame) -> Result<(), CommsError>;
}

// ───────────────────────────────────────────────────────────────
// Connectivity port (driven adapter: domain ↔ WiFi)
// ───────────────────────────────────────────────────────────────

/// Network association.  The core only uses [`is_connected`] to gate
/// network-dependent steps.
///
/// [`is_connected`]: ConnectivityPort::is_connected
pub trait ConnectivityPort {
    /// Associate and wait for an IP (blocking).
    fn connect(&mut self) -> Result<(), CommsError>;
    fn is_connected(&self) -> bool;
    /// Drive reconnection.  `now_ms` is monotonic uptime.
    fn poll(&mut self, now_ms: u64);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic milliseconds since boot.
pub trait ClockPort {
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
