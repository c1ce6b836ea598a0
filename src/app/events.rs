//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::error::{CommsError, PredictionError};

use super::model::{Availability, Level, Mode};
use super::telemetry::TelemetryFrame;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started (carries initial mode and level).
    Started { mode: Mode, level: Level },

    /// A manual push was accepted into the manual slot.
    /// `applied` is false when Predictive mode keeps it pending.
    ManualLevelReceived { level: Level, applied: bool },

    /// An availability probe completed.
    AvailabilityChecked(Availability),

    /// The arbiter switched mode.
    ModeChanged { from: Mode, to: Mode },

    /// The prediction call failed; the previous level persists.
    PredictionFailed(PredictionError),

    /// The cloud session could not be (re-)established.
    ChannelDown(CommsError),

    /// Telemetry could not be published.
    PublishFailed(CommsError),

    /// Per-cycle snapshot of what was applied.
    Telemetry(TelemetryFrame),
}
