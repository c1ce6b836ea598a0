//! Mode arbiter: decides who drives the LED.
//!
//! ```text
//!              probe == Ready
//!   ┌────────┐ ─────────────▶ ┌────────────┐
//!   │ Manual │                │ Predictive │
//!   └────────┘ ◀───────────── └────────────┘
//!            probe == NotReady | Unreachable
//! ```
//!
//! Transitions happen only when an availability probe completes, and
//! probes are rate-limited by the [`AvailabilityTimer`].  Between probes
//! the last known mode is reused.
//!
//! The arbiter keeps two value slots:
//!
//! - **manual**: last value pushed from the dashboard, written in any mode;
//! - **applied**: the level the actuator is driven to.
//!
//! In `Manual` a push writes both.  In `Predictive` a push only writes the
//! manual slot; the pending value is loaded into `applied` when a probe
//! forces the arbiter back to `Manual`.  A failed prediction never touches
//! `applied`.

use crate::error::PredictionError;

use super::model::{Availability, Level, Mode};

// ───────────────────────────────────────────────────────────────
// Availability timer
// ───────────────────────────────────────────────────────────────

/// Staleness timer for the availability probe.
///
/// Measured from the *end* of the previous probe so a slow probe never
/// shortens the spacing.  The first probe is due immediately.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityTimer {
    interval_ms: u64,
    last_checked_ms: Option<u64>,
}

impl AvailabilityTimer {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_checked_ms: None,
        }
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        self.last_checked_ms
            .is_none_or(|last| now_ms.saturating_sub(last) >= self.interval_ms)
    }

    pub fn mark_checked(&mut self, now_ms: u64) {
        self.last_checked_ms = Some(now_ms);
    }

    pub fn last_checked_ms(&self) -> Option<u64> {
        self.last_checked_ms
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}

// ───────────────────────────────────────────────────────────────
// ModeArbiter
// ───────────────────────────────────────────────────────────────

/// Result of feeding a probe outcome to the arbiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
}

pub struct ModeArbiter {
    mode: Mode,
    manual: Level,
    applied: Level,
    timer: AvailabilityTimer,
}

impl ModeArbiter {
    /// Start in `Manual` with the output off.
    pub fn new(check_interval_ms: u64) -> Self {
        Self {
            mode: Mode::Manual,
            manual: Level::OFF,
            applied: Level::OFF,
            timer: AvailabilityTimer::new(check_interval_ms),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Level to drive the actuator to this cycle.
    pub fn level(&self) -> Level {
        self.applied
    }

    /// Last manually pushed value (pending while Predictive).
    pub fn manual_level(&self) -> Level {
        self.manual
    }

    pub fn timer(&self) -> &AvailabilityTimer {
        &self.timer
    }

    /// Whether a probe should be issued at `now_ms`.
    pub fn availability_check_due(&self, now_ms: u64) -> bool {
        self.timer.is_due(now_ms)
    }

    /// Whether this cycle should ask the service for a level.
    pub fn wants_prediction(&self) -> bool {
        self.mode == Mode::Predictive
    }

    // ── Writers ───────────────────────────────────────────────

    /// Accept a pushed manual value.  Returns `true` when it took effect
    /// on the applied level immediately.
    pub fn on_manual_push(&mut self, level: Level) -> bool {
        self.manual = level;
        if self.mode == Mode::Manual {
            self.applied = level;
            true
        } else {
            false
        }
    }

    /// Record a completed probe.  `now_ms` must be taken *after* the
    /// probe returned.
    pub fn on_availability(&mut self, outcome: Availability, now_ms: u64) -> Option<Transition> {
        self.timer.mark_checked(now_ms);

        let next = if outcome.is_ready() {
            Mode::Predictive
        } else {
            Mode::Manual
        };
        if next == self.mode {
            return None;
        }

        let from = self.mode;
        self.mode = next;
        if next == Mode::Manual {
            self.applied = self.manual;
        }
        Some(Transition { from, to: next })
    }

    /// Record a prediction result.  Ignored outside `Predictive`.
    pub fn on_prediction(&mut self, result: Result<Level, PredictionError>) {
        if self.mode != Mode::Predictive {
            return;
        }
        if let Ok(level) = result {
            self.applied = level;
        }
    }
}
