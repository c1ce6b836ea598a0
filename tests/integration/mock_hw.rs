//! Mock adapters for integration tests.
//!
//! Every mock records what the service asked of it so tests can assert on
//! the full call history without real GPIO, PWM or sockets.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use ailed::app::commands::AppCommand;
use ailed::app::events::AppEvent;
use ailed::app::model::{Availability, Level, SensorReading};
use ailed::app::ports::{
    ActuatorPort, AttributePort, ClockPort, ConnectivityPort, EventSink, PredictionPort,
    SensorPort,
};
use ailed::app::telemetry::TelemetryFrame;
use ailed::error::{CommsError, PredictionError};

// ── MockHardware ──────────────────────────────────────────────

/// Sensor source + actuator.  `applied` holds every level written, in
/// order.
pub struct MockHardware {
    pub reading: SensorReading,
    pub applied: Vec<Level>,
}

impl MockHardware {
    pub fn new(reading: SensorReading) -> Self {
        Self {
            reading,
            applied: Vec::new(),
        }
    }

    pub fn last_applied(&self) -> Option<Level> {
        self.applied.last().copied()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new(SensorReading::default())
    }
}

impl SensorPort for MockHardware {
    fn read(&mut self) -> SensorReading {
        self.reading
    }
}

impl ActuatorPort for MockHardware {
    fn apply(&mut self, level: Level) {
        self.applied.push(level);
    }

    fn applied(&self) -> Level {
        self.last_applied().unwrap_or(Level::OFF)
    }
}

// ── MockClock ─────────────────────────────────────────────────

/// Shared, manually advanced clock.  Clones see the same time.
#[derive(Clone, Default)]
pub struct MockClock(Rc<Cell<u64>>);

impl MockClock {
    pub fn set(&self, ms: u64) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

impl ClockPort for MockClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

// ── MockNet ───────────────────────────────────────────────────

pub struct MockNet {
    pub up: bool,
}

impl ConnectivityPort for MockNet {
    fn connect(&mut self) -> Result<(), CommsError> {
        self.up = true;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.up
    }

    fn poll(&mut self, _now_ms: u64) {}
}

// ── MockPredictor ─────────────────────────────────────────────

/// Scripted inference service.  `availability` and `prediction` are
/// returned on every call until changed.
pub struct MockPredictor {
    pub availability: Availability,
    pub prediction: Result<Level, PredictionError>,
    pub checks: u32,
    pub requests: Vec<SensorReading>,
    /// Simulated probe duration, applied to `clock` when set.
    pub probe_latency_ms: u64,
    pub clock: Option<MockClock>,
}

impl MockPredictor {
    pub fn new(availability: Availability) -> Self {
        Self {
            availability,
            prediction: Err(PredictionError::Unreachable),
            checks: 0,
            requests: Vec::new(),
            probe_latency_ms: 0,
            clock: None,
        }
    }

    pub fn ready_with(level: u8) -> Self {
        let mut p = Self::new(Availability::Ready);
        p.prediction = Ok(Level(level));
        p
    }
}

impl PredictionPort for MockPredictor {
    fn check_availability(&mut self) -> Availability {
        self.checks += 1;
        if let Some(clock) = &self.clock {
            clock.advance(self.probe_latency_ms);
        }
        self.availability
    }

    fn predict(&mut self, reading: &SensorReading) -> Result<Level, PredictionError> {
        self.requests.push(*reading);
        self.prediction
    }
}

// ── MockChannel ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockChannel {
    pub inbox: VecDeque<AppCommand>,
    pub published: Vec<TelemetryFrame>,
    pub refuse_session: bool,
    pub fail_publish: bool,
    pub sessions: u32,
}

impl MockChannel {
    pub fn push_manual(&mut self, level: u8) {
        self.inbox.push_back(AppCommand::SetManualLevel(Level(level)));
    }
}

impl AttributePort for MockChannel {
    fn ensure_connected(&mut self) -> Result<(), CommsError> {
        if self.refuse_session {
            return Err(CommsError::MqttConnectFailed);
        }
        self.sessions += 1;
        Ok(())
    }

    fn poll(&mut self) -> Option<AppCommand> {
        self.inbox.pop_front()
    }

    fn publish(&mut self, frame: &TelemetryFrame) -> Result<(), CommsError> {
        if self.fail_publish {
            return Err(CommsError::MqttPublishFailed);
        }
        self.published.push(*frame);
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn mode_changes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::ModeChanged { .. }))
            .count()
    }

    pub fn telemetry(&self) -> Vec<TelemetryFrame> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Telemetry(t) => Some(*t),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
