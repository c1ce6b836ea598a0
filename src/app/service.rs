//! Application service, the hexagonal core.
//!
//! [`AppService`] owns the [`ModeArbiter`] and runs one control cycle per
//! [`tick`](AppService::tick).  All I/O flows through port traits
//! injected at call sites, making the entire service testable with mock
//! adapters.
//!
//! ```text
//!  AttributePort ─poll─▶ ┌──────────────────────┐ ──▶ EventSink
//!  SensorPort ─────────▶ │      AppService      │
//!  PredictionPort ◀────▶ │     ModeArbiter      │
//!  ActuatorPort ◀─────── │                      │ ─publish─▶ AttributePort
//!                        └──────────────────────┘
//! ```
//!
//! Cycle order is fixed: drain inbox → sample → (probe) → (predict) →
//! actuate → publish.  Network steps are skipped while WiFi is down.

use log::{debug, info, warn};

use crate::config::SystemConfig;

use super::arbiter::ModeArbiter;
use super::commands::AppCommand;
use super::events::AppEvent;
use super::model::{Level, Mode};
use super::ports::{
    ActuatorPort, AttributePort, ClockPort, ConnectivityPort, EventSink, PredictionPort,
    SensorPort,
};
use super::telemetry::TelemetryFrame;

// ───────────────────────────────────────────────────────────────
// Cycle report
// ───────────────────────────────────────────────────────────────

/// What happened during one [`AppService::tick`].
#[derive(Debug, Clone, Copy)]
pub struct CycleReport {
    /// The frame built after actuation (published if online).
    pub frame: TelemetryFrame,
    /// An availability probe was issued this cycle.
    pub probed: bool,
    /// A prediction was requested this cycle.
    pub predicted: bool,
    /// Telemetry reached the channel.
    pub published: bool,
    /// The cloud session is down; the caller should back off before the
    /// next cycle.
    pub channel_down: bool,
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    arbiter: ModeArbiter,
    config: SystemConfig,
    cycle_count: u64,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** announce itself; call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Self {
        let arbiter = ModeArbiter::new(config.availability_check_interval_ms as u64);
        Self {
            arbiter,
            config,
            cycle_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive the output to its safe default and announce the initial state.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.apply(self.arbiter.level());
        sink.emit(&AppEvent::Started {
            mode: self.arbiter.mode(),
            level: self.arbiter.level(),
        });
        info!(
            "AppService started in {:?} (probe every {} ms)",
            self.arbiter.mode(),
            self.config.availability_check_interval_ms
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full control cycle.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`] so one mutable borrow covers both.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        net: &impl ConnectivityPort,
        predictor: &mut impl PredictionPort,
        channel: &mut impl AttributePort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> CycleReport {
        self.cycle_count += 1;
        let online = net.is_connected();
        let mut channel_down = false;

        // 1. Session upkeep + drain pending manual pushes.
        if online {
            if let Err(e) = channel.ensure_connected() {
                warn!("Attribute channel down: {}", e);
                sink.emit(&AppEvent::ChannelDown(e));
                channel_down = true;
            }
        }
        while let Some(cmd) = channel.poll() {
            self.handle_command(cmd, sink);
        }

        // 2. Sample.
        let reading = hw.read();

        // 3. Availability probe, rate-limited by the staleness timer.
        let mut probed = false;
        if online && self.arbiter.availability_check_due(clock.now_ms()) {
            let outcome = predictor.check_availability();
            probed = true;
            sink.emit(&AppEvent::AvailabilityChecked(outcome));
            if let Some(t) = self.arbiter.on_availability(outcome, clock.now_ms()) {
                info!("Mode {:?} -> {:?} (probe: {:?})", t.from, t.to, outcome);
                sink.emit(&AppEvent::ModeChanged {
                    from: t.from,
                    to: t.to,
                });
            }
        }

        // 4. Prediction while Predictive.
        let mut predicted = false;
        if online && self.arbiter.wants_prediction() {
            let result = predictor.predict(&reading);
            predicted = true;
            if let Err(e) = result {
                warn!("Prediction failed ({}), holding level {}", e, self.arbiter.level().get());
                sink.emit(&AppEvent::PredictionFailed(e));
            }
            self.arbiter.on_prediction(result);
        }

        // 5. Actuate.
        let level = self.arbiter.level();
        hw.apply(level);

        // 6. Publish what was actually applied.
        let frame = TelemetryFrame::build(&reading, self.arbiter.mode(), hw.applied());
        let mut published = false;
        if online && !channel_down {
            match channel.publish(&frame) {
                Ok(()) => published = true,
                Err(e) => {
                    warn!("Telemetry publish failed: {}", e);
                    sink.emit(&AppEvent::PublishFailed(e));
                }
            }
        }
        sink.emit(&AppEvent::Telemetry(frame));

        debug!(
            "cycle {}: online={} probed={} predicted={} level={}",
            self.cycle_count,
            online,
            probed,
            predicted,
            level.get()
        );

        CycleReport {
            frame,
            probed,
            predicted,
            published,
            channel_down,
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an inbound command from the attribute channel.
    pub fn handle_command(&mut self, cmd: AppCommand, sink: &mut impl EventSink) {
        match cmd {
            AppCommand::SetManualLevel(level) => {
                let applied = self.arbiter.on_manual_push(level);
                if applied {
                    info!("Manual level {} applied", level.get());
                } else {
                    info!("Manual level {} held (mode {:?})", level.get(), self.arbiter.mode());
                }
                sink.emit(&AppEvent::ManualLevelReceived { level, applied });
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.arbiter.mode()
    }

    /// Level the actuator is driven to.
    pub fn level(&self) -> Level {
        self.arbiter.level()
    }

    pub fn manual_level(&self) -> Level {
        self.arbiter.manual_level()
    }

    /// Control cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn arbiter(&self) -> &ModeArbiter {
        &self.arbiter
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }
}
