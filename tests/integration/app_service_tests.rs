//! Integration tests for the AppService → ModeArbiter → actuator pipeline.
//!
//! These run on the host and drive whole control cycles against the
//! mocks in `mock_hw`.

use ailed::app::events::AppEvent;
use ailed::app::model::{Availability, Level, Mode, SensorReading};
use ailed::app::service::{AppService, CycleReport};
use ailed::config::SystemConfig;
use ailed::error::{CommsError, PredictionError};
use ailed::wire;

use crate::mock_hw::{MockChannel, MockClock, MockHardware, MockNet, MockPredictor, RecordingSink};

const CYCLE_MS: u64 = 2_000;

struct Rig {
    app: AppService,
    hw: MockHardware,
    net: MockNet,
    predictor: MockPredictor,
    channel: MockChannel,
    clock: MockClock,
    sink: RecordingSink,
}

impl Rig {
    fn new(predictor: MockPredictor) -> Self {
        let mut rig = Self {
            app: AppService::new(SystemConfig::default()),
            hw: MockHardware::new(SensorReading {
                light_level: 800,
                motion_detected: true,
            }),
            net: MockNet { up: true },
            predictor,
            channel: MockChannel::default(),
            clock: MockClock::default(),
            sink: RecordingSink::default(),
        };
        rig.app.start(&mut rig.hw, &mut rig.sink);
        rig
    }

    fn tick(&mut self) -> CycleReport {
        self.app.tick(
            &mut self.hw,
            &self.net,
            &mut self.predictor,
            &mut self.channel,
            &self.clock,
            &mut self.sink,
        )
    }

    /// Advance one cycle period, then run a cycle.
    fn step(&mut self) -> CycleReport {
        self.clock.advance(CYCLE_MS);
        self.tick()
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_drives_output_off_in_manual() {
    let rig = Rig::new(MockPredictor::new(Availability::NotReady));
    assert_eq!(rig.app.mode(), Mode::Manual);
    assert_eq!(rig.hw.applied, [Level::OFF]);
    assert!(matches!(
        rig.sink.events[0],
        AppEvent::Started {
            mode: Mode::Manual,
            level: Level::OFF
        }
    ));
}

// ── Scenario 1: Ready → prediction drives the LED ────────────

#[test]
fn ready_service_prediction_is_applied_and_published() {
    let mut rig = Rig::new(MockPredictor::ready_with(200));
    let report = rig.tick();

    assert!(report.probed && report.predicted && report.published);
    assert_eq!(rig.app.mode(), Mode::Predictive);
    assert_eq!(rig.hw.last_applied(), Some(Level(200)));
    assert_eq!(
        rig.predictor.requests,
        [SensorReading {
            light_level: 800,
            motion_detected: true
        }]
    );

    let frame = rig.channel.published[0];
    let json = String::from_utf8(wire::telemetry::encode(&frame).unwrap()).unwrap();
    assert_eq!(json, r#"{"ldr":800,"motion":1,"led":200,"mode":"AI"}"#);
}

// ── Scenario 2: NotReady → manual value applies ──────────────

#[test]
fn not_ready_service_applies_previous_manual_push() {
    let mut rig = Rig::new(MockPredictor::new(Availability::NotReady));
    rig.channel.push_manual(50);
    rig.tick();

    assert_eq!(rig.app.mode(), Mode::Manual);
    assert_eq!(rig.hw.last_applied(), Some(Level(50)));
    assert_eq!(rig.predictor.requests.len(), 0);
}

#[test]
fn losing_the_model_restores_manual_value() {
    let mut rig = Rig::new(MockPredictor::ready_with(180));
    rig.channel.push_manual(50);
    rig.tick();
    assert_eq!(rig.app.mode(), Mode::Predictive);
    assert_eq!(rig.hw.last_applied(), Some(Level(180)));

    rig.predictor.availability = Availability::NotReady;
    rig.clock.set(30_000);
    rig.tick();

    assert_eq!(rig.app.mode(), Mode::Manual);
    assert_eq!(rig.hw.last_applied(), Some(Level(50)));
}

#[test]
fn unreachable_probe_degrades_like_not_ready() {
    let mut rig = Rig::new(MockPredictor::ready_with(90));
    rig.tick();
    rig.predictor.availability = Availability::Unreachable;
    rig.clock.set(30_000);
    rig.tick();

    assert_eq!(rig.app.mode(), Mode::Manual);
    // No manual push yet: the manual slot holds the safe default.
    assert_eq!(rig.hw.last_applied(), Some(Level::OFF));
}

// ── Scenario 3: prediction failure holds the level ───────────

#[test]
fn failed_prediction_keeps_previous_level_and_mode() {
    let mut rig = Rig::new(MockPredictor::ready_with(200));
    rig.tick();

    rig.predictor.prediction = Err(PredictionError::Unreachable);
    for _ in 0..5 {
        let report = rig.step();
        assert!(report.predicted);
        assert!(!report.probed);
        assert_eq!(rig.app.mode(), Mode::Predictive);
        assert_eq!(rig.hw.last_applied(), Some(Level(200)));
    }
    assert!(
        rig.sink
            .events
            .iter()
            .any(|e| matches!(e, AppEvent::PredictionFailed(PredictionError::Unreachable)))
    );

    rig.predictor.prediction = Err(PredictionError::HttpStatus(500));
    rig.step();
    assert_eq!(rig.hw.last_applied(), Some(Level(200)));
}

// ── Scenario 4: manual push during Predictive stays pending ──

#[test]
fn manual_push_while_predictive_is_deferred() {
    let mut rig = Rig::new(MockPredictor::ready_with(200));
    rig.tick();

    rig.channel.push_manual(50);
    rig.step();

    assert_eq!(rig.app.mode(), Mode::Predictive);
    assert_eq!(rig.app.manual_level(), Level(50));
    assert_eq!(rig.hw.last_applied(), Some(Level(200)));
    assert!(rig.sink.events.iter().any(|e| matches!(
        e,
        AppEvent::ManualLevelReceived {
            level: Level(50),
            applied: false
        }
    )));

    rig.predictor.availability = Availability::NotReady;
    rig.clock.set(30_000);
    rig.tick();
    assert_eq!(rig.app.mode(), Mode::Manual);
    assert_eq!(rig.hw.last_applied(), Some(Level(50)));
}

#[test]
fn latest_manual_push_wins() {
    let mut rig = Rig::new(MockPredictor::new(Availability::NotReady));
    rig.channel.push_manual(10);
    rig.channel.push_manual(20);
    rig.channel.push_manual(30);
    rig.tick();
    assert_eq!(rig.hw.last_applied(), Some(Level(30)));

    rig.step();
    assert_eq!(rig.hw.last_applied(), Some(Level(30)));
}

// ── Availability rate limit ──────────────────────────────────

#[test]
fn availability_is_probed_once_per_interval() {
    let mut rig = Rig::new(MockPredictor::ready_with(100));
    // 0 s … 100 s at 2 s cycles.
    rig.tick();
    for _ in 0..50 {
        rig.step();
    }
    // Probes at 0, 30, 60 and 90 s.
    assert_eq!(rig.predictor.checks, 4);
    assert_eq!(rig.predictor.requests.len(), 51);
}

#[test]
fn interval_runs_from_end_of_probe() {
    let mut rig = Rig::new(MockPredictor::ready_with(100));
    rig.predictor.clock = Some(rig.clock.clone());
    rig.predictor.probe_latency_ms = 1_500;

    rig.tick(); // probe finishes at 1.5 s
    assert_eq!(rig.app.arbiter().timer().last_checked_ms(), Some(1_500));

    rig.clock.set(30_000);
    assert!(!rig.tick().probed);
    rig.clock.set(31_500);
    assert!(rig.tick().probed);
}

#[test]
fn repeated_ready_does_not_re_announce_mode() {
    let mut rig = Rig::new(MockPredictor::ready_with(100));
    rig.tick();
    rig.clock.set(30_000);
    rig.tick();
    rig.clock.set(60_000);
    rig.tick();
    assert_eq!(rig.predictor.checks, 3);
    assert_eq!(rig.sink.mode_changes(), 1);
}

// ── Offline operation ────────────────────────────────────────

#[test]
fn offline_cycle_skips_network_steps() {
    let mut rig = Rig::new(MockPredictor::ready_with(200));
    rig.net.up = false;
    rig.channel.push_manual(70);

    let report = rig.tick();
    assert!(!report.probed && !report.predicted && !report.published);
    assert_eq!(rig.predictor.checks, 0);
    assert_eq!(rig.channel.sessions, 0);
    assert!(rig.channel.published.is_empty());
    // Queued pushes still apply, and the cycle still reports locally.
    assert_eq!(rig.hw.last_applied(), Some(Level(70)));
    assert_eq!(rig.sink.telemetry().len(), 1);
}

#[test]
fn predictive_mode_holds_level_while_offline() {
    let mut rig = Rig::new(MockPredictor::ready_with(200));
    rig.tick();
    rig.net.up = false;
    rig.clock.set(60_000);
    rig.tick();

    assert_eq!(rig.app.mode(), Mode::Predictive);
    assert_eq!(rig.hw.last_applied(), Some(Level(200)));
    assert_eq!(rig.predictor.checks, 1);
}

// ── Channel failures ─────────────────────────────────────────

#[test]
fn refused_session_requests_backoff_and_skips_publish() {
    let mut rig = Rig::new(MockPredictor::ready_with(200));
    rig.channel.refuse_session = true;

    let report = rig.tick();
    assert!(report.channel_down);
    assert!(!report.published);
    // The inference path is independent of the MQTT session.
    assert_eq!(rig.hw.last_applied(), Some(Level(200)));
    assert!(rig.sink.events.iter().any(|e| matches!(
        e,
        AppEvent::ChannelDown(CommsError::MqttConnectFailed)
    )));
}

#[test]
fn publish_failure_is_reported() {
    let mut rig = Rig::new(MockPredictor::new(Availability::NotReady));
    rig.channel.fail_publish = true;

    let report = rig.tick();
    assert!(!report.published);
    assert!(!report.channel_down);
    assert!(rig.sink.events.iter().any(|e| matches!(
        e,
        AppEvent::PublishFailed(CommsError::MqttPublishFailed)
    )));
}

// ── Telemetry consistency ────────────────────────────────────

#[test]
fn every_frame_reports_the_level_applied_that_cycle() {
    let mut rig = Rig::new(MockPredictor::ready_with(140));
    rig.tick();
    rig.channel.push_manual(33);
    rig.step();
    rig.predictor.prediction = Err(PredictionError::MalformedResponse);
    rig.step();
    rig.predictor.availability = Availability::NotReady;
    rig.clock.set(40_000);
    rig.tick();
    rig.channel.push_manual(99);
    rig.step();

    let frames = rig.sink.telemetry();
    assert_eq!(frames.len(), 5);
    // applied[0] is the start-up write.
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(frame.level, rig.hw.applied[i + 1], "cycle {i}");
    }
    assert_eq!(rig.sink.telemetry(), rig.channel.published);
    assert_eq!(frames.last().map(|f| (f.mode, f.level)), Some((Mode::Manual, Level(99))));
}
