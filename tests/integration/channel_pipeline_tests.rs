//! End-to-end cycles through the real network adapters.
//!
//! `ThingsBoardChannel` and `HttpPredictionService` run unmodified on top
//! of in-memory MQTT and HTTP fakes, so the JSON that would cross the wire
//! is asserted byte for byte.

use std::collections::{HashMap, VecDeque};

use ailed::adapters::http::{HttpExchange, HttpResponse};
use ailed::adapters::inbox::{self, InboundMessage, InboxConsumer, InboxProducer};
use ailed::adapters::mqtt::MqttTransport;
use ailed::adapters::prediction::HttpPredictionService;
use ailed::adapters::thingsboard::ThingsBoardChannel;
use ailed::app::model::{Level, Mode, SensorReading};
use ailed::app::service::AppService;
use ailed::config::SystemConfig;
use ailed::error::CommsError;

use crate::mock_hw::{MockClock, MockHardware, MockNet, RecordingSink};

// ── Fake broker ───────────────────────────────────────────────

struct LoopbackMqtt {
    up: bool,
    subscriptions: Vec<String>,
    outbound: Vec<(String, String)>,
    rx: InboxConsumer,
}

impl LoopbackMqtt {
    fn new() -> (Self, InboxProducer) {
        let (tx, rx) = inbox::inbox();
        let t = Self {
            up: false,
            subscriptions: Vec::new(),
            outbound: Vec::new(),
            rx,
        };
        (t, tx)
    }

    fn sent_on(&self, topic: &str) -> Vec<&str> {
        self.outbound
            .iter()
            .filter(|(t, _)| t == topic)
            .map(|(_, p)| p.as_str())
            .collect()
    }
}

impl MqttTransport for LoopbackMqtt {
    fn connect(&mut self, _client_id: &str, _credential: &str) -> Result<(), CommsError> {
        self.up = true;
        Ok(())
    }
    fn is_connected(&self) -> bool {
        self.up
    }
    fn subscribe(&mut self, topic: &str) -> Result<(), CommsError> {
        self.subscriptions.push(topic.into());
        Ok(())
    }
    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), CommsError> {
        self.outbound
            .push((topic.into(), String::from_utf8_lossy(payload).into_owned()));
        Ok(())
    }
    fn try_recv(&mut self) -> Option<InboundMessage> {
        self.rx.dequeue()
    }
}

// ── Fake inference server ─────────────────────────────────────

#[derive(Default)]
struct ScriptedHttp {
    routes: HashMap<String, VecDeque<Result<HttpResponse, CommsError>>>,
    posted: Vec<String>,
}

impl ScriptedHttp {
    fn on(&mut self, url: &str, status: u16, body: &str) {
        self.routes.entry(url.into()).or_default().push_back(Ok(HttpResponse {
            status,
            body: body.as_bytes().to_vec(),
        }));
    }

    fn next(&mut self, url: &str) -> Result<HttpResponse, CommsError> {
        self.routes
            .get_mut(url)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Err(CommsError::HttpRequestFailed))
    }
}

impl HttpExchange for ScriptedHttp {
    fn get(&mut self, url: &str) -> Result<HttpResponse, CommsError> {
        self.next(url)
    }
    fn post_json(&mut self, url: &str, body: &[u8]) -> Result<HttpResponse, CommsError> {
        self.posted.push(String::from_utf8_lossy(body).into_owned());
        self.next(url)
    }
}

const STATUS: &str = "http://192.168.1.100:5000/status";
const PREDICT: &str = "http://192.168.1.100:5000/predict";
const TELEMETRY: &str = "v1/devices/me/telemetry";

fn config() -> SystemConfig {
    let mut c = SystemConfig::default();
    c.network.prediction_base_url = "http://192.168.1.100:5000".into();
    c
}

#[test]
fn shared_attribute_reply_then_model_takeover() {
    let cfg = config();
    let (mqtt, mut broker_tx) = LoopbackMqtt::new();
    let mut channel = ThingsBoardChannel::new(mqtt, &cfg.network);

    let mut http = ScriptedHttp::default();
    http.on(STATUS, 404, "not_ready");
    let mut predictor = HttpPredictionService::new(http, &cfg.network);

    let mut app = AppService::new(cfg);
    let mut hw = MockHardware::new(SensorReading {
        light_level: 800,
        motion_detected: true,
    });
    let net = MockNet { up: true };
    let clock = MockClock::default();
    let mut sink = RecordingSink::default();
    app.start(&mut hw, &mut sink);

    // Cycle 1: session opens, model not loaded.
    app.tick(&mut hw, &net, &mut predictor, &mut channel, &clock, &mut sink);
    assert!(channel.session_ready());
    assert_eq!(
        channel.transport().sent_on("v1/devices/me/attributes/request/1"),
        [r#"{"sharedKeys":"led"}"#]
    );
    assert_eq!(
        channel.transport().sent_on(TELEMETRY),
        [r#"{"ldr":800,"motion":1,"led":0,"mode":"Manual"}"#]
    );

    // The server answers the shared-attribute request.
    assert!(inbox::deliver(
        &mut broker_tx,
        "v1/devices/me/attributes/response/1",
        br#"{"shared":{"led":50}}"#
    ));
    clock.advance(2_000);
    app.tick(&mut hw, &net, &mut predictor, &mut channel, &clock, &mut sink);
    assert_eq!(hw.last_applied(), Some(Level(50)));

    // Model comes up at the next probe.
    predictor_routes(&mut predictor, |h| {
        h.on(STATUS, 200, "ready");
        h.on(PREDICT, 200, r#"{"led":200}"#);
    });
    clock.set(30_000);
    app.tick(&mut hw, &net, &mut predictor, &mut channel, &clock, &mut sink);

    assert_eq!(app.mode(), Mode::Predictive);
    assert_eq!(hw.last_applied(), Some(Level(200)));
    assert_eq!(predictor.http().posted, [r#"{"ldr":800,"motion":1}"#]);
    assert_eq!(
        channel.transport().sent_on(TELEMETRY).last().copied(),
        Some(r#"{"ldr":800,"motion":1,"led":200,"mode":"AI"}"#)
    );

    // Inference server vanishes: level holds until the next probe.
    clock.advance(2_000);
    app.tick(&mut hw, &net, &mut predictor, &mut channel, &clock, &mut sink);
    assert_eq!(app.mode(), Mode::Predictive);
    assert_eq!(hw.last_applied(), Some(Level(200)));

    clock.set(60_000);
    app.tick(&mut hw, &net, &mut predictor, &mut channel, &clock, &mut sink);
    assert_eq!(app.mode(), Mode::Manual);
    assert_eq!(hw.last_applied(), Some(Level(50)));
}

#[test]
fn reconnect_re_requests_shared_value() {
    let cfg = config();
    let (mqtt, _broker_tx) = LoopbackMqtt::new();
    let mut channel = ThingsBoardChannel::new(mqtt, &cfg.network);
    let mut predictor = HttpPredictionService::new(ScriptedHttp::default(), &cfg.network);
    let mut app = AppService::new(cfg);
    let mut hw = MockHardware::default();
    let net = MockNet { up: true };
    let clock = MockClock::default();
    let mut sink = RecordingSink::default();

    app.tick(&mut hw, &net, &mut predictor, &mut channel, &clock, &mut sink);
    channel.transport_mut().up = false;
    clock.advance(2_000);
    app.tick(&mut hw, &net, &mut predictor, &mut channel, &clock, &mut sink);

    let requests = channel
        .transport()
        .sent_on("v1/devices/me/attributes/request/1")
        .len();
    assert_eq!(requests, 2);
    assert_eq!(channel.transport().subscriptions.len(), 4);
}

fn predictor_routes(
    predictor: &mut HttpPredictionService<ScriptedHttp>,
    f: impl FnOnce(&mut ScriptedHttp),
) {
    f(predictor.http_mut());
}
