//! ThingsBoard device-API channel.
//!
//! Implements [`AttributePort`] on top of any [`MqttTransport`]:
//!
//! | Direction | Topic                                   | Payload            |
//! |-----------|-----------------------------------------|--------------------|
//! | out       | `v1/devices/me/telemetry`               | telemetry frame    |
//! | out       | `v1/devices/me/attributes/request/1`    | `{"sharedKeys":"led"}` |
//! | in        | `v1/devices/me/attributes`              | `{"led": n}`       |
//! | in        | `v1/devices/me/attributes/response/+`   | `{"shared":{"led": n}}` |
//!
//! Every new session re-subscribes and asks for the current shared `led`
//! value, so a value changed while the device was offline is picked up.

use log::{debug, info, warn};

use crate::app::commands::AppCommand;
use crate::app::ports::AttributePort;
use crate::app::telemetry::TelemetryFrame;
use crate::config::{NetworkConfig, TopicConfig};
use crate::error::CommsError;
use crate::wire::{attributes, telemetry};

use super::mqtt::MqttTransport;

pub struct ThingsBoardChannel<T> {
    transport: T,
    client_id: String,
    /// Device access token, presented as the MQTT username.
    token: String,
    topics: TopicConfig,
    session_ready: bool,
    rejected: u32,
}

impl<T: MqttTransport> ThingsBoardChannel<T> {
    pub fn new(transport: T, net: &NetworkConfig) -> Self {
        Self {
            transport,
            client_id: net.client_id.clone(),
            token: net.device_token.clone(),
            topics: net.topics.clone(),
            session_ready: false,
            rejected: 0,
        }
    }

    /// Subscriptions are in place and the shared-attribute request went out.
    pub fn session_ready(&self) -> bool {
        self.session_ready
    }

    /// Inbound messages discarded because they did not decode.
    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn open_session(&mut self) -> Result<(), CommsError> {
        self.transport.subscribe(&self.topics.attributes)?;
        self.transport.subscribe(&self.topics.attribute_response)?;
        let request =
            attributes::encode_shared_request().map_err(|_| CommsError::MqttPublishFailed)?;
        self.transport
            .publish(&self.topics.attribute_request, &request)?;
        info!("MQTT: session ready, requested shared '{}'", attributes::LED_KEY);
        Ok(())
    }

    fn is_attribute_topic(&self, topic: &str) -> bool {
        topic == self.topics.attributes || topic_matches(&self.topics.attribute_response, topic)
    }
}

/// MQTT filter match supporting a single trailing `+` level.
fn topic_matches(filter: &str, topic: &str) -> bool {
    match filter.strip_suffix('+') {
        Some(prefix) => topic
            .strip_prefix(prefix)
            .is_some_and(|rest| !rest.is_empty() && !rest.contains('/')),
        None => filter == topic,
    }
}

impl<T: MqttTransport> AttributePort for ThingsBoardChannel<T> {
    fn ensure_connected(&mut self) -> Result<(), CommsError> {
        if !self.transport.is_connected() {
            if self.session_ready {
                warn!("MQTT: session lost, reconnecting");
            }
            self.session_ready = false;
            self.transport.connect(&self.client_id, &self.token)?;
        }
        if !self.session_ready {
            self.open_session()?;
            self.session_ready = true;
        }
        Ok(())
    }

    fn poll(&mut self) -> Option<AppCommand> {
        while let Some(msg) = self.transport.try_recv() {
            if !self.is_attribute_topic(&msg.topic) {
                debug!("MQTT: ignoring message on '{}'", msg.topic);
                continue;
            }
            match attributes::decode_manual_level(&msg.payload) {
                Ok(level) => return Some(AppCommand::SetManualLevel(level)),
                Err(e) => {
                    self.rejected = self.rejected.saturating_add(1);
                    warn!("MQTT: rejected attribute message on '{}': {}", msg.topic, e);
                }
            }
        }
        None
    }

    fn publish(&mut self, frame: &TelemetryFrame) -> Result<(), CommsError> {
        if !self.session_ready || !self.transport.is_connected() {
            return Err(CommsError::MqttNotConnected);
        }
        let body = telemetry::encode(frame).map_err(|_| CommsError::MqttPublishFailed)?;
        self.transport.publish(&self.topics.telemetry, &body)
    }
}
