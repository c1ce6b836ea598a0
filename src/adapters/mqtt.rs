//! MQTT transport seam.
//!
//! [`MqttTransport`] is the narrow surface the ThingsBoard channel needs
//! from an MQTT client.  On ESP-IDF it is backed by `EspMqttClient`,
//! whose event callback copies inbound publishes into the
//! [`inbox`](super::inbox) queue; host tests use an in-memory fake.

use crate::error::CommsError;

use super::inbox::InboundMessage;

pub trait MqttTransport {
    /// Bring the session up (or confirm it is up), authenticating as
    /// `client_id` with `credential` as the username.  Bounded by the
    /// transport's connect timeout.
    fn connect(&mut self, client_id: &str, credential: &str) -> Result<(), CommsError>;
    fn is_connected(&self) -> bool;
    fn subscribe(&mut self, topic: &str) -> Result<(), CommsError>;
    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), CommsError>;
    /// Next inbound message, without blocking.
    fn try_recv(&mut self) -> Option<InboundMessage>;
}

#[cfg(target_os = "espidf")]
pub use esp::EspMqttTransport;

#[cfg(target_os = "espidf")]
mod esp {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::{Duration, Instant};

    use esp_idf_svc::mqtt::client::{
        Details, EspMqttClient, EventPayload, MqttClientConfiguration, QoS,
    };
    use log::{info, warn};

    use super::MqttTransport;
    use crate::adapters::inbox::{self, InboundMessage, InboxConsumer, SharedProducer};
    use crate::error::CommsError;

    const CONNECT_POLL: Duration = Duration::from_millis(50);

    pub struct EspMqttTransport {
        url: String,
        client: Option<EspMqttClient<'static>>,
        connected: Arc<AtomicBool>,
        tx: SharedProducer,
        rx: InboxConsumer,
        connect_timeout: Duration,
    }

    impl EspMqttTransport {
        pub fn new(url: &str, connect_timeout: Duration) -> Self {
            let (tx, rx) = inbox::inbox();
            Self {
                url: url.into(),
                client: None,
                connected: Arc::new(AtomicBool::new(false)),
                tx: SharedProducer::new(tx),
                rx,
                connect_timeout,
            }
        }

        /// Create the ESP-IDF client.  It connects (and later reconnects)
        /// in the background; the event callback holds a clone of the inbox
        /// producer, so a failed init leaves the inbox intact for the retry.
        fn start_client(&mut self, client_id: &str, credential: &str) -> Result<(), CommsError> {
            let tx = self.tx.clone();
            let conf = MqttClientConfiguration {
                client_id: Some(client_id),
                username: Some(credential),
                ..Default::default()
            };
            let flag = self.connected.clone();

            let client = EspMqttClient::new_cb(&self.url, &conf, move |event| {
                match event.payload() {
                    EventPayload::Connected(_) => {
                        info!("MQTT: connected");
                        flag.store(true, Ordering::Release);
                    }
                    EventPayload::Disconnected => {
                        warn!("MQTT: disconnected");
                        flag.store(false, Ordering::Release);
                    }
                    EventPayload::Received {
                        topic: Some(topic),
                        data,
                        details: Details::Complete,
                        ..
                    } => {
                        tx.deliver(topic, data);
                    }
                    EventPayload::Error(e) => warn!("MQTT: {:?}", e),
                    _ => {}
                }
            })
            .map_err(|e| {
                warn!("MQTT: client init failed: {:?}", e);
                CommsError::MqttConnectFailed
            })?;

            self.client = Some(client);
            Ok(())
        }

        fn client(&mut self) -> Result<&mut EspMqttClient<'static>, CommsError> {
            self.client.as_mut().ok_or(CommsError::MqttNotConnected)
        }
    }

    impl MqttTransport for EspMqttTransport {
        fn connect(&mut self, client_id: &str, credential: &str) -> Result<(), CommsError> {
            if self.client.is_none() {
                self.start_client(client_id, credential)?;
            }
            let started = Instant::now();
            while !self.is_connected() {
                if started.elapsed() >= self.connect_timeout {
                    return Err(CommsError::MqttConnectFailed);
                }
                std::thread::sleep(CONNECT_POLL);
            }
            Ok(())
        }

        fn is_connected(&self) -> bool {
            self.connected.load(Ordering::Acquire)
        }

        fn subscribe(&mut self, topic: &str) -> Result<(), CommsError> {
            self.client()?
                .subscribe(topic, QoS::AtLeastOnce)
                .map(|_| ())
                .map_err(|_| CommsError::MqttSubscribeFailed)
        }

        fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), CommsError> {
            self.client()?
                .publish(topic, QoS::AtMostOnce, false, payload)
                .map(|_| ())
                .map_err(|_| CommsError::MqttPublishFailed)
        }

        fn try_recv(&mut self) -> Option<InboundMessage> {
            self.rx.dequeue()
        }
    }
}
