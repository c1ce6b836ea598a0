//! Inbound MQTT message queue.
//!
//! The MQTT client delivers messages on its own task; the control loop
//! consumes them once per cycle.  The two sides share a lock-free
//! `heapless::spsc::Queue` split into producer/consumer halves, so the
//! callback never blocks and the loop never waits.
//!
//! Messages that do not fit the fixed buffers, or arrive while the queue
//! is full, are dropped and logged.
//!
//! The queue is allocated once per transport.  The producer lives behind a
//! [`SharedProducer`] so a client callback can be built, dropped and built
//! again without losing the producer half.

use std::sync::{Arc, Mutex, PoisonError};

use heapless::spsc::{Consumer, Producer, Queue};
use log::warn;

pub const TOPIC_CAP: usize = 64;
pub const PAYLOAD_CAP: usize = 256;
/// Queue slots (one is reserved by the ring buffer, so 15 usable).
pub const INBOX_CAP: usize = 16;

/// A raw inbound publish, copied out of the client's buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub topic: heapless::String<TOPIC_CAP>,
    pub payload: heapless::Vec<u8, PAYLOAD_CAP>,
}

impl InboundMessage {
    /// `None` when either part exceeds its buffer.
    pub fn new(topic: &str, payload: &[u8]) -> Option<Self> {
        let mut t = heapless::String::new();
        t.push_str(topic).ok()?;
        let payload = heapless::Vec::from_slice(payload).ok()?;
        Some(Self { topic: t, payload })
    }
}

pub type InboxProducer = Producer<'static, InboundMessage, INBOX_CAP>;
pub type InboxConsumer = Consumer<'static, InboundMessage, INBOX_CAP>;

/// Allocate a queue for the lifetime of the program and split it.
///
/// Call once at startup; every call leaks a fresh queue.
pub fn inbox() -> (InboxProducer, InboxConsumer) {
    let queue: &'static mut Queue<InboundMessage, INBOX_CAP> = Box::leak(Box::new(Queue::new()));
    queue.split()
}

/// Copy a publish into the queue.  Returns `false` if it was dropped.
pub fn deliver(producer: &mut InboxProducer, topic: &str, payload: &[u8]) -> bool {
    let Some(msg) = InboundMessage::new(topic, payload) else {
        warn!(
            "MQTT: dropping oversized message on '{}' ({} bytes)",
            topic,
            payload.len()
        );
        return false;
    };
    if producer.enqueue(msg).is_err() {
        warn!("MQTT: inbox full, dropping message on '{}'", topic);
        return false;
    }
    true
}

/// Clonable handle to the single producer half.
///
/// Only the MQTT callback enqueues, so the lock is uncontended.
#[derive(Clone)]
pub struct SharedProducer(Arc<Mutex<InboxProducer>>);

impl SharedProducer {
    pub fn new(producer: InboxProducer) -> Self {
        Self(Arc::new(Mutex::new(producer)))
    }

    /// [`deliver`] through the shared handle.
    pub fn deliver(&self, topic: &str, payload: &[u8]) -> bool {
        let mut producer = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        deliver(&mut producer, topic, payload)
    }
}
