//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART in production, stderr on host).  Each line
//! starts with a fixed tag so the serial console can be grepped.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | ldr={} | motion={} | led={} | mode={}",
                    t.light_level,
                    if t.motion_detected { "yes" } else { "no" },
                    t.level.get(),
                    t.mode.wire_name(),
                );
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE | {} -> {}", from.wire_name(), to.wire_name());
            }
            AppEvent::AvailabilityChecked(a) => {
                info!("MODE | availability={:?}", a);
            }
            AppEvent::ManualLevelReceived { level, applied } => {
                info!(
                    "MANUAL | led={} | {}",
                    level.get(),
                    if *applied { "applied" } else { "pending" }
                );
            }
            AppEvent::PredictionFailed(e) => {
                warn!("PREDICT | failed: {}", e);
            }
            AppEvent::ChannelDown(e) => {
                warn!("MQTT | session down: {}", e);
            }
            AppEvent::PublishFailed(e) => {
                warn!("MQTT | publish failed: {}", e);
            }
            AppEvent::Started { mode, level } => {
                info!("START | mode={} led={}", mode.wire_name(), level.get());
            }
        }
    }
}
