//! System configuration parameters
//!
//! All tunable parameters for the AiLed controller.  Network endpoints and
//! credentials are baked in at build time from `AILED_*` environment
//! variables; there is no runtime provisioning.

use serde::{Deserialize, Serialize};

use crate::adapters::wifi::{validate_password, validate_ssid};
use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Timing ---
    /// Delay between two control cycles (milliseconds)
    pub cycle_interval_ms: u32,
    /// Minimum spacing between inference-service availability probes,
    /// measured from the end of the previous probe (milliseconds)
    pub availability_check_interval_ms: u32,
    /// Upper bound for any single HTTP request or MQTT connect wait
    /// (milliseconds); at most half of `cycle_interval_ms`
    pub network_timeout_ms: u32,
    /// Extra delay after a failed MQTT reconnect (milliseconds)
    pub reconnect_delay_ms: u32,

    // --- Network ---
    pub network: NetworkConfig,
}

/// Endpoints, credentials and topic names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub wifi_ssid: String,
    pub wifi_password: String,
    /// e.g. `mqtt://demo.thingsboard.io:1883`
    pub mqtt_url: String,
    /// ThingsBoard device access token, sent as the MQTT username.
    pub device_token: String,
    /// MQTT client identifier.
    pub client_id: String,
    /// Base URL of the inference server, e.g. `http://192.168.1.10:5000`
    pub prediction_base_url: String,
    pub topics: TopicConfig,
}

/// ThingsBoard device-API topics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicConfig {
    pub telemetry: String,
    /// Shared-attribute update pushes.
    pub attributes: String,
    /// Replies to shared-attribute requests (wildcard subscription).
    pub attribute_response: String,
    /// Where shared-attribute requests are published.
    pub attribute_request: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Timing
            cycle_interval_ms: 2000,                // 0.5 Hz
            availability_check_interval_ms: 30_000, // every 30 s
            network_timeout_ms: 500,
            reconnect_delay_ms: 5000,

            network: NetworkConfig::default(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            wifi_ssid: build_env(option_env!("AILED_WIFI_SSID"), ""),
            wifi_password: build_env(option_env!("AILED_WIFI_PASS"), ""),
            mqtt_url: build_env(
                option_env!("AILED_MQTT_URL"),
                "mqtt://demo.thingsboard.io:1883",
            ),
            device_token: build_env(option_env!("AILED_DEVICE_TOKEN"), ""),
            client_id: "ailed-esp32".into(),
            prediction_base_url: build_env(
                option_env!("AILED_PREDICT_URL"),
                "http://192.168.1.100:5000",
            ),
            topics: TopicConfig::default(),
        }
    }
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            telemetry: "v1/devices/me/telemetry".into(),
            attributes: "v1/devices/me/attributes".into(),
            attribute_response: "v1/devices/me/attributes/response/+".into(),
            attribute_request: "v1/devices/me/attributes/request/1".into(),
        }
    }
}

fn build_env(value: Option<&'static str>, fallback: &str) -> String {
    value.unwrap_or(fallback).into()
}

impl NetworkConfig {
    /// `GET` endpoint answering `ready` when a model is loaded.
    pub fn status_url(&self) -> String {
        format!("{}/status", self.prediction_base_url.trim_end_matches('/'))
    }

    /// `POST` endpoint returning `{"led": n}`.
    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.prediction_base_url.trim_end_matches('/'))
    }
}

impl SystemConfig {
    /// Reject values that would stall the loop, let a network call eat
    /// most of a cycle, or leave WiFi unconfigurable.
    pub fn validate(&self) -> Result<()> {
        if self.cycle_interval_ms == 0 {
            return Err(Error::Config("cycle_interval_ms must be > 0"));
        }
        if self.availability_check_interval_ms == 0 {
            return Err(Error::Config("availability_check_interval_ms must be > 0"));
        }
        if self.network_timeout_ms == 0 || self.network_timeout_ms > self.cycle_interval_ms / 2 {
            return Err(Error::Config(
                "network_timeout_ms must be > 0 and at most half of cycle_interval_ms",
            ));
        }
        if validate_ssid(&self.network.wifi_ssid).is_err() {
            return Err(Error::Config(
                "wifi_ssid must be 1-32 printable ASCII bytes (set AILED_WIFI_SSID)",
            ));
        }
        if validate_password(&self.network.wifi_password).is_err() {
            return Err(Error::Config(
                "wifi_password must be empty or 8-64 bytes (AILED_WIFI_PASS)",
            ));
        }
        if self.network.prediction_base_url.is_empty() {
            return Err(Error::Config("prediction_base_url is empty"));
        }
        Ok(())
    }
}
