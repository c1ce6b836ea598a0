//! AiLed firmware entry point
//!
//! Hexagonal architecture driven by a fixed-period control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter    LogEventSink   Esp32TimeAdapter            │
//! │  (Sensor+Actuator)  (EventSink)    (ClockPort)                 │
//! │  WifiAdapter        ThingsBoardChannel   HttpPredictionService │
//! │  (Connectivity)     (AttributePort)      (PredictionPort)      │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  ModeArbiter · AvailabilityTimer                       │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::{Context, Result, anyhow, ensure};
use esp_idf_hal::adc::attenuation::DB_11;
use esp_idf_hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{Pin, PinDriver};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};
use log::{info, warn};

use ailed::adapters::hardware::HardwareAdapter;
use ailed::adapters::http::EspHttpExchange;
use ailed::adapters::log_sink::LogEventSink;
use ailed::adapters::mqtt::EspMqttTransport;
use ailed::adapters::prediction::HttpPredictionService;
use ailed::adapters::thingsboard::ThingsBoardChannel;
use ailed::adapters::time::Esp32TimeAdapter;
use ailed::adapters::wifi::WifiAdapter;
use ailed::app::ports::{ClockPort, ConnectivityPort};
use ailed::app::service::AppService;
use ailed::config::SystemConfig;
use ailed::drivers::led::LedDriver;
use ailed::error::SensorError;
use ailed::pins;
use ailed::sensors::SensorHub;
use ailed::sensors::light::LightSensor;
use ailed::sensors::motion::MotionSensor;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  AiLed v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration (baked in at build time) ─────────────
    let config = SystemConfig::default();
    config.validate().map_err(|e| anyhow!("{e}"))?;
    let net = &config.network;

    // ── 3. Hardware ───────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let ldr_pin = peripherals.pins.gpio34;
    let pir_pin = peripherals.pins.gpio27;
    let led_pin = peripherals.pins.gpio2;
    ensure!(
        i32::from(ldr_pin.pin()) == pins::LDR_ADC_GPIO
            && i32::from(pir_pin.pin()) == pins::PIR_GPIO
            && i32::from(led_pin.pin()) == pins::LED_PWM_GPIO,
        "pin map in pins.rs does not match the claimed peripherals"
    );

    // LDR on GPIO34 (ADC1), 11 dB for the full 0–3.3 V divider swing.
    let adc = AdcDriver::new(peripherals.adc1)?;
    let mut ldr_channel = AdcChannelDriver::new(
        adc,
        ldr_pin,
        &AdcChannelConfig {
            attenuation: DB_11,
            ..Default::default()
        },
    )?;
    let ldr = move || ldr_channel.read().map_err(|_| SensorError::AdcReadFailed);

    let pir = PinDriver::input(pir_pin)?;

    let led_timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::default()
            .frequency(pins::LED_PWM_FREQ_HZ.Hz())
            .resolution(Resolution::Bits8),
    )?;
    let led_pwm = LedcDriver::new(peripherals.ledc.channel0, &led_timer, led_pin)?;

    info!(
        "Pins: LDR=GPIO{} PIR=GPIO{} LED=GPIO{} @ {} Hz / {} bit",
        pins::LDR_ADC_GPIO,
        pins::PIR_GPIO,
        pins::LED_PWM_GPIO,
        pins::LED_PWM_FREQ_HZ,
        pins::PWM_RESOLUTION_BITS
    );

    let mut hw = HardwareAdapter::new(
        SensorHub::new(LightSensor::new(ldr), MotionSensor::new(pir)),
        LedDriver::new(led_pwm),
    );
    let mut sink = LogEventSink::new();
    let clock = Esp32TimeAdapter::new();

    // ── 4. Core service: output off before any network work ───
    let mut app = AppService::new(config.clone());
    app.start(&mut hw, &mut sink);

    // ── 5. WiFi ───────────────────────────────────────────────
    let sys_loop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;
    let esp_wifi = EspWifi::new(peripherals.modem, sys_loop.clone(), Some(nvs))?;
    let mut wifi = WifiAdapter::new();
    wifi.attach_driver(BlockingWifi::wrap(esp_wifi, sys_loop)?);
    wifi.set_credentials(&net.wifi_ssid, &net.wifi_password)
        .map_err(|e| anyhow!("{e}"))
        .context("WiFi credentials")?;
    if let Err(e) = wifi.connect() {
        warn!("WiFi: initial connect failed ({}), retrying in background", e);
    }

    // ── 6. Cloud channel + inference client ───────────────────
    let timeout = Duration::from_millis(config.network_timeout_ms as u64);
    let transport = EspMqttTransport::new(&net.mqtt_url, timeout);
    let mut channel = ThingsBoardChannel::new(transport, net);
    let mut predictor = HttpPredictionService::new(EspHttpExchange::new(timeout), net);

    info!(
        "System ready. MQTT {} / inference {}",
        net.mqtt_url, net.prediction_base_url
    );

    // ── 7. Control loop ───────────────────────────────────────
    loop {
        wifi.poll(clock.now_ms());

        let report = app.tick(&mut hw, &wifi, &mut predictor, &mut channel, &clock, &mut sink);
        if report.channel_down {
            FreeRtos::delay_ms(config.reconnect_delay_ms);
        }

        FreeRtos::delay_ms(config.cycle_interval_ms);
    }
}
