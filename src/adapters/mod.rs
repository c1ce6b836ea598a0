//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                |
//! |----------------|--------------------|----------------------------|
//! | `hardware`     | SensorPort         | ESP32 ADC, GPIO            |
//! |                | ActuatorPort       | ESP32 LEDC PWM             |
//! | `log_sink`     | EventSink          | Serial log output          |
//! | `thingsboard`  | AttributePort      | ThingsBoard MQTT device API|
//! | `prediction`   | PredictionPort     | Inference server over HTTP |
//! | `time`         | ClockPort          | ESP32 system timer         |
//! | `wifi`         | ConnectivityPort   | ESP-IDF WiFi STA           |
//!
//! `mqtt`, `inbox` and `http` are the transport seams underneath the
//! network adapters.

pub mod hardware;
pub mod http;
pub mod inbox;
pub mod log_sink;
pub mod mqtt;
pub mod prediction;
pub mod thingsboard;
pub mod time;
pub mod wifi;
