//! AiLed firmware library.
//!
//! Exposes the control core and adapters for integration testing. All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod pins;
pub mod wire;

pub mod adapters;
pub mod drivers;
pub mod sensors;
