//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the decision rules for the AiLed controller:
//! mode arbitration, the availability-probe staleness policy, and the
//! per-cycle orchestration.  All interaction with hardware and the network
//! happens through **port traits** defined in [`ports`], keeping this
//! layer fully testable without real peripherals.

pub mod arbiter;
pub mod commands;
pub mod events;
pub mod model;
pub mod ports;
pub mod service;
pub mod telemetry;
