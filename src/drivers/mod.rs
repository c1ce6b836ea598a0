//! Actuator drivers.

pub mod led;
