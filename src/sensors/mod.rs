//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns both sensor drivers and produces a [`SensorReading`] each
//! cycle.

pub mod light;
pub mod motion;

use embedded_hal::digital::InputPin;

use crate::app::model::SensorReading;
use light::{AnalogInput, LightSensor};
use motion::MotionSensor;

/// Aggregates the LDR and PIR drivers.
pub struct SensorHub<A, P> {
    pub light: LightSensor<A>,
    pub motion: MotionSensor<P>,
}

impl<A: AnalogInput, P: InputPin> SensorHub<A, P> {
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(light: LightSensor<A>, motion: MotionSensor<P>) -> Self {
        Self { light, motion }
    }

    /// Read both sensors.
    ///
    /// Individual read failures are logged and the previous good value is
    /// retained.
    pub fn read_all(&mut self) -> SensorReading {
        SensorReading {
            light_level: self.light.read(),
            motion_detected: self.motion.read(),
        }
    }
}
