//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and the LED driver, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  This is the only module in the
//! system that touches actual hardware.  Generic over the peripheral
//! types so host tests can plug in mocks.

use embedded_hal::digital::InputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::app::model::{Level, SensorReading};
use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::led::LedDriver;
use crate::sensors::SensorHub;
use crate::sensors::light::AnalogInput;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<A, P, L> {
    sensor_hub: SensorHub<A, P>,
    led: LedDriver<L>,
}

impl<A, P, L> HardwareAdapter<A, P, L>
where
    A: AnalogInput,
    P: InputPin,
    L: SetDutyCycle,
{
    pub fn new(sensor_hub: SensorHub<A, P>, led: LedDriver<L>) -> Self {
        Self { sensor_hub, led }
    }

    pub fn sensors(&self) -> &SensorHub<A, P> {
        &self.sensor_hub
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<A, P, L> SensorPort for HardwareAdapter<A, P, L>
where
    A: AnalogInput,
    P: InputPin,
    L: SetDutyCycle,
{
    fn read(&mut self) -> SensorReading {
        self.sensor_hub.read_all()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<A, P, L> ActuatorPort for HardwareAdapter<A, P, L>
where
    A: AnalogInput,
    P: InputPin,
    L: SetDutyCycle,
{
    fn apply(&mut self, level: Level) {
        self.led.set_level(level);
    }

    fn applied(&self) -> Level {
        self.led.current_level()
    }
}
