//! Illumination LED driver.
//!
//! One LEDC PWM channel drives the LED through a logic-level MOSFET.
//! Brightness 0–255 maps linearly onto the channel's full duty range, so
//! the driver works with any `SetDutyCycle` resolution.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: wraps an `esp_idf_hal::ledc::LedcDriver`.
//! On host/test: any mock implementing `SetDutyCycle`.

use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::model::Level;

pub struct LedDriver<P> {
    pwm: P,
    current: Level,
}

impl<P: SetDutyCycle> LedDriver<P> {
    /// Take ownership of the channel and switch the LED off.
    pub fn new(pwm: P) -> Self {
        let mut led = Self {
            pwm,
            current: Level::OFF,
        };
        led.write(Level::OFF);
        led
    }

    /// Drive the LED to `level`.  On a PWM error the previous level is
    /// kept as the reported state.
    pub fn set_level(&mut self, level: Level) {
        self.write(level);
    }

    pub fn current_level(&self) -> Level {
        self.current
    }

    fn write(&mut self, level: Level) {
        match self
            .pwm
            .set_duty_cycle_fraction(u16::from(level.get()), u16::from(u8::MAX))
        {
            Ok(()) => self.current = level,
            Err(e) => warn!(
                "LED: PWM write of {} failed ({:?}), output stays at {}",
                level.get(),
                e,
                self.current.get()
            ),
        }
    }
}
