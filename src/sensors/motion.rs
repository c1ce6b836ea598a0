//! PIR motion sensor driver (HC-SR501 style, active-high output).

use embedded_hal::digital::InputPin;
use log::warn;

pub struct MotionSensor<P> {
    pin: P,
    last_good: bool,
}

impl<P: InputPin> MotionSensor<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            last_good: false,
        }
    }

    /// `true` while the PIR output is high; the previous value on a GPIO
    /// error.
    pub fn read(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(high) => {
                self.last_good = high;
                high
            }
            Err(e) => {
                warn!("PIR: GPIO read failed ({:?}), holding {}", e, self.last_good);
                self.last_good
            }
        }
    }
}
