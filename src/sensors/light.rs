//! LDR (photoresistor) driver.
//!
//! The LDR sits in a voltage divider on an ADC1 pin.  `embedded-hal` 1.0
//! has no ADC trait, so the driver samples through the small
//! [`AnalogInput`] seam; on ESP-IDF `main` passes a closure over the
//! oneshot ADC channel.

use log::warn;

use crate::error::SensorError;

/// One-shot analog sample source.
pub trait AnalogInput {
    fn read_raw(&mut self) -> Result<u16, SensorError>;
}

impl<F> AnalogInput for F
where
    F: FnMut() -> Result<u16, SensorError>,
{
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        self()
    }
}

pub struct LightSensor<A> {
    adc: A,
    last_good: u16,
    failed_reads: u32,
}

impl<A: AnalogInput> LightSensor<A> {
    pub fn new(adc: A) -> Self {
        Self {
            adc,
            last_good: 0,
            failed_reads: 0,
        }
    }

    /// Raw ADC count; the previous good sample on failure.
    pub fn read(&mut self) -> u16 {
        match self.adc.read_raw() {
            Ok(raw) => {
                self.last_good = raw;
                raw
            }
            Err(e) => {
                self.failed_reads = self.failed_reads.saturating_add(1);
                warn!("LDR: {} (holding {})", e, self.last_good);
                self.last_good
            }
        }
    }

    pub fn failed_reads(&self) -> u32 {
        self.failed_reads
    }
}
