//! GPIO / peripheral pin assignments for the AiLed board (ESP32 DevKit).
//!
//! Board pin map.  `esp-idf-hal` hands out pins as typed peripherals
//! (`peripherals.pins.gpioN`), so `main` claims them by field name; these
//! constants must match those fields; `main` checks them at boot.

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// LDR voltage divider on ADC1 channel 6 (GPIO 34, input-only).
pub const LDR_ADC_GPIO: i32 = 34;

/// HC-SR501 PIR output. HIGH = motion.
pub const PIR_GPIO: i32 = 27;

// ---------------------------------------------------------------------------
// Illumination LED (LEDC → MOSFET)
// ---------------------------------------------------------------------------

pub const LED_PWM_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels, which
/// matches the brightness range one-to-one.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC base frequency (5 kHz, flicker-free).
pub const LED_PWM_FREQ_HZ: u32 = 5_000;
