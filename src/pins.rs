//! GPIO / peripheral assignments for the thermoblink board.
//!
//! Single source of truth — drivers reference this module rather than
//! hard-coding pin numbers.

/// Status LED, driven push-pull, active HIGH.
pub const LED_GPIO: i32 = 2;

/// LM35 analog output.  ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const TEMP_ADC_GPIO: i32 = 1;
/// ADC1 channel index for [`TEMP_ADC_GPIO`].
pub const TEMP_ADC_CHANNEL: u32 = 0;
/// ADC attenuation for the LM35 (0 dB → 0 – 0.95 V, ample for 0–95 °C).
pub const TEMP_ADC_ATTEN: u32 = 0;
