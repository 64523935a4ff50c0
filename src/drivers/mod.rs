//! Peripheral drivers and one-shot hardware initialisation.

pub mod blink_timer;
pub mod hw_init;
pub mod temp_adc;
