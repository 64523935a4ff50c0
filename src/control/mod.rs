//! Control laws — pure functions with no hardware access.

pub mod blink_rate;
