//! Two-state blink-rate controller.
//!
//! ```text
//!            reading < threshold            reading >= threshold
//!   ┌──────────────────────────┐      ┌──────────────────────────┐
//!   │ LOW_BLINK  (250 ms)      │◀────▶│ HIGH_BLINK (500 ms)      │
//!   └──────────────────────────┘      └──────────────────────────┘
//! ```
//!
//! Every conversion re-evaluates the state from scratch; there is no
//! hysteresis and no INIT state.  The rate maps to a timer reload through
//! [`reload_for`].

use crate::config::MonitorConfig;

/// Blink cadence selected by the latest sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlinkRate {
    /// Reading below the threshold: short interval.
    Low,
    /// Reading at or above the threshold: long interval.
    High,
}

impl BlinkRate {
    /// Toggle interval for this rate, in milliseconds.
    pub fn interval_ms(self, config: &MonitorConfig) -> u32 {
        match self {
            Self::Low => config.blink_low_ms,
            Self::High => config.blink_high_ms,
        }
    }
}

/// Classify a raw reading.  Strict `<` on the low side, so the threshold
/// value itself selects [`BlinkRate::High`].
pub const fn classify(reading: u8, threshold: u8) -> BlinkRate {
    if reading < threshold {
        BlinkRate::Low
    } else {
        BlinkRate::High
    }
}

/// Compare value that makes an auto-reload counter fire every
/// `interval_units`.  The counter runs `0..=reload`, hence the `- 1`.
///
/// Overflow is a configuration concern: see [`MonitorConfig::validate`].
pub const fn reload_for(interval_units: u32, ticks_per_unit: u32) -> u32 {
    (interval_units * ticks_per_unit).saturating_sub(1)
}
