//! System configuration parameters
//!
//! Everything here is fixed at compile time: the monitor exposes exactly one
//! threshold and two blink intervals.  [`MonitorConfig`] bundles the
//! constants so handlers receive them by value instead of reaching for
//! globals, and [`MonitorConfig::validate`] re-checks the invariants the
//! compile-time assertions below enforce for the defaults.
//!
//! ## Time base
//!
//! One *time unit* is one millisecond.  The blink timer counts at
//! `TIMER_SOURCE_HZ / TIMER_PRESCALER` and `TICKS_PER_MS` is that rate
//! divided by 1000 with integer truncation, so the real period of a
//! 250 ms request is `250 * 15 / 15_625 s = 240 ms`.  That error is
//! accepted; the LED is a visual indicator, not a clock.

use crate::control::blink_rate::{self, BlinkRate};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Threshold and blink intervals
// ---------------------------------------------------------------------------

/// Raw 8-bit ADC reading at or above which the monitor reports "hot".
/// Uncalibrated: compared directly against the converter's high byte.
pub const THRESHOLD_RAW: u8 = 30;

/// Toggle period below the threshold (milliseconds).
pub const BLINK_INTERVAL_LOW_MS: u32 = 250;

/// Toggle period at or above the threshold (milliseconds).
pub const BLINK_INTERVAL_HIGH_MS: u32 = 500;

/// Period armed by peripheral setup, in effect until the first
/// conversion completes.
pub const INITIAL_INTERVAL_MS: u32 = 1_000;

// ---------------------------------------------------------------------------
// Blink timer clock
// ---------------------------------------------------------------------------

/// gptimer source clock (APB).
pub const TIMER_SOURCE_HZ: u32 = 80_000_000;
/// Clock divider applied to the source clock.
pub const TIMER_PRESCALER: u32 = 5_120;
/// Effective counter tick rate.
pub const TIMER_RESOLUTION_HZ: u32 = TIMER_SOURCE_HZ / TIMER_PRESCALER;
/// Counter ticks per time unit (ms), truncated.
pub const TICKS_PER_MS: u32 = TIMER_RESOLUTION_HZ / 1_000;
/// Largest reload the counter may hold.  The gptimer is wider, but the
/// constants are kept within 16 bits so they stay valid on 16-bit timers.
pub const TIMER_COUNTER_MAX: u32 = u16::MAX as u32;

// ---------------------------------------------------------------------------
// Temperature ADC
// ---------------------------------------------------------------------------

/// Converter resolution in bits.  The monitor only keeps the top 8.
pub const ADC_BITWIDTH: u32 = 12;
/// Continuous-mode sample rate.
pub const ADC_SAMPLE_FREQ_HZ: u32 = 1_000;
/// Samples per conversion frame.  One conversion-complete event is raised
/// per frame, so events arrive every `FRAME / FREQ` seconds.
pub const ADC_FRAME_SAMPLES: u32 = 1_024;
/// Interval between conversion-complete events (milliseconds).
pub const CONVERSION_PERIOD_MS: u32 = ADC_FRAME_SAMPLES * 1_000 / ADC_SAMPLE_FREQ_HZ;

const _: () = assert!(TICKS_PER_MS > 0);
const _: () = assert!(BLINK_INTERVAL_LOW_MS < BLINK_INTERVAL_HIGH_MS);
const _: () = assert!(BLINK_INTERVAL_HIGH_MS * TICKS_PER_MS - 1 <= TIMER_COUNTER_MAX);
const _: () = assert!(INITIAL_INTERVAL_MS * TICKS_PER_MS - 1 <= TIMER_COUNTER_MAX);
const _: () = assert!(CONVERSION_PERIOD_MS > BLINK_INTERVAL_HIGH_MS);

/// Monitor configuration, built from the constants above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Raw reading at or above which the HIGH interval is selected.
    pub threshold_raw: u8,
    /// Toggle period below the threshold (ms).
    pub blink_low_ms: u32,
    /// Toggle period at or above the threshold (ms).
    pub blink_high_ms: u32,
    /// Period armed before the first sample (ms).
    pub initial_interval_ms: u32,
    /// Counter ticks per millisecond.
    pub ticks_per_ms: u32,
    /// Largest reload the counter may hold.
    pub counter_max: u32,
    /// Interval between conversion-complete events (ms).
    pub conversion_period_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            threshold_raw: THRESHOLD_RAW,
            blink_low_ms: BLINK_INTERVAL_LOW_MS,
            blink_high_ms: BLINK_INTERVAL_HIGH_MS,
            initial_interval_ms: INITIAL_INTERVAL_MS,
            ticks_per_ms: TICKS_PER_MS,
            counter_max: TIMER_COUNTER_MAX,
            conversion_period_ms: CONVERSION_PERIOD_MS,
        }
    }
}

impl MonitorConfig {
    /// Check the invariants the reload computation relies on.
    ///
    /// Counter overflow is never handled at runtime, so a configuration
    /// that passes here is the only guarantee that every installed reload
    /// fits the counter.
    pub fn validate(&self) -> Result<()> {
        if self.ticks_per_ms == 0 {
            return Err(Error::Config("ticks_per_ms must be non-zero"));
        }
        if self.blink_low_ms == 0 || self.blink_high_ms == 0 || self.initial_interval_ms == 0 {
            return Err(Error::Config("blink intervals must be non-zero"));
        }
        if self.blink_low_ms >= self.blink_high_ms {
            return Err(Error::Config("blink_low_ms must be shorter than blink_high_ms"));
        }
        for interval in [self.blink_low_ms, self.blink_high_ms, self.initial_interval_ms] {
            let fits = interval
                .checked_mul(self.ticks_per_ms)
                .is_some_and(|ticks| ticks - 1 <= self.counter_max);
            if !fits {
                return Err(Error::Config("blink interval overflows the timer counter"));
            }
        }
        if self.conversion_period_ms <= self.blink_high_ms {
            return Err(Error::Config(
                "conversion period must exceed the longest blink interval",
            ));
        }
        Ok(())
    }

    /// Reload value for a blink rate.
    pub fn reload_for(&self, rate: BlinkRate) -> u32 {
        blink_rate::reload_for(rate.interval_ms(self), self.ticks_per_ms)
    }

    /// Reload value armed by peripheral setup.
    pub fn initial_reload(&self) -> u32 {
        blink_rate::reload_for(self.initial_interval_ms, self.ticks_per_ms)
    }
}
