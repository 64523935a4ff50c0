//! Blink driver — the compare-match handler.
//!
//! Flips the LED on every timer event.  Holds no rate of its own: the
//! cadence is whatever reload the [`Sampler`](super::sampler::Sampler)
//! installed last.

use super::ports::LedPort;

#[derive(Debug, Default)]
pub struct BlinkDriver {
    toggles: u32,
}

impl BlinkDriver {
    pub fn new() -> Self {
        Self { toggles: 0 }
    }

    /// Handle one compare-match event.
    pub fn on_compare_match(&mut self, led: &mut impl LedPort) {
        led.toggle();
        self.toggles = self.toggles.wrapping_add(1);
    }

    /// Compare-match events handled so far (wrapping).
    pub fn toggles(&self) -> u32 {
        self.toggles
    }
}
