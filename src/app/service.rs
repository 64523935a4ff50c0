//! Monitor service — routes hardware events to the two handlers.
//!
//! [`Monitor`] owns the [`Sampler`] and the [`BlinkDriver`].  The handlers
//! never call each other; the only state they share is the reload value
//! living in the timer behind [`BlinkTimerPort`].
//!
//! ```text
//!  ConversionComplete ──▶ Sampler ──▶ BlinkTimerPort (reload)
//!                                           │
//!  CompareMatch ◀───────────────────────────┘
//!       │
//!       └────────────▶ BlinkDriver ──▶ LedPort (toggle)
//! ```

use log::info;

use crate::config::MonitorConfig;
use crate::control::blink_rate::BlinkRate;
use crate::events::Event;

use super::blink_driver::BlinkDriver;
use super::events::AppEvent;
use super::ports::{AdcPort, BlinkTimerPort, EventSink, LedPort};
use super::sampler::Sampler;

pub struct Monitor {
    config: MonitorConfig,
    sampler: Sampler,
    blink: BlinkDriver,
}

impl Monitor {
    /// Build the handlers from a validated configuration.
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            sampler: Sampler::new(&config),
            blink: BlinkDriver::new(),
            config,
        }
    }

    /// Announce that peripheral setup has armed both event sources.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        let reload = self.config.initial_reload();
        sink.emit(&AppEvent::Started { reload });
        info!(
            "Monitor started: threshold={} low={}ms high={}ms",
            self.config.threshold_raw, self.config.blink_low_ms, self.config.blink_high_ms
        );
    }

    /// Run the handler bound to `event` to completion.
    pub fn dispatch(
        &mut self,
        event: Event,
        hw: &mut (impl AdcPort + BlinkTimerPort + LedPort),
        sink: &mut impl EventSink,
    ) {
        match event {
            Event::ConversionComplete => {
                self.sampler.on_conversion_complete(hw, sink);
            }
            Event::CompareMatch => self.blink.on_compare_match(hw),
        }
    }

    /// Stop the blink timer and turn the LED off.
    ///
    /// The running firmware never calls this; a later conversion event
    /// re-arms the timer.
    pub fn halt(&mut self, hw: &mut (impl BlinkTimerPort + LedPort), sink: &mut impl EventSink) {
        critical_section::with(|_| {
            hw.stop();
            hw.set_off();
        });
        sink.emit(&AppEvent::Halted);
    }

    /// State entered by the last sample; `None` until the first one.
    pub fn rate(&self) -> Option<BlinkRate> {
        self.sampler.rate()
    }

    pub fn samples(&self) -> u32 {
        self.sampler.samples()
    }

    pub fn toggles(&self) -> u32 {
        self.blink.toggles()
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }
}
