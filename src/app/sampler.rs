//! Sampler — the conversion-complete handler.
//!
//! On every completed conversion:
//! 1. read the 8-bit sample,
//! 2. classify it against the threshold,
//! 3. re-arm the blink timer with the matching reload.
//!
//! Step 3 runs on every sample, even when the rate is unchanged, so each
//! sample restarts the blink phase.  The stop → reset → reload → start
//! sequence runs inside a critical section: a compare-match interrupt can
//! no longer land between "stop" and "start" and observe a half-installed
//! reload.

use log::debug;

use crate::config::MonitorConfig;
use crate::control::blink_rate::{self, BlinkRate};

use super::events::AppEvent;
use super::ports::{AdcPort, BlinkTimerPort, EventSink};

pub struct Sampler {
    threshold: u8,
    low_reload: u32,
    high_reload: u32,
    rate: Option<BlinkRate>,
    samples: u32,
}

impl Sampler {
    /// Precompute both reloads; `config` must already be validated.
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            threshold: config.threshold_raw,
            low_reload: config.reload_for(BlinkRate::Low),
            high_reload: config.reload_for(BlinkRate::High),
            rate: None,
            samples: 0,
        }
    }

    /// Handle one conversion-complete event.
    pub fn on_conversion_complete(
        &mut self,
        hw: &mut (impl AdcPort + BlinkTimerPort),
        sink: &mut impl EventSink,
    ) -> BlinkRate {
        let reading = hw.read();
        let rate = blink_rate::classify(reading, self.threshold);
        self.samples = self.samples.wrapping_add(1);

        self.request_rate(rate, hw);

        let prev = self.rate.replace(rate);
        if prev == Some(rate) {
            debug!("sampler: reading={} stays {:?}", reading, rate);
        } else {
            sink.emit(&AppEvent::RateChanged {
                from: prev,
                to: rate,
                reading,
                reload: self.reload(rate),
            });
        }
        rate
    }

    /// Stop the timer, zero its counter, install the reload for `rate`,
    /// and restart it.  Always leaves the timer running.
    pub fn request_rate(&self, rate: BlinkRate, timer: &mut impl BlinkTimerPort) {
        let reload = self.reload(rate);
        critical_section::with(|_| {
            timer.stop();
            timer.reset_counter();
            timer.set_reload(reload);
            timer.start();
        });
    }

    pub fn reload(&self, rate: BlinkRate) -> u32 {
        match rate {
            BlinkRate::Low => self.low_reload,
            BlinkRate::High => self.high_reload,
        }
    }

    /// State entered by the last sample; `None` before the first one.
    pub fn rate(&self) -> Option<BlinkRate> {
        self.rate
    }

    /// Conversions handled so far (wrapping).
    pub fn samples(&self) -> u32 {
        self.samples
    }
}
