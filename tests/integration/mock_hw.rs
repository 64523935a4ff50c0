//! Mock hardware for integration tests.
//!
//! `MockHardware` records every port call so tests can assert on the exact
//! re-arm sequence.  `SimPin` is an `embedded-hal` output pin used with the
//! real `HardwareAdapter` (simulated drivers) for timing tests.

use std::collections::VecDeque;
use std::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};
use thermoblink::app::events::AppEvent;
use thermoblink::app::ports::{AdcPort, BlinkTimerPort, EventSink, LedPort};

// ── Port call record ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwCall {
    Read(u8),
    Stop,
    ResetCounter,
    SetReload(u32),
    Start,
    Toggle,
    SetOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<HwCall>,
    pub readings: VecDeque<u8>,
    pub counter: u32,
    pub reload: u32,
    pub running: bool,
    pub led: bool,
}

#[allow(dead_code)]
impl MockHardware {
    /// Timer running with `reload`, LED off, as peripheral setup leaves it.
    pub fn armed(reload: u32) -> Self {
        Self {
            calls: Vec::new(),
            readings: VecDeque::new(),
            counter: 0,
            reload,
            running: true,
            led: false,
        }
    }

    pub fn queue_readings(&mut self, readings: &[u8]) {
        self.readings.extend(readings.iter().copied());
    }

    /// Every reload installed, in order.
    pub fn installed_reloads(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::SetReload(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: HwCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

impl AdcPort for MockHardware {
    fn read(&mut self) -> u8 {
        let r = self.readings.pop_front().unwrap_or(0);
        self.calls.push(HwCall::Read(r));
        r
    }
}

impl BlinkTimerPort for MockHardware {
    fn stop(&mut self) {
        self.running = false;
        self.calls.push(HwCall::Stop);
    }

    fn reset_counter(&mut self) {
        self.counter = 0;
        self.calls.push(HwCall::ResetCounter);
    }

    fn set_reload(&mut self, reload: u32) {
        self.reload = reload;
        self.calls.push(HwCall::SetReload(reload));
    }

    fn start(&mut self) {
        self.running = true;
        self.calls.push(HwCall::Start);
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn reload(&self) -> u32 {
        self.reload
    }
}

impl LedPort for MockHardware {
    fn toggle(&mut self) {
        self.led = !self.led;
        self.calls.push(HwCall::Toggle);
    }

    fn set_off(&mut self) {
        self.led = false;
        self.calls.push(HwCall::SetOff);
    }

    fn is_on(&self) -> bool {
        self.led
    }
}

// ── Recording event sink ──────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── SimPin ────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct SimPin {
    pub high: bool,
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.high = true;
        Ok(())
    }
}

impl StatefulOutputPin for SimPin {
    fn is_set_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.high)
    }
}
