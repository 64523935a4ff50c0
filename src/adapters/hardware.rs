//! Hardware adapter — bridges the peripherals to the domain port traits.
//!
//! Owns the ADC, the blink timer and the LED, exposing them through
//! [`AdcPort`], [`BlinkTimerPort`] and [`LedPort`] so one `&mut` can be
//! handed to [`Monitor::dispatch`](crate::app::service::Monitor::dispatch).
//! On non-espidf targets the drivers are in-memory simulations.

use crate::app::ports::{AdcPort, BlinkTimerPort, LedPort};
use crate::drivers::blink_timer::BlinkTimer;
use crate::drivers::temp_adc::TempAdc;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<L> {
    adc: TempAdc,
    timer: BlinkTimer,
    led: L,
}

impl<L: LedPort> HardwareAdapter<L> {
    pub fn new(adc: TempAdc, timer: BlinkTimer, led: L) -> Self {
        Self { adc, timer, led }
    }

    pub fn adc_mut(&mut self) -> &mut TempAdc {
        &mut self.adc
    }

    pub fn timer(&self) -> &BlinkTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut BlinkTimer {
        &mut self.timer
    }

    pub fn led(&self) -> &L {
        &self.led
    }
}

// ── AdcPort ───────────────────────────────────────────────────

impl<L> AdcPort for HardwareAdapter<L> {
    fn read(&mut self) -> u8 {
        self.adc.read()
    }
}

// ── BlinkTimerPort ────────────────────────────────────────────

impl<L> BlinkTimerPort for HardwareAdapter<L> {
    fn stop(&mut self) {
        self.timer.stop();
    }

    fn reset_counter(&mut self) {
        self.timer.reset_counter();
    }

    fn set_reload(&mut self, reload: u32) {
        self.timer.set_reload(reload);
    }

    fn start(&mut self) {
        self.timer.start();
    }

    fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    fn reload(&self) -> u32 {
        self.timer.reload()
    }
}

// ── LedPort ───────────────────────────────────────────────────

impl<L: LedPort> LedPort for HardwareAdapter<L> {
    fn toggle(&mut self) {
        self.led.toggle();
    }

    fn set_off(&mut self) {
        self.led.set_off();
    }

    fn is_on(&self) -> bool {
        self.led.is_on()
    }
}
