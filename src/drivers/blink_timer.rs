//! Blink timer — a general-purpose timer in auto-reload mode.
//!
//! The counter runs `0..=reload` at
//! [`TIMER_RESOLUTION_HZ`](crate::config::TIMER_RESOLUTION_HZ) and wraps to
//! zero, so one period is `reload + 1` ticks.  gptimer raises its alarm when
//! the count *reaches* `alarm_count`, so the hardware is armed with
//! [`alarm_count`]`(reload)`; the host simulation uses the same period.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: wraps a `gptimer` handle created by `hw_init`; the alarm
//! ISR queues [`Event::CompareMatch`].
//! On host/test: an in-memory counter advanced explicitly with
//! [`BlinkTimer::advance`], which returns how many compare matches the
//! elapsed ticks produced.
//!
//! [`Event::CompareMatch`]: crate::events::Event::CompareMatch

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::app::ports::BlinkTimerPort;

/// Ticks per period for a given reload value.
pub const fn alarm_count(reload: u32) -> u64 {
    reload as u64 + 1
}

pub struct BlinkTimer {
    #[cfg(target_os = "espidf")]
    handle: gptimer_handle_t,
    #[cfg(not(target_os = "espidf"))]
    counter: u32,
    reload: u32,
    running: bool,
}

// ── ESP-IDF gptimer ───────────────────────────────────────────

#[cfg(target_os = "espidf")]
impl BlinkTimer {
    /// Wrap an enabled and started gptimer (see `hw_init::init_timer`).
    pub(crate) fn from_handle(handle: gptimer_handle_t, reload: u32) -> Self {
        Self {
            handle,
            reload,
            running: true,
        }
    }
}

#[cfg(target_os = "espidf")]
pub(crate) fn alarm_config(reload: u32) -> gptimer_alarm_config_t {
    let mut cfg = gptimer_alarm_config_t {
        alarm_count: alarm_count(reload),
        reload_count: 0,
        ..Default::default()
    };
    cfg.flags.set_auto_reload_on_alarm(1);
    cfg
}

#[cfg(target_os = "espidf")]
fn check(ret: esp_err_t, op: &str) {
    if ret != ESP_OK {
        log::warn!("blink_timer: {} failed (rc={})", op, ret);
    }
}

#[cfg(target_os = "espidf")]
impl BlinkTimerPort for BlinkTimer {
    fn stop(&mut self) {
        if self.running {
            // SAFETY: handle is valid for the program lifetime (never deleted).
            check(unsafe { gptimer_stop(self.handle) }, "stop");
            self.running = false;
        }
    }

    fn reset_counter(&mut self) {
        // SAFETY: as above.
        check(unsafe { gptimer_set_raw_count(self.handle, 0) }, "reset");
    }

    fn set_reload(&mut self, reload: u32) {
        let cfg = alarm_config(reload);
        // SAFETY: as above; cfg is copied by the driver.
        check(unsafe { gptimer_set_alarm_action(self.handle, &cfg) }, "set_alarm");
        self.reload = reload;
    }

    fn start(&mut self) {
        if !self.running {
            // SAFETY: as above.
            check(unsafe { gptimer_start(self.handle) }, "start");
            self.running = true;
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn reload(&self) -> u32 {
        self.reload
    }
}

/// Alarm ISR.  Runs in interrupt context: queue only, no logging.
#[cfg(target_os = "espidf")]
pub(crate) unsafe extern "C" fn on_alarm(
    _timer: gptimer_handle_t,
    _edata: *const gptimer_alarm_event_data_t,
    _user_ctx: *mut core::ffi::c_void,
) -> bool {
    crate::events::push_event(crate::events::Event::CompareMatch);
    false
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
impl BlinkTimer {
    /// A running timer armed with `reload`, as peripheral setup leaves it.
    pub fn new(reload: u32) -> Self {
        Self {
            counter: 0,
            reload,
            running: true,
        }
    }

    /// Let `ticks` counter ticks elapse; returns the number of compare
    /// matches raised.  A stopped timer does not count.
    pub fn advance(&mut self, ticks: u32) -> u32 {
        if !self.running {
            return 0;
        }
        let period = alarm_count(self.reload);
        let total = u64::from(self.counter) + u64::from(ticks);
        self.counter = (total % period) as u32;
        (total / period) as u32
    }

    /// Current counter value.
    pub fn counter(&self) -> u32 {
        self.counter
    }
}

#[cfg(not(target_os = "espidf"))]
impl BlinkTimerPort for BlinkTimer {
    fn stop(&mut self) {
        self.running = false;
    }

    fn reset_counter(&mut self) {
        self.counter = 0;
    }

    fn set_reload(&mut self, reload: u32) {
        self.reload = reload;
    }

    fn start(&mut self) {
        self.running = true;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn reload(&self) -> u32 {
        self.reload
    }
}
