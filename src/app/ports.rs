//! Port traits — the boundary between the rate controller and the hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Sampler / BlinkDriver (domain)
//! ```
//!
//! Each peripheral is an owned handle exposing only the capabilities the
//! handlers need.  The [`Monitor`](super::service::Monitor) consumes them
//! via generics, so the domain never touches registers and tests can
//! substitute recording mocks.
//!
//! Ports are infallible: the core has no error path, and adapters absorb
//! driver errors (logging them) rather than surfacing them here.

// ───────────────────────────────────────────────────────────────
// ADC port (hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Latest completed conversion.
pub trait AdcPort {
    /// The most recent sample, reduced to 8 bits.
    fn read(&mut self) -> u8;
}

// ───────────────────────────────────────────────────────────────
// Blink timer port (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Periodic auto-reload timer.  Counts from zero up to the reload value,
/// raises a compare-match event, and wraps back to zero.
pub trait BlinkTimerPort {
    /// Stop counting.  The counter keeps its value.
    fn stop(&mut self);

    /// Zero the counter.
    fn reset_counter(&mut self);

    /// Install the compare value.  Takes effect for the current period.
    fn set_reload(&mut self, reload: u32);

    /// Start (or resume) counting in auto-reload mode.
    fn start(&mut self);

    /// Whether the counter is running.
    fn is_running(&self) -> bool;

    /// The compare value currently installed.
    fn reload(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// LED port (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Single binary output line.
pub trait LedPort {
    /// Flip the output.
    fn toggle(&mut self);

    /// Drive the output low.  Only used by the halt path.
    fn set_off(&mut self);

    /// Current output level.
    fn is_on(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
