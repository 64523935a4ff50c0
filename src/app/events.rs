//! Outbound application events.
//!
//! The [`Monitor`](super::service::Monitor) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  The only adapter today
//! writes them to the serial log.

use core::fmt;

use crate::control::blink_rate::BlinkRate;

/// Structured events emitted by the rate controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The monitor is armed; `reload` is the pre-sample compare value.
    Started { reload: u32 },

    /// A sample moved the controller into a different state (or into its
    /// first state, when `from` is `None`).
    RateChanged {
        from: Option<BlinkRate>,
        to: BlinkRate,
        reading: u8,
        reload: u32,
    },

    /// The timer was stopped and the LED driven off.
    Halted,
}

/// One serial-log record per event.
impl fmt::Display for AppEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { reload } => write!(f, "START | initial reload={reload}"),
            Self::RateChanged {
                from: Some(from),
                to,
                reading,
                reload,
            } => write!(
                f,
                "RATE | {from:?} -> {to:?} | reading={reading} | reload={reload}"
            ),
            Self::RateChanged {
                from: None,
                to,
                reading,
                reload,
            } => write!(f, "RATE | -> {to:?} | reading={reading} | reload={reload}"),
            Self::Halted => f.write_str("HALT | blink timer stopped, LED off"),
        }
    }
}
