//! Unified error types for the thermoblink firmware.
//!
//! The rate controller itself cannot fail: every 8-bit reading classifies
//! and every installed reload was checked when the configuration was
//! validated.  What remains is start-up: constant validation and
//! peripheral setup.  All variants are `Copy`.

use core::fmt;

use crate::drivers::hw_init::HwInitError;

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration constants violate a timer or sampling invariant.
    Config(&'static str),
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// The LED output line rejected a write.
    Led,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Led => write!(f, "LED output write failed"),
        }
    }
}

impl std::error::Error for Error {}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
