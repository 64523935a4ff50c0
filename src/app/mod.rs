//! Application core — pure domain logic, zero I/O.
//!
//! The two event handlers ([`sampler`], [`blink_driver`]) and the
//! [`service`] that routes events to them.  All interaction with hardware
//! happens through **port traits** defined in [`ports`], keeping this
//! layer fully testable without real peripherals.

pub mod blink_driver;
pub mod events;
pub mod ports;
pub mod sampler;
pub mod service;
