//! Thermoblink firmware library.
//!
//! A temperature sample classified against a fixed threshold selects one
//! of two LED blink rates.  Exposes the pure-logic modules for integration
//! testing.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module; on the host the
//! drivers are in-memory simulations.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod events;
pub mod pins;
