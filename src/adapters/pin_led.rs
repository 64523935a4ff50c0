//! LED output line over `embedded-hal` 1.0.
//!
//! Any [`StatefulOutputPin`] works: `esp_idf_hal::gpio::PinDriver` on
//! target, a plain struct in tests.  Toggling uses the pin's own
//! `toggle()`, so the line is flipped rather than set.

use embedded_hal::digital::{Error as _, StatefulOutputPin};
use log::warn;

use crate::app::ports::LedPort;
use crate::error::Error;

pub struct PinLed<P> {
    pin: P,
    on: bool,
}

impl<P: StatefulOutputPin> PinLed<P> {
    /// Take the pin and drive it low.
    pub fn new(mut pin: P) -> Result<Self, Error> {
        pin.set_low().map_err(|_| Error::Led)?;
        Ok(Self { pin, on: false })
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: StatefulOutputPin> LedPort for PinLed<P> {
    fn toggle(&mut self) {
        match self.pin.toggle() {
            Ok(()) => self.on = !self.on,
            // A lost toggle only shifts the blink phase.
            Err(e) => warn!("led: toggle failed ({:?})", e.kind()),
        }
    }

    fn set_off(&mut self) {
        match self.pin.set_low() {
            Ok(()) => self.on = false,
            Err(e) => warn!("led: set_low failed ({:?})", e.kind()),
        }
    }

    fn is_on(&self) -> bool {
        self.on
    }
}
