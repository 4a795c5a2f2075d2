//! Indicator LED (single colour, active HIGH): home and mute indicators.
//!
//! On ESP-IDF the pin is an `esp_idf_svc::hal` output driver; on host/test any
//! `embedded-hal` output pin works.

use embedded_hal::digital::OutputPin;

pub struct IndicatorLed<P> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> IndicatorLed<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, on: false }
    }

    pub fn set(&mut self, on: bool) -> Result<(), P::Error> {
        if on {
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }
        self.on = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
