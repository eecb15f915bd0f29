//! GPIO lines for the S-Link interface
//!
//! The output pin drives the bus through a transistor; the input pin reads
//! the bus directly (usually via the deck's own level shifter).

use embassy_rp::gpio::{Input, Level as RpLevel, Output, Pin, Pull};
use embassy_rp::Peri;
use slink_hal::{measure_pulse, Level};

use crate::time::EmbassyClock;

/// Output line driving the bus
pub struct BusOutput<'d> {
    pin: Output<'d>,
}

impl<'d> BusOutput<'d> {
    /// Create the output line, starting low
    pub fn new<P: Pin>(pin: Peri<'d, P>) -> Self {
        Self {
            pin: Output::new(pin, RpLevel::Low),
        }
    }
}

impl slink_hal::OutputPin for BusOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Input line reading the bus
pub struct BusInput<'d> {
    pin: Input<'d>,
    clock: EmbassyClock,
}

impl<'d> BusInput<'d> {
    /// Create the input line
    ///
    /// The bus idles high through the deck's pull-up, so no internal pull
    /// is enabled by default.
    pub fn new<P: Pin>(pin: Peri<'d, P>) -> Self {
        Self::with_pull(pin, Pull::None)
    }

    /// Create the input line with an explicit pull resistor
    pub fn with_pull<P: Pin>(pin: Peri<'d, P>, pull: Pull) -> Self {
        Self {
            pin: Input::new(pin, pull),
            clock: EmbassyClock::new(),
        }
    }
}

impl slink_hal::InputPin for BusInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

impl slink_hal::PulseIn for BusInput<'_> {
    fn pulse_in(&mut self, level: Level, timeout_us: u32) -> u32 {
        measure_pulse(&*self, &self.clock, level, timeout_us)
    }
}
