//! `embedded-hal` pin adapters
//!
//! Lets the link run on any MCU HAL that implements the `embedded-hal` 1.0
//! digital traits. Pulses are measured by polling, so the clock handed to
//! [`EhInput`] must be the same time base the link uses.
//!
//! The bus has no feedback path: write errors are dropped, and a pin that
//! cannot be read is reported at its idle level.

use core::cell::RefCell;

use embedded_hal::digital::{self, InputPin as _, OutputPin as _};
use slink_hal::{measure_pulse, Clock, InputPin, Level, OutputPin, PulseIn};

/// Output line over an `embedded-hal` output pin
pub struct EhOutput<P> {
    pin: P,
    high: bool,
}

impl<P: digital::OutputPin> EhOutput<P> {
    /// Wrap `pin`, driving it low
    pub fn new(pin: P) -> Self {
        let mut output = Self { pin, high: true };
        output.set_low();
        output
    }

    /// Unwrap the pin
    pub fn free(self) -> P {
        self.pin
    }
}

impl<P: digital::OutputPin> OutputPin for EhOutput<P> {
    fn set_high(&mut self) {
        let _ = self.pin.set_high();
        self.high = true;
    }

    fn set_low(&mut self) {
        let _ = self.pin.set_low();
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Input line over an `embedded-hal` input pin
///
/// `embedded-hal` reads take `&mut self`; the pin sits in a `RefCell` so it
/// can be sampled through the shared-reference [`InputPin`] trait.
pub struct EhInput<P, C> {
    pin: RefCell<P>,
    clock: C,
    idle: Level,
}

impl<P: digital::InputPin, C: Clock> EhInput<P, C> {
    /// Wrap `pin` for a bus that idles high
    pub fn new(pin: P, clock: C) -> Self {
        Self::with_idle_level(pin, clock, Level::High)
    }

    /// Wrap `pin` for a bus that idles at `idle`
    pub fn with_idle_level(pin: P, clock: C, idle: Level) -> Self {
        Self {
            pin: RefCell::new(pin),
            clock,
            idle,
        }
    }

    /// Unwrap the pin and clock
    pub fn free(self) -> (P, C) {
        (self.pin.into_inner(), self.clock)
    }
}

impl<P: digital::InputPin, C: Clock> InputPin for EhInput<P, C> {
    fn is_high(&self) -> bool {
        match self.pin.borrow_mut().is_high() {
            Ok(high) => high,
            Err(_) => self.idle == Level::High,
        }
    }
}

impl<P: digital::InputPin, C: Clock> PulseIn for EhInput<P, C> {
    fn pulse_in(&mut self, level: Level, timeout_us: u32) -> u32 {
        measure_pulse(&*self, &self.clock, level, timeout_us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;

    struct MockOut<'a> {
        high: &'a Cell<bool>,
    }

    impl digital::ErrorType for MockOut<'_> {
        type Error = Infallible;
    }

    impl digital::OutputPin for MockOut<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high.set(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high.set(true);
            Ok(())
        }
    }

    /// Input low inside one window of a shared tick counter
    struct MockIn<'a> {
        now: &'a Cell<u32>,
        low: (u32, u32),
        broken: bool,
    }

    impl digital::ErrorType for MockIn<'_> {
        type Error = digital::ErrorKind;
    }

    impl digital::InputPin for MockIn<'_> {
        fn is_high(&mut self) -> Result<bool, digital::ErrorKind> {
            if self.broken {
                return Err(digital::ErrorKind::Other);
            }
            let t = self.now.get();
            Ok(!(t >= self.low.0 && t < self.low.1))
        }

        fn is_low(&mut self) -> Result<bool, digital::ErrorKind> {
            digital::InputPin::is_high(self).map(|h| !h)
        }
    }

    /// Clock that advances one microsecond on every read
    struct TickClock<'a> {
        now: &'a Cell<u32>,
    }

    impl Clock for TickClock<'_> {
        fn now_us(&self) -> u32 {
            let t = self.now.get();
            self.now.set(t + 1);
            t
        }

        fn delay_us(&mut self, us: u32) {
            self.now.set(self.now.get() + us);
        }
    }

    #[test]
    fn test_output_tracks_level() {
        let high = Cell::new(true);
        let mut out = EhOutput::new(MockOut { high: &high });
        assert!(!high.get());
        assert!(!out.is_set_high());

        out.set_level(Level::High);
        assert!(high.get());
        assert!(out.is_set_high());
    }

    #[test]
    fn test_input_measures_pulse() {
        let now = Cell::new(0);
        let pin = MockIn {
            now: &now,
            low: (50, 1250),
            broken: false,
        };
        let mut input = EhInput::new(pin, TickClock { now: &now });

        let width = input.pulse_in(Level::Low, 55_000);
        assert!((1195..=1205).contains(&width), "width = {}", width);
    }

    #[test]
    fn test_read_error_is_idle() {
        let now = Cell::new(0);
        let pin = MockIn {
            now: &now,
            low: (0, u32::MAX),
            broken: true,
        };
        let input = EhInput::new(pin, TickClock { now: &now });
        assert!(input.is_high());

        let pin = MockIn {
            now: &now,
            low: (0, u32::MAX),
            broken: true,
        };
        let input = EhInput::with_idle_level(pin, TickClock { now: &now }, Level::Low);
        assert!(input.is_low());
    }
}
