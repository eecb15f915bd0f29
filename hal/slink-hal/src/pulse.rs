//! Pulse width measurement
//!
//! The receive side of the protocol never looks at individual edges; it
//! only asks "how long was the next pulse at this level". Chips with edge
//! capture or PIO can implement [`PulseIn`] directly, everything else can
//! delegate to the polling [`measure_pulse`].

use crate::gpio::{InputPin, Level};
use crate::time::Clock;

/// Input line that can measure pulse widths
pub trait PulseIn {
    /// Measure the width of the next pulse at `level`, in microseconds
    ///
    /// A pulse already in progress when called is skipped. Returns 0 when no
    /// complete pulse was seen within `timeout_us`.
    fn pulse_in(&mut self, level: Level, timeout_us: u32) -> u32;
}

/// Measure a pulse by polling `pin` against `clock`
///
/// The timeout covers the whole operation: waiting for a pulse in progress
/// to end, waiting for the next one to start, and the pulse itself.
pub fn measure_pulse<P, C>(pin: &P, clock: &C, level: Level, timeout_us: u32) -> u32
where
    P: InputPin + ?Sized,
    C: Clock + ?Sized,
{
    let start = clock.now_us();

    // Skip a pulse that is already in progress
    while pin.level() == level {
        if clock.elapsed_us(start) >= timeout_us {
            return 0;
        }
    }

    // Wait for the pulse to start
    while pin.level() != level {
        if clock.elapsed_us(start) >= timeout_us {
            return 0;
        }
    }

    let pulse_start = clock.now_us();
    while pin.level() == level {
        if clock.elapsed_us(start) >= timeout_us {
            return 0;
        }
    }

    clock.elapsed_us(pulse_start)
}
