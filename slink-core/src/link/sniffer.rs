//! Passive bus monitor
//!
//! Listens to the bus for a fixed time and reports what it sees through a
//! [`TraceDecoder`]. Used to debug wiring and to learn the codes a deck
//! sends; the link never transmits while monitoring.

use slink_hal::{Clock, InputPin, OutputPin, PulseIn};
use slink_protocol::{MonitorMode, Trace, TraceDecoder, TraceEvent};

use super::Slink;

/// Per-pulse timeout while monitoring
pub const MONITOR_PULSE_TIMEOUT_US: u32 = 5_000;

/// Which part of the signal to measure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseKind {
    /// Asserted periods (sync, one and zero marks)
    Mark,
    /// Released periods (delimiters, 600us on a healthy bus)
    ///
    /// Only meaningful with [`MonitorMode::Timing`].
    Gap,
}

impl<O, I, C> Slink<O, I, C>
where
    O: OutputPin,
    I: InputPin + PulseIn,
    C: Clock,
{
    /// Monitor the bus for `duration_us`, recording into `trace`
    pub fn monitor<const N: usize>(
        &mut self,
        mode: MonitorMode,
        kind: PulseKind,
        duration_us: u32,
        trace: &mut Trace<N>,
    ) {
        self.monitor_with(mode, kind, duration_us, |event| trace.push(event));
    }

    /// Monitor the bus for `duration_us`, passing every event to `emit`
    pub fn monitor_with(
        &mut self,
        mode: MonitorMode,
        kind: PulseKind,
        duration_us: u32,
        mut emit: impl FnMut(TraceEvent),
    ) {
        let level = match kind {
            PulseKind::Mark => self.config.polarity.input_asserted_level(),
            PulseKind::Gap => self.config.polarity.input_released_level(),
        };
        let mut decoder = TraceDecoder::new(self.config.timing, mode);
        let start = self.clock.now_us();

        while self.clock.elapsed_us(start) < duration_us {
            let width = self.input.pulse_in(level, MONITOR_PULSE_TIMEOUT_US);
            decoder.feed(width, &mut emit);
        }

        self.mark_activity();
    }
}
