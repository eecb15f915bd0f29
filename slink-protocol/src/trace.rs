//! Line monitor decoding
//!
//! Turns a stream of measured pulse widths into trace events for debugging a
//! live bus. Unlike [`crate::FrameDecoder`] the trace decoder never stops: it
//! resynchronises on every sync mark and reports whatever it sees.

use heapless::Vec;

use crate::timing::{Mark, TimingProfile};

/// What the monitor reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MonitorMode {
    /// Raw pulse widths
    Timing,
    /// Sync marks and individual bits
    Bits,
    /// Sync marks and assembled bytes
    Bytes,
}

/// A single monitor observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TraceEvent {
    /// No pulse within the per-pulse timeout
    Gap,
    /// Raw pulse width in µs
    Width(u32),
    /// Sync mark seen
    Start,
    /// Decoded bit
    Bit(bool),
    /// Eight pulses assembled MSB first
    Byte(u8),
}

/// Streaming decoder for the line monitor
#[derive(Debug, Clone)]
pub struct TraceDecoder {
    timing: TimingProfile,
    mode: MonitorMode,
    count: u8,
    accumulator: u8,
    idle: bool,
}

impl TraceDecoder {
    /// Create a decoder in `mode`
    pub fn new(timing: TimingProfile, mode: MonitorMode) -> Self {
        Self {
            timing,
            mode,
            count: 0,
            accumulator: 0,
            idle: false,
        }
    }

    /// Current mode
    pub fn mode(&self) -> MonitorMode {
        self.mode
    }

    /// Feed one measured width, 0 meaning no pulse arrived
    ///
    /// Consecutive timeouts are collapsed into a single [`TraceEvent::Gap`].
    pub fn feed(&mut self, width_us: u32, mut emit: impl FnMut(TraceEvent)) {
        if width_us == 0 {
            if !self.idle {
                emit(TraceEvent::Gap);
                self.idle = true;
            }
            self.reset();
            return;
        }
        self.idle = false;

        if self.mode == MonitorMode::Timing {
            emit(TraceEvent::Width(width_us));
            return;
        }

        match self.timing.classify(width_us) {
            Some(Mark::Sync) => {
                emit(TraceEvent::Start);
                self.reset();
                return;
            }
            Some(Mark::One) => {
                self.accumulator |= 0x80 >> self.count;
                self.emit_bit(true, &mut emit);
            }
            Some(Mark::Zero) => self.emit_bit(false, &mut emit),
            None => {}
        }

        // Every pulse counts toward a byte, recognised or not
        self.count += 1;
        if self.count == 8 {
            if self.mode == MonitorMode::Bytes {
                emit(TraceEvent::Byte(self.accumulator));
            }
            self.reset();
        }
    }

    fn emit_bit(&self, bit: bool, emit: &mut impl FnMut(TraceEvent)) {
        if self.mode == MonitorMode::Bits {
            emit(TraceEvent::Bit(bit));
        }
    }

    fn reset(&mut self) {
        self.count = 0;
        self.accumulator = 0;
    }
}

/// Bounded event log
///
/// Events past capacity are counted and discarded.
#[derive(Debug, Clone, Default)]
pub struct Trace<const N: usize> {
    events: Vec<TraceEvent, N>,
    dropped: u32,
}

impl<const N: usize> Trace<N> {
    /// Create an empty trace
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            dropped: 0,
        }
    }

    /// Append an event
    pub fn push(&mut self, event: TraceEvent) {
        if self.events.push(event).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }

    /// Recorded events
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Events discarded because the trace was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Check if the trace is full
    pub fn is_full(&self) -> bool {
        self.events.is_full()
    }

    /// Remove all events
    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::byte_marks;

    fn run<const N: usize>(mode: MonitorMode, widths: &[u32]) -> Trace<N> {
        let timing = TimingProfile::default();
        let mut decoder = TraceDecoder::new(timing, mode);
        let mut trace = Trace::new();
        for &w in widths {
            decoder.feed(w, |e| trace.push(e));
        }
        trace
    }

    fn byte_widths(byte: u8) -> [u32; 8] {
        let timing = TimingProfile::default();
        byte_marks(byte).map(|m| timing.mark_us(m))
    }

    #[test]
    fn test_timing_mode_reports_widths() {
        let trace = run::<8>(MonitorMode::Timing, &[2400, 0, 0, 613]);
        assert_eq!(
            trace.events(),
            &[
                TraceEvent::Width(2400),
                TraceEvent::Gap,
                TraceEvent::Width(613)
            ]
        );
    }

    #[test]
    fn test_bytes_mode() {
        let mut widths = [0u32; 17];
        widths[0] = 2400;
        widths[1..9].copy_from_slice(&byte_widths(0xB8));
        widths[9..].copy_from_slice(&byte_widths(0x1F));

        let trace = run::<8>(MonitorMode::Bytes, &widths);
        assert_eq!(
            trace.events(),
            &[
                TraceEvent::Start,
                TraceEvent::Byte(0xB8),
                TraceEvent::Byte(0x1F)
            ]
        );
    }

    #[test]
    fn test_bits_mode() {
        let trace = run::<16>(MonitorMode::Bits, &[2400, 1200, 600, 1200]);
        assert_eq!(
            trace.events(),
            &[
                TraceEvent::Start,
                TraceEvent::Bit(true),
                TraceEvent::Bit(false),
                TraceEvent::Bit(true)
            ]
        );
    }

    #[test]
    fn test_unknown_widths_still_count() {
        let mut widths = [900u32; 8];
        widths[0] = 1200;
        let trace = run::<4>(MonitorMode::Bytes, &widths);
        assert_eq!(trace.events(), &[TraceEvent::Byte(0x80)]);
    }

    #[test]
    fn test_gap_resets_partial_byte() {
        let mut widths = [0u32; 12];
        widths[..4].copy_from_slice(&[1200; 4]);
        widths[4] = 0;
        widths[5..].copy_from_slice(&[600; 7]);
        let trace = run::<4>(MonitorMode::Bytes, &widths);
        // 4 pulses discarded by the gap, 7 remaining do not complete a byte
        assert_eq!(trace.events(), &[TraceEvent::Gap]);
    }

    #[test]
    fn test_trace_overflow() {
        let trace = run::<2>(MonitorMode::Timing, &[600, 600, 600, 600]);
        assert!(trace.is_full());
        assert_eq!(trace.events().len(), 2);
        assert_eq!(trace.dropped(), 2);
    }
}
