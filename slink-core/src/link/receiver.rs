//! Frame receiver
//!
//! Measures asserted pulses on the input line and feeds them to the
//! protocol decoder until the buffer is full or `receive_timeout_us`
//! passes. Each measurement is bounded by `pulse_timeout_us`, which is far
//! longer than any mark, so silence reads as a timeout rather than a pulse.

use slink_hal::{Clock, InputPin, OutputPin, PulseIn};
use slink_protocol::FrameDecoder;

use super::Slink;

impl<O, I, C> Slink<O, I, C>
where
    O: OutputPin,
    I: InputPin + PulseIn,
    C: Clock,
{
    /// Receive up to `buf.len()` bytes
    ///
    /// The buffer is zero-filled first. Returns the number of complete bytes
    /// decoded; a silent or garbled bus gives a short count, never an error.
    pub fn receive(&mut self, buf: &mut [u8]) -> usize {
        let timing = self.config.timing;
        let level = self.config.polarity.input_asserted_level();
        let start = self.clock.now_us();
        let mut decoder = FrameDecoder::new(timing, buf);

        while !decoder.is_done() && self.clock.elapsed_us(start) < timing.receive_timeout_us {
            let width = self.input.pulse_in(level, timing.pulse_timeout_us);
            decoder.feed(width);
        }

        self.mark_activity();
        decoder.received()
    }
}
