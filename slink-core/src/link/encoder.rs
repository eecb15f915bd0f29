//! Bit encoder
//!
//! Every mark asserts the bus for its nominal width, then releases it for
//! the delimiter. There is no feedback: the encoder cannot tell whether the
//! bus actually followed.

use slink_hal::{Clock, InputPin, OutputPin, PulseIn};
use slink_protocol::{byte_marks, Frame, Mark};

use super::Slink;

impl<O, I, C> Slink<O, I, C>
where
    O: OutputPin,
    I: InputPin + PulseIn,
    C: Clock,
{
    /// Emit one mark followed by its delimiter
    pub fn write_mark(&mut self, mark: Mark) {
        let timing = self.config.timing;
        self.mark_activity();

        self.assert_line();
        self.clock.delay_us(timing.mark_us(mark));
        self.release_line();
        self.clock.delay_us(timing.delimiter_us);
    }

    /// Emit a sync mark, starting a frame
    pub fn write_sync(&mut self) {
        self.write_mark(Mark::Sync);
    }

    /// Emit one byte, most significant bit first
    pub fn write_byte(&mut self, value: u8) {
        for mark in byte_marks(value) {
            self.write_mark(mark);
        }
    }

    /// Emit a whole frame: sync, device and every following byte
    ///
    /// Does not wait for an idle bus and does not pad.
    pub fn write_frame(&mut self, frame: &Frame) {
        for mark in frame.marks() {
            self.write_mark(mark);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LinePolarity, LinkConfig};
    use crate::sim::SimBus;
    use slink_hal::Level;

    #[test]
    fn test_sync_timing() {
        let bus = SimBus::new();
        let mut link = bus.link(LinkConfig::default());

        link.write_sync();
        assert_eq!(bus.edges(), [(0, Level::High), (2400, Level::Low)]);
        assert_eq!(bus.now_us(), 3000);
    }

    #[test]
    fn test_byte_msb_first() {
        let bus = SimBus::new();
        let mut link = bus.link(LinkConfig::default());

        link.write_byte(0xB0);
        assert_eq!(
            bus.marks(Level::High),
            [1200, 600, 1200, 1200, 600, 600, 600, 600]
        );
        // Every mark is followed by a 600us delimiter
        assert!(bus.marks(Level::Low).iter().all(|&w| w == 600));
        assert_eq!(bus.now_us(), 3 * 1200 + 5 * 600 + 8 * 600);
    }

    #[test]
    fn test_inverted_output() {
        let bus = SimBus::new();
        let mut config = LinkConfig::default();
        config.polarity = LinePolarity {
            output_active_high: false,
            input_active_low: true,
        };
        let mut link = bus.link(config);

        // Construction releases the bus by driving the output high
        assert_eq!(bus.output_level(), Level::High);

        link.write_sync();
        assert_eq!(bus.marks(Level::Low), [2400]);
        assert_eq!(bus.output_level(), Level::High);
    }

    #[test]
    fn test_write_frame() {
        let bus = SimBus::new();
        let config = LinkConfig::default();
        let mut link = bus.link(config);

        let frame = Frame::command(0xB0, &[0x00]).unwrap();
        link.write_frame(&frame);
        assert_eq!(bus.sent_frames(&config), [[0xB0, 0x00]]);
        assert_eq!(bus.now_us(), frame.duration_us(link.timing()));
    }
}
