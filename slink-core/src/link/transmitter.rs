//! Command transmitter
//!
//! A command is sent as one word: wait for an idle bus, emit the frame,
//! then keep the bus quiet until `word_gap_us` has passed since the frame
//! started. Padding stops early when another device starts talking.

use slink_hal::{Clock, InputPin, OutputPin, PulseIn};
use slink_protocol::Frame;

use super::Slink;

impl<O, I, C> Slink<O, I, C>
where
    O: OutputPin,
    I: InputPin + PulseIn,
    C: Clock,
{
    /// Send a command to `device`
    ///
    /// Optional bytes are emitted only when present, in order.
    pub fn send_command(&mut self, device: u8, cmd1: u8, cmd2: Option<u8>, cmd3: Option<u8>) {
        self.wait_until_idle();
        let start = self.clock.now_us();

        self.write_sync();
        self.write_byte(device);
        self.write_byte(cmd1);
        for byte in [cmd2, cmd3].into_iter().flatten() {
            self.write_byte(byte);
        }

        self.pad_word(start);
    }

    /// Send a prebuilt frame as one word
    pub fn send(&mut self, frame: &Frame) {
        self.wait_until_idle();
        let start = self.clock.now_us();
        self.write_frame(frame);
        self.pad_word(start);
    }

    /// Hold the bus released until the word gap has passed
    fn pad_word(&mut self, start: u32) {
        let timing = self.config.timing;
        loop {
            self.clock.delay_us(timing.idle_poll_us);
            if self.is_line_asserted() {
                // Incoming traffic; yield the bus now
                break;
            }
            if self.clock.elapsed_us(start) >= timing.word_gap_us {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LinkConfig;
    use crate::sim::SimBus;
    use slink_protocol::md;

    #[test]
    fn test_command_is_padded_to_word_gap() {
        let bus = SimBus::new();
        let config = LinkConfig::default();
        let mut link = bus.link(config);

        link.send_command(md::MD_DEVICE, md::cmd::PLAY, None, None);

        assert_eq!(bus.sent_frames(&config), [[0xB0, 0x00]]);
        // 5ms idle wait, then 45ms word
        let word = bus.now_us() - 5_000;
        assert!((45_000..45_000 + 25).contains(&word), "word {}", word);
    }

    #[test]
    fn test_optional_command_bytes() {
        let bus = SimBus::new();
        let config = LinkConfig::default();
        let mut link = bus.link(config);

        link.send_command(0xB0, 0x50, Some(0x01), Some(0x05));
        link.send_command(0xB0, 0x45, None, Some(0x03));

        assert_eq!(
            bus.sent_frames(&config),
            [std::vec![0xB0, 0x50, 0x01, 0x05], std::vec![0xB0, 0x45, 0x03]]
        );
    }

    #[test]
    fn test_incoming_traffic_cuts_padding() {
        let bus = SimBus::new();
        let config = LinkConfig::default();
        let mut link = bus.link(config);

        // Frame runs 5000..~25000; reply starts at 30ms
        bus.hold_busy(30_000, 32_400);
        link.send_command(0xB0, 0x01, None, None);

        let now = bus.now_us();
        assert!((30_000..30_000 + 25).contains(&now), "now {}", now);
    }

    #[test]
    fn test_send_frame() {
        let bus = SimBus::new();
        let config = LinkConfig::default();
        let mut link = bus.link(config);

        let frame = Frame::command(0xB0, &md::cmd::DISC_INFO).unwrap();
        link.send(&frame);

        assert_eq!(bus.sent_frames(&config), [[0xB0, 0x97, 0x01, 0x00]]);
        assert!(bus.now_us() >= 5_000 + 45_000);
    }
}
