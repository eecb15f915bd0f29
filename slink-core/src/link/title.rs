//! Title writer
//!
//! Writes a disc or track title to a MiniDisc deck. The title is split into
//! 16-byte segments and each segment is sent as its own frame. The deck
//! answers every segment with `B8 1F`; anything else (including silence)
//! counts as a failed attempt and the segment is sent again, up to the
//! configured number of attempts.
//!
//! Segment frames are not padded to a word: a reply is expected right
//! after them.

use slink_hal::{Clock, InputPin, OutputPin, PulseIn};
use slink_protocol::md;
use slink_protocol::{Frame, TitleBuffer, TitleError, TitleTarget};

use super::Slink;

impl<O, I, C> Slink<O, I, C>
where
    O: OutputPin,
    I: InputPin + PulseIn,
    C: Clock,
{
    /// Write the disc title
    pub fn write_disc_title(&mut self, title: &[u8]) -> Result<(), TitleError> {
        self.write_title(TitleTarget::Disc, title)
    }

    /// Write the title of track `track` (1-based)
    pub fn write_track_title(&mut self, track: u8, title: &[u8]) -> Result<(), TitleError> {
        self.write_title(TitleTarget::Track(track), title)
    }

    /// Write a title to the first MiniDisc deck
    pub fn write_title(&mut self, target: TitleTarget, title: &[u8]) -> Result<(), TitleError> {
        self.write_title_to(md::MD_DEVICE, target, title)
    }

    /// Write a title segment by segment to `device`
    ///
    /// Stops at the first segment that is never acknowledged. Segments
    /// already written stay on the deck.
    pub fn write_title_to(
        &mut self,
        device: u8,
        target: TitleTarget,
        title: &[u8],
    ) -> Result<(), TitleError> {
        let mut buffer = TitleBuffer::new();
        buffer.prepare(title)?;
        let ack = md::title_ack(device);

        for (n, segment) in buffer.segments().iter().enumerate() {
            let frame = target.segment_frame(device, n, segment)?;
            self.write_segment(&frame, ack, n as u8)?;
        }

        Ok(())
    }

    /// Send one segment frame until it is acknowledged
    fn write_segment(
        &mut self,
        frame: &Frame,
        ack: [u8; 2],
        segment: u8,
    ) -> Result<(), TitleError> {
        let settle = self.config.timing.ack_settle_us();
        let attempts = self.config.segment_attempts.max(1);

        for _attempt in 1..=attempts {
            self.wait_until_idle();
            self.write_frame(frame);
            self.clock.delay_us(settle);

            let mut reply = [0u8; 2];
            self.receive(&mut reply);
            self.clock.delay_us(settle);

            if reply == ack {
                #[cfg(feature = "defmt")]
                defmt::trace!("title segment {} written", segment);
                return Ok(());
            }

            #[cfg(feature = "defmt")]
            defmt::warn!(
                "segment {} attempt {}/{}: reply {:x}, resending",
                segment,
                _attempt,
                attempts,
                reply
            );
        }

        #[cfg(feature = "defmt")]
        defmt::error!("segment {} not acknowledged, giving up", segment);
        Err(TitleError::NotAcknowledged { segment })
    }
}
