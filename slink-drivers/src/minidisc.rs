//! MiniDisc deck front-end
//!
//! Named commands for a MiniDisc recorder on the bus. Every command is a
//! single [`Slink::send_command`]; replies are read separately with
//! [`MdDeck::read_reply`] or [`MdDeck::read_status`].

use slink_core::Slink;
use slink_hal::{Clock, InputPin, OutputPin, PulseIn};
use slink_protocol::md::{self, cmd, MdStatus};
use slink_protocol::{TitleError, TitleTarget};

/// A MiniDisc deck reachable over a link
pub struct MdDeck<O, I, C> {
    link: Slink<O, I, C>,
    device: u8,
}

impl<O, I, C> MdDeck<O, I, C>
where
    O: OutputPin,
    I: InputPin + PulseIn,
    C: Clock,
{
    /// Deck at the default MiniDisc address
    pub fn new(link: Slink<O, I, C>) -> Self {
        Self::with_address(link, md::MD_DEVICE)
    }

    /// Deck at a specific address
    pub fn with_address(link: Slink<O, I, C>, device: u8) -> Self {
        Self { link, device }
    }

    /// Device address
    pub fn address(&self) -> u8 {
        self.device
    }

    /// Underlying link
    pub fn link(&mut self) -> &mut Slink<O, I, C> {
        &mut self.link
    }

    /// Give back the link
    pub fn free(self) -> Slink<O, I, C> {
        self.link
    }

    fn command(&mut self, cmd1: u8, cmd2: Option<u8>, cmd3: Option<u8>) {
        self.link.send_command(self.device, cmd1, cmd2, cmd3);
    }

    /// Start playback
    pub fn play(&mut self) {
        self.command(cmd::PLAY, None, None);
    }

    /// Stop playback
    pub fn stop(&mut self) {
        self.command(cmd::STOP, None, None);
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.command(cmd::PAUSE, None, None);
    }

    /// Toggle between play and pause
    pub fn toggle_pause(&mut self) {
        self.command(cmd::TOGGLE_PAUSE, None, None);
    }

    /// Eject the disc
    pub fn eject(&mut self) {
        self.command(cmd::EJECT, None, None);
    }

    /// Skip to the next track
    pub fn skip_forward(&mut self) {
        self.command(cmd::SKIP_FORWARD, None, None);
    }

    /// Skip to the start of the track, or the previous one
    pub fn skip_back(&mut self) {
        self.command(cmd::SKIP_BACK, None, None);
    }

    /// Switch the deck on
    pub fn power_on(&mut self) {
        self.command(cmd::POWER_ON, None, None);
    }

    /// Switch the deck to standby
    pub fn power_off(&mut self) {
        self.command(cmd::POWER_OFF, None, None);
    }

    /// Start playback at `track` of `disc`
    pub fn play_track(&mut self, disc: u8, track: u8) {
        self.command(cmd::PLAY_DIRECT_TRACK, Some(disc), Some(track));
    }

    /// Cue `track` of `disc` in pause
    pub fn pause_track(&mut self, disc: u8, track: u8) {
        self.command(cmd::PAUSE_DIRECT_TRACK, Some(disc), Some(track));
    }

    /// Erase `track`
    pub fn erase_track(&mut self, track: u8) {
        self.command(cmd::ERASE_TRACK, Some(track), None);
    }

    /// Move track `from` to position `to`
    pub fn move_track(&mut self, from: u8, to: u8) {
        self.command(cmd::MOVE_TRACK, Some(from), Some(to));
    }

    /// Join `track` onto the track before it
    pub fn combine_with_previous(&mut self, track: u8) {
        self.command(cmd::COMBINE_WITH_PREVIOUS, Some(track), None);
    }

    /// Request disc information
    pub fn query_disc_info(&mut self) {
        let [c1, c2, c3] = cmd::DISC_INFO;
        self.command(c1, Some(c2), Some(c3));
    }

    /// Request length and status of `track` on `disc`
    pub fn query_track(&mut self, disc: u8, track: u8) {
        self.command(cmd::QUERY_TRACK, Some(disc), Some(track));
    }

    /// Request the title of `disc`
    pub fn query_disc_name(&mut self, disc: u8) {
        self.command(cmd::QUERY_DISC_NAME, Some(disc), Some(0x00));
    }

    /// Request the title of `track`
    pub fn query_track_name(&mut self, track: u8) {
        self.command(cmd::QUERY_TRACK_NAME, Some(track), Some(0x00));
    }

    /// Write the disc title
    pub fn write_disc_title(&mut self, title: &[u8]) -> Result<(), TitleError> {
        self.link.write_title_to(self.device, TitleTarget::Disc, title)
    }

    /// Write the title of `track`
    pub fn write_track_title(&mut self, track: u8, title: &[u8]) -> Result<(), TitleError> {
        self.link.write_title_to(self.device, TitleTarget::Track(track), title)
    }

    /// Receive a raw reply into `buf`, returning the bytes decoded
    pub fn read_reply(&mut self, buf: &mut [u8]) -> usize {
        self.link.receive(buf)
    }

    /// Receive a two-byte status reply from this deck
    ///
    /// `None` on silence, a reply from another address, or an unknown code.
    pub fn read_status(&mut self) -> Option<MdStatus> {
        let mut reply = [0u8; 2];
        if self.read_reply(&mut reply) < 2 || reply[0] != md::reply_address(self.device) {
            return None;
        }
        MdStatus::from_byte(reply[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slink_core::sim::{SimBus, SimClock, SimInput, SimLink, SimOutput};
    use slink_core::LinkConfig;

    fn deck(bus: &SimBus) -> MdDeck<SimOutput, SimInput, SimClock> {
        MdDeck::new(bus.link(LinkConfig::default()))
    }

    #[test]
    fn test_named_commands() {
        let bus = SimBus::new();
        let mut deck = deck(&bus);

        deck.play();
        deck.play_track(1, 7);
        deck.erase_track(3);
        deck.query_disc_info();
        deck.query_track_name(2);

        let frames = bus.sent_frames(&LinkConfig::default());
        assert_eq!(frames[0], [0xB0, 0x00]);
        assert_eq!(frames[1], [0xB0, 0x50, 0x01, 0x07]);
        assert_eq!(frames[2], [0xB0, 0x40, 0x03]);
        assert_eq!(frames[3], [0xB0, 0x97, 0x01, 0x00]);
        assert_eq!(frames[4], [0xB0, 0x5A, 0x02, 0x00]);
    }

    #[test]
    fn test_read_status() {
        let bus = SimBus::new();
        let config = LinkConfig::default();
        let mut deck = deck(&bus);

        bus.queue_frame(&config.timing, &[0xB8, 0x18]);
        assert_eq!(deck.read_status(), Some(MdStatus::DoorOpen));

        // Reply from another deck
        bus.queue_frame(&config.timing, &[0xB9, 0x00]);
        assert_eq!(deck.read_status(), None);

        // Silence
        assert_eq!(deck.read_status(), None);
    }

    #[test]
    fn test_title_through_deck() {
        let bus = SimBus::new();
        let config = LinkConfig::default();
        bus.queue_frame(&config.timing, &md::TITLE_ACK);
        let mut deck = deck(&bus);

        assert_eq!(deck.write_track_title(4, b"Intro"), Ok(()));
        let frames = bus.sent_frames(&config);
        assert_eq!(&frames[0][..3], &[0xB0, 0x9A, 0x04]);

        let _: SimLink = deck.free();
    }
}
