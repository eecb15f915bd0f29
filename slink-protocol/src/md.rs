//! MiniDisc deck command and status codes
//!
//! Reference: http://boehmel.de/slink.htm. Argument bytes are noted as
//! `DD` (disc), `TT` (track), `BB` (title block) and `CC` (character).

/// Address of the first MiniDisc deck
pub const MD_DEVICE: u8 = 0xB0;

/// Address a MiniDisc deck replies from
pub const MD_REPLY: u8 = reply_address(MD_DEVICE);

/// Status byte confirming stored title text
pub const WRITTEN_TO_MEMORY: u8 = 0x1F;

/// Reply confirming a stored title segment
pub const TITLE_ACK: [u8; 2] = [MD_REPLY, WRITTEN_TO_MEMORY];

/// Address replies from `device` are sent from
pub const fn reply_address(device: u8) -> u8 {
    device | 0x08
}

/// Title segment acknowledgement expected from `device`
pub const fn title_ack(device: u8) -> [u8; 2] {
    [reply_address(device), WRITTEN_TO_MEMORY]
}

/// Commands sent to a MiniDisc deck
pub mod cmd {
    pub const PLAY: u8 = 0x00;
    pub const STOP: u8 = 0x01;
    pub const PAUSE: u8 = 0x02;
    pub const TOGGLE_PAUSE: u8 = 0x03;
    pub const EJECT: u8 = 0x04;
    pub const REC_PAUSE: u8 = 0x07;
    pub const SKIP_FORWARD: u8 = 0x08;
    pub const SKIP_BACK: u8 = 0x09;
    pub const TRACK_REC: u8 = 0x0A;
    pub const QUERY_STORE: u8 = 0x0E;
    pub const SETUP_INFO: u8 = 0x0F;
    pub const FAST_FORWARD: u8 = 0x10;
    pub const FAST_REWIND: u8 = 0x11;
    pub const SLOW_FORWARD: u8 = 0x12;
    pub const SLOW_REWIND: u8 = 0x13;
    pub const NORMAL: u8 = 0x1F;
    pub const DISABLE_REMOTE: u8 = 0x20;
    pub const ENABLE_REMOTE: u8 = 0x21;
    pub const DEVICE_TYPE: u8 = 0x22;
    pub const AUTO_PAUSE_OFF: u8 = 0x23;
    pub const AUTO_PAUSE_ON: u8 = 0x24;
    pub const TIME_UPDATE_ON: u8 = 0x25;
    pub const TIME_UPDATE_OFF: u8 = 0x26;
    pub const POWER_ON: u8 = 0x2E;
    pub const POWER_OFF: u8 = 0x2F;
    pub const DIVIDE: u8 = 0x32;
    pub const MENU_YES: u8 = 0x33;
    pub const MENU_NO: u8 = 0x34;
    pub const UNDO: u8 = 0x35;
    pub const DEVICE_KEYS_DISABLE: u8 = 0x3E;
    pub const DEVICE_KEYS_ENABLE: u8 = 0x3F;
    /// `40 TT`
    pub const ERASE_TRACK: u8 = 0x40;
    /// `41 TT TT`
    pub const MOVE_TRACK: u8 = 0x41;
    /// `42 TT`
    pub const COMBINE_WITH_PREVIOUS: u8 = 0x42;
    /// `43 TT`
    pub const COMBINE_WITH_TRACK: u8 = 0x43;
    /// `44 DD`
    pub const QUERY_DISC: u8 = 0x44;
    /// `45 DD TT`
    pub const QUERY_TRACK: u8 = 0x45;
    /// `46 DD`
    pub const SPLIT_ADJUST: u8 = 0x46;
    /// `50 DD TT`
    pub const PLAY_DIRECT_TRACK: u8 = 0x50;
    /// `51 DD TT`
    pub const PAUSE_DIRECT_TRACK: u8 = 0x51;
    /// `54 DD`
    pub const REMAINING_TIME: u8 = 0x54;
    /// `58 DD 00`
    pub const QUERY_DISC_NAME: u8 = 0x58;
    /// `5A TT 00`
    pub const QUERY_TRACK_NAME: u8 = 0x5A;
    pub const DEVICE_NAME: u8 = 0x6A;
    /// `72 TT`
    pub const REC_DATE: u8 = 0x72;
    /// `76 DD TT`
    pub const COMBINE_A_B: u8 = 0x76;
    pub const ERASE_SET_A: u8 = 0x78;
    pub const ERASE_SET_B: u8 = 0x79;
    pub const ADJUST_A: u8 = 0x7A;
    pub const ADJUST_B: u8 = 0x7B;
    pub const ERASE_CONFIRM_A: u8 = 0x7C;
    pub const ERASE_CONFIRM: u8 = 0x7D;
    /// Three-byte disc info request
    pub const DISC_INFO: [u8; 3] = [0x97, 0x01, 0x00];
    /// `98 DD 00 00 [14 x CC]`
    pub const WRITE_DISC_TEXT: u8 = 0x98;
    /// `99 BB [16 x CC]`
    pub const WRITE_DISC_MORE: u8 = 0x99;
    /// `9A TT 00 00 [14 x CC]`
    pub const WRITE_TRACK_TEXT: u8 = 0x9A;
    /// `9B BB [16 x CC]`
    pub const WRITE_TRACK_MORE: u8 = 0x9B;
}

/// Status messages sent by a MiniDisc deck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MdStatus {
    Play,
    Stop,
    Pause,
    TocUpdate,
    RecPlay,
    Ignored,
    Seeking,
    RecPause,
    Ready,
    TrackStart,
    ThirtySecondsToEnd,
    Unavailable,
    Error,
    NoMemo,
    NoDeletedFile,
    NoGroup,
    InvalidDisc,
    InvalidDiscOrTrack,
    NoDiscName,
    NoTrackName,
    DoorOpen,
    NoGroupCd,
    NoCdText,
    /// Title text stored; the success reply to a title segment
    WrittenToMemory,
    PowerOn,
    PowerOff,
    NoSuchEntry,
    Complete,
    TrackStatus,
    TimeUpdate,
    RemainingTime,
    DiscText,
    DiscTextMore,
    TrackText,
    TrackTextMore,
    DiscInfo,
    DiscCapacity,
    TrackInfo,
    DeviceName,
    DeviceStatus,
    TocRead,
}

impl MdStatus {
    /// Parse a status from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        use MdStatus::*;
        Some(match byte {
            0x00 => Play,
            0x01 => Stop,
            0x02 => Pause,
            0x03 => TocUpdate,
            0x04 => RecPlay,
            0x05 => Ignored,
            0x06 => Seeking,
            0x07 => RecPause,
            0x08 => Ready,
            0x09 => TrackStart,
            0x0C => ThirtySecondsToEnd,
            0x0E => Unavailable,
            0x0F => Error,
            0x10 => NoMemo,
            0x11 => NoDeletedFile,
            0x12 => NoGroup,
            0x14 => InvalidDisc,
            0x15 => InvalidDiscOrTrack,
            0x16 => NoDiscName,
            0x17 => NoTrackName,
            0x18 => DoorOpen,
            0x19 => NoGroupCd,
            0x1D => NoCdText,
            0x1F => WrittenToMemory,
            0x2E => PowerOn,
            0x2F => PowerOff,
            0x31 => NoSuchEntry,
            0x33 => Complete,
            0x50 => TrackStatus,
            0x51 => TimeUpdate,
            0x54 => RemainingTime,
            0x58 => DiscText,
            0x59 => DiscTextMore,
            0x5A => TrackText,
            0x5B => TrackTextMore,
            0x60 => DiscInfo,
            0x61 => DiscCapacity,
            0x62 => TrackInfo,
            0x6A => DeviceName,
            0x70 => DeviceStatus,
            0x71 => TocRead,
            _ => return None,
        })
    }

    /// Check if this status reports a failure
    pub fn is_error(&self) -> bool {
        use MdStatus::*;
        matches!(
            self,
            Ignored
                | Unavailable
                | Error
                | NoMemo
                | NoDeletedFile
                | NoGroup
                | InvalidDisc
                | InvalidDiscOrTrack
                | NoDiscName
                | NoTrackName
                | DoorOpen
                | NoGroupCd
                | NoCdText
                | NoSuchEntry
        )
    }
}
