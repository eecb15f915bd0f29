//! Frames and their mark sequence
//!
//! Frame format on the wire:
//! - SYNC mark
//! - DEVICE (1 byte): address of the target device
//! - COMMAND (1-3 bytes): command code and arguments
//! - PAYLOAD (0-N bytes): fixed-width data for commands that carry it
//!
//! There is no length prefix and no checksum; the payload length is implied
//! by the command code.

use heapless::Vec;

use crate::timing::{Mark, TimingProfile};

/// Maximum bytes in a frame (device + command + payload)
pub const MAX_FRAME_SIZE: usize = 32;

/// Maximum command bytes in a plain command frame
pub const MAX_COMMAND_BYTES: usize = 3;

/// Errors that can occur while building a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// A frame needs at least one command byte
    Empty,
    /// More than [`MAX_COMMAND_BYTES`] command bytes
    TooManyCommands,
    /// Frame exceeds [`MAX_FRAME_SIZE`]
    PayloadTooLarge,
}

/// An outgoing frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Device address followed by command and payload bytes
    bytes: Vec<u8, MAX_FRAME_SIZE>,
}

impl Frame {
    /// Create a plain command frame (1-3 command bytes)
    pub fn command(device: u8, command: &[u8]) -> Result<Self, FrameError> {
        if command.is_empty() {
            return Err(FrameError::Empty);
        }
        if command.len() > MAX_COMMAND_BYTES {
            return Err(FrameError::TooManyCommands);
        }
        Self::raw(device, command, &[])
    }

    /// Create a frame carrying a fixed-width payload after the command bytes
    pub fn with_payload(device: u8, command: &[u8], payload: &[u8]) -> Result<Self, FrameError> {
        if command.is_empty() {
            return Err(FrameError::Empty);
        }
        Self::raw(device, command, payload)
    }

    fn raw(device: u8, command: &[u8], payload: &[u8]) -> Result<Self, FrameError> {
        let mut bytes = Vec::new();
        bytes.push(device).map_err(|_| FrameError::PayloadTooLarge)?;
        bytes
            .extend_from_slice(command)
            .map_err(|_| FrameError::PayloadTooLarge)?;
        bytes
            .extend_from_slice(payload)
            .map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { bytes })
    }

    /// Target device address
    pub fn device(&self) -> u8 {
        self.bytes[0]
    }

    /// Everything after the device address
    pub fn body(&self) -> &[u8] {
        &self.bytes[1..]
    }

    /// All bytes in transmission order
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The marks that make up this frame, in transmission order
    pub fn marks(&self) -> impl Iterator<Item = Mark> + '_ {
        core::iter::once(Mark::Sync).chain(self.bytes.iter().flat_map(|&b| byte_marks(b)))
    }

    /// Wire time of the frame, delimiters included
    pub fn duration_us(&self, timing: &TimingProfile) -> u32 {
        self.marks().map(|mark| timing.slot_us(mark)).sum()
    }
}

/// Marks for one byte, most significant bit first
pub fn byte_marks(byte: u8) -> [Mark; 8] {
    let mut marks = [Mark::Zero; 8];
    for (i, mark) in marks.iter_mut().enumerate() {
        *mark = Mark::from_bit(byte & (0x80 >> i) != 0);
    }
    marks
}
