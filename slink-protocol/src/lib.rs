//! Sony S-Link / Control-A1 wire protocol
//!
//! S-Link is a single-wire, open-collector bus. Every participant can pull
//! the line low at any time; there is no arbitration and no link-level
//! acknowledgement. Information is carried purely by the width of the low
//! periods ("marks"):
//!
//! ```text
//!        sync        one        zero
//!  ‾‾‾‾|______|‾‾|____|‾‾|__|‾‾|__|‾‾ ...
//!       2400µs 600 1200 600 600 600
//! ```
//!
//! A frame is a sync mark followed by bytes, MSB first, every mark followed
//! by a 600µs released delimiter. The first byte addresses a device, the
//! rest are command (and optionally payload) bytes.
//!
//! This crate holds the hardware-free parts of the protocol:
//!
//! - [`timing`] - Timing profile and mark classification
//! - [`frame`] - Frames and their mark sequence
//! - [`decoder`] - Receive-side pulse-width state machine
//! - [`title`] - Disc/track title segmentation
//! - [`trace`] - Passive bus trace decoding
//! - [`md`] - MiniDisc command and status codes

#![no_std]
#![deny(unsafe_code)]

pub mod decoder;
pub mod frame;
pub mod md;
pub mod timing;
pub mod title;
pub mod trace;

pub use decoder::{DecodeState, FrameDecoder};
pub use frame::{byte_marks, Frame, FrameError, MAX_COMMAND_BYTES, MAX_FRAME_SIZE};
pub use timing::{Mark, TimingError, TimingProfile};
pub use title::{Segment, TitleBuffer, TitleError, TitleTarget};
pub use trace::{MonitorMode, Trace, TraceDecoder, TraceEvent};
