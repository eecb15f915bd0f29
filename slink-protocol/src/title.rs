//! Disc and track title segmentation
//!
//! Titles are written to the deck in 16-byte segments, one frame per
//! segment. The first segment starts with a two-byte zero header, leaving 14
//! bytes of text; every following segment is 16 bytes of text. Unused bytes
//! are zero.
//!
//! ```text
//! segment 0:  00 00 t0 t1 .. t13
//! segment 1:  t14 t15 .. t29
//! segment n:  t(16n-2) .. t(16n+13)
//! ```

use crate::frame::{Frame, FrameError};
use crate::md;

/// Bytes per segment
pub const SEGMENT_LEN: usize = 16;

/// Zero header at the start of the first segment
pub const HEADER_LEN: usize = 2;

/// Segments a title buffer can hold
pub const MAX_SEGMENTS: usize = 10;

/// Longest title that fits in [`MAX_SEGMENTS`]
pub const MAX_TITLE_LEN: usize = MAX_SEGMENTS * SEGMENT_LEN - HEADER_LEN;

/// One fixed-width title segment
pub type Segment = [u8; SEGMENT_LEN];

/// Errors from a title write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TitleError {
    /// Title does not fit in [`MAX_SEGMENTS`] segments
    TooLong,
    /// A segment was not acknowledged within the attempt budget
    NotAcknowledged {
        /// Zero-based segment index
        segment: u8,
    },
    /// Segment frame could not be built
    Frame(FrameError),
}

impl From<FrameError> for TitleError {
    fn from(e: FrameError) -> Self {
        TitleError::Frame(e)
    }
}

/// Which title is being written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TitleTarget {
    /// The disc title
    Disc,
    /// Title of a track (1-based track number)
    Track(u8),
}

impl TitleTarget {
    /// Command carrying the first segment
    pub const fn first_command(self) -> u8 {
        match self {
            TitleTarget::Disc => md::cmd::WRITE_DISC_TEXT,
            TitleTarget::Track(_) => md::cmd::WRITE_TRACK_TEXT,
        }
    }

    /// Command carrying every following segment
    pub const fn continuation_command(self) -> u8 {
        match self {
            TitleTarget::Disc => md::cmd::WRITE_DISC_MORE,
            TitleTarget::Track(_) => md::cmd::WRITE_TRACK_MORE,
        }
    }

    /// Command and index byte for segment `n`
    ///
    /// The first segment is indexed by disc (always 1) or track number,
    /// following segments by their 1-based block number.
    pub const fn segment_header(self, n: usize) -> (u8, u8) {
        if n == 0 {
            let index = match self {
                TitleTarget::Disc => 0x01,
                TitleTarget::Track(track) => track,
            };
            (self.first_command(), index)
        } else {
            (self.continuation_command(), (n + 1) as u8)
        }
    }

    /// Build the frame carrying segment `n`
    pub fn segment_frame(
        self,
        device: u8,
        n: usize,
        segment: &Segment,
    ) -> Result<Frame, FrameError> {
        let (command, index) = self.segment_header(n);
        Frame::with_payload(device, &[command, index], segment)
    }
}

/// Segments needed for a title of `len` bytes
///
/// Header plus text, rounded up to whole segments. An empty title still
/// takes one (all-zero) segment.
pub const fn segment_count(len: usize) -> usize {
    (HEADER_LEN + len + SEGMENT_LEN - 1) / SEGMENT_LEN
}

/// Fixed-capacity segment buffer
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TitleBuffer {
    segments: [Segment; MAX_SEGMENTS],
    count: usize,
}

impl Default for TitleBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TitleBuffer {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            segments: [[0; SEGMENT_LEN]; MAX_SEGMENTS],
            count: 0,
        }
    }

    /// Segment `title` into the buffer
    ///
    /// The buffer is zeroed first. Titles longer than [`MAX_TITLE_LEN`] are
    /// rejected and leave the buffer empty. Returns the segment count.
    pub fn prepare(&mut self, title: &[u8]) -> Result<usize, TitleError> {
        self.segments = [[0; SEGMENT_LEN]; MAX_SEGMENTS];
        self.count = 0;

        if title.len() > MAX_TITLE_LEN {
            return Err(TitleError::TooLong);
        }

        let count = segment_count(title.len());
        for (n, segment) in self.segments[..count].iter_mut().enumerate() {
            // Offset of this segment in the header+title stream
            let stream_start = n * SEGMENT_LEN;
            let skip = HEADER_LEN.saturating_sub(stream_start);
            let text_start = (stream_start + skip) - HEADER_LEN;
            let text_end = (stream_start + SEGMENT_LEN - HEADER_LEN).min(title.len());

            let text = &title[text_start..text_end];
            segment[skip..skip + text.len()].copy_from_slice(text);
        }

        self.count = count;
        Ok(count)
    }

    /// Prepared segments
    pub fn segments(&self) -> &[Segment] {
        &self.segments[..self.count]
    }

    /// Number of prepared segments
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if nothing is prepared
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_count() {
        assert_eq!(segment_count(0), 1);
        assert_eq!(segment_count(5), 1);
        assert_eq!(segment_count(14), 1);
        assert_eq!(segment_count(15), 2);
        assert_eq!(segment_count(30), 2);
        assert_eq!(segment_count(31), 3);
        assert_eq!(segment_count(MAX_TITLE_LEN), MAX_SEGMENTS);
    }

    #[test]
    fn test_prepare_short_title() {
        let mut buf = TitleBuffer::new();
        assert_eq!(buf.prepare(b"HELLO"), Ok(1));
        assert_eq!(
            buf.segments()[0],
            [0, 0, b'H', b'E', b'L', b'L', b'O', 0, 0, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_prepare_two_segments() {
        let mut buf = TitleBuffer::new();
        let title = b"ABCDEFGHIJKLMNOPQRST"; // 20 bytes
        assert_eq!(buf.prepare(title), Ok(2));

        assert_eq!(&buf.segments()[0][..2], &[0, 0]);
        assert_eq!(&buf.segments()[0][2..], b"ABCDEFGHIJKLMN");
        assert_eq!(&buf.segments()[1][..6], b"OPQRST");
        assert!(buf.segments()[1][6..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_prepare_exact_fit() {
        let mut buf = TitleBuffer::new();
        let title = [b'x'; 30];
        assert_eq!(buf.prepare(&title), Ok(2));
        assert_eq!(buf.segments()[1], [b'x'; 16]);
    }

    #[test]
    fn test_prepare_resets_previous_content() {
        let mut buf = TitleBuffer::new();
        buf.prepare(&[b'a'; 40]).unwrap();
        buf.prepare(b"b").unwrap();
        assert_eq!(buf.len(), 1);
        assert_eq!(&buf.segments()[0][..4], &[0, 0, b'b', 0]);
    }

    #[test]
    fn test_zero_bytes_are_kept() {
        let mut buf = TitleBuffer::new();
        buf.prepare(&[b'a', 0, b'b']).unwrap();
        assert_eq!(&buf.segments()[0][..5], &[0, 0, b'a', 0, b'b']);
    }

    #[test]
    fn test_too_long() {
        let mut buf = TitleBuffer::new();
        assert_eq!(buf.prepare(&[b'z'; MAX_TITLE_LEN]), Ok(MAX_SEGMENTS));
        assert_eq!(
            buf.prepare(&[b'z'; MAX_TITLE_LEN + 1]),
            Err(TitleError::TooLong)
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn test_segment_headers() {
        assert_eq!(TitleTarget::Disc.segment_header(0), (0x98, 0x01));
        assert_eq!(TitleTarget::Disc.segment_header(1), (0x99, 0x02));
        assert_eq!(TitleTarget::Disc.segment_header(4), (0x99, 0x05));
        assert_eq!(TitleTarget::Track(7).segment_header(0), (0x9A, 0x07));
        assert_eq!(TitleTarget::Track(7).segment_header(1), (0x9B, 0x02));
    }

    #[test]
    fn test_segment_frame() {
        let mut buf = TitleBuffer::new();
        buf.prepare(b"HELLO").unwrap();
        let frame = TitleTarget::Disc
            .segment_frame(md::MD_DEVICE, 0, &buf.segments()[0])
            .unwrap();

        assert_eq!(frame.device(), 0xB0);
        assert_eq!(&frame.body()[..2], &[0x98, 0x01]);
        assert_eq!(&frame.body()[2..], &buf.segments()[0]);
    }
}
