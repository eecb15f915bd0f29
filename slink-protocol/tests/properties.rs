//! Property tests for segmentation, mark encoding and classification

use proptest::prelude::*;

use slink_protocol::title::{segment_count, HEADER_LEN, MAX_TITLE_LEN, SEGMENT_LEN};
use slink_protocol::{byte_marks, DecodeState, FrameDecoder, Mark, TimingProfile, TitleBuffer};

fn in_any_window(timing: &TimingProfile, width: u32) -> bool {
    [Mark::Sync, Mark::One, Mark::Zero]
        .into_iter()
        .any(|mark| timing.matches(mark, width))
}

#[test]
fn every_byte_survives_encode_and_decode() {
    let timing = TimingProfile::default();
    for value in 0..=255u8 {
        let mut out = [0u8; 1];
        let mut decoder = FrameDecoder::new(timing, &mut out);
        decoder.feed(timing.mark_us(Mark::Sync));
        for mark in byte_marks(value) {
            decoder.feed(timing.mark_us(mark));
        }
        assert!(decoder.is_done());
        assert_eq!(decoder.bytes(), &[value]);
    }
}

proptest! {
    #[test]
    fn segmentation_covers_title(title in proptest::collection::vec(any::<u8>(), 0..=MAX_TITLE_LEN)) {
        let mut buf = TitleBuffer::new();
        let count = buf.prepare(&title).unwrap();

        prop_assert_eq!(count, segment_count(title.len()));
        prop_assert_eq!(buf.segments().len(), count);

        let stream: Vec<u8> = buf.segments().iter().flatten().copied().collect();
        prop_assert_eq!(stream.len(), count * SEGMENT_LEN);
        prop_assert_eq!(&stream[..HEADER_LEN], &[0u8, 0][..]);
        prop_assert_eq!(&stream[HEADER_LEN..HEADER_LEN + title.len()], &title[..]);
        prop_assert!(stream[HEADER_LEN + title.len()..].iter().all(|&b| b == 0));
    }

    #[test]
    fn overlong_titles_are_rejected(extra in 1usize..64) {
        let mut buf = TitleBuffer::new();
        let title = vec![b'x'; MAX_TITLE_LEN + extra];
        prop_assert!(buf.prepare(&title).is_err());
        prop_assert!(buf.is_empty());
    }

    #[test]
    fn encoded_marks_decode_within_tolerance(bytes in proptest::collection::vec(any::<u8>(), 1..8), jitter in -99i32..99) {
        let timing = TimingProfile::default();
        let mut out = vec![0u8; bytes.len()];
        let mut decoder = FrameDecoder::new(timing, &mut out);

        let widen = |us: u32| (us as i32 + jitter) as u32;
        decoder.feed(widen(timing.mark_us(Mark::Sync)));
        for &byte in &bytes {
            for mark in byte_marks(byte) {
                decoder.feed(widen(timing.mark_us(mark)));
            }
        }
        prop_assert!(decoder.is_done());
        prop_assert_eq!(decoder.bytes(), &bytes[..]);
    }

    #[test]
    fn widths_outside_windows_are_noise(widths in proptest::collection::vec(0u32..100_000, 1..64)) {
        let timing = TimingProfile::default();
        let noise: Vec<u32> = widths
            .into_iter()
            .filter(|&w| !in_any_window(&timing, w))
            .collect();

        let mut out = [0u8; 2];
        let mut decoder = FrameDecoder::new(timing, &mut out);
        for w in noise {
            prop_assert_eq!(timing.classify(w), None);
            prop_assert_eq!(decoder.feed(w), DecodeState::WaitSync);
        }
        prop_assert_eq!(decoder.received(), 0);
    }
}
