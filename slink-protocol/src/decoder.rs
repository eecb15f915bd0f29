//! Receive-side frame decoder
//!
//! Pulse widths measured on the input line are fed one by one. The decoder
//! waits for a sync mark, then assembles bits MSB first into bytes until the
//! output buffer is full.
//!
//! A bit is 1 when its pulse matches the one-mark window and 0 otherwise.
//! The zero-mark window is not checked, so a corrupted one decodes as a
//! zero instead of stalling the frame. Callers validate the decoded content.

use crate::timing::{Mark, TimingProfile};

/// Decoder state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeState {
    /// Waiting for a sync mark; everything else is ignored
    WaitSync,
    /// Assembling bits into bytes
    Accumulate,
    /// Output buffer is full
    Done,
}

/// State machine decoding pulse widths into a caller-provided buffer
#[derive(Debug)]
pub struct FrameDecoder<'a> {
    timing: TimingProfile,
    out: &'a mut [u8],
    state: DecodeState,
    received: usize,
    bit_index: u8,
    accumulator: u8,
}

impl<'a> FrameDecoder<'a> {
    /// Create a decoder filling `out`
    ///
    /// The buffer is zeroed; its length is the number of bytes expected.
    pub fn new(timing: TimingProfile, out: &'a mut [u8]) -> Self {
        out.fill(0);
        let state = if out.is_empty() {
            DecodeState::Done
        } else {
            DecodeState::WaitSync
        };
        Self {
            timing,
            out,
            state,
            received: 0,
            bit_index: 0,
            accumulator: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// Number of complete bytes decoded so far
    pub fn received(&self) -> usize {
        self.received
    }

    /// Check if the buffer is full
    pub fn is_done(&self) -> bool {
        self.state == DecodeState::Done
    }

    /// Decoded bytes so far
    pub fn bytes(&self) -> &[u8] {
        &self.out[..self.received]
    }

    /// Feed one measured pulse width
    ///
    /// A width of 0 means the measurement timed out and is ignored.
    pub fn feed(&mut self, width_us: u32) -> DecodeState {
        if width_us == 0 {
            return self.state;
        }

        match self.state {
            DecodeState::WaitSync => {
                if self.timing.matches(Mark::Sync, width_us) {
                    self.accumulator = 0;
                    self.bit_index = 0;
                    self.state = DecodeState::Accumulate;
                }
            }
            DecodeState::Accumulate => {
                if self.timing.matches(Mark::One, width_us) {
                    self.accumulator |= 0x80 >> self.bit_index;
                }

                self.bit_index += 1;
                if self.bit_index == 8 {
                    self.out[self.received] = self.accumulator;
                    self.received += 1;
                    self.accumulator = 0;
                    self.bit_index = 0;

                    if self.received == self.out.len() {
                        self.state = DecodeState::Done;
                    }
                }
            }
            DecodeState::Done => {}
        }

        self.state
    }
}
