//! Bus timing and mark classification
//!
//! All durations are in microseconds. Marks are recognised with a
//! multiplicative tolerance: a pulse matches a mark of width `m` when
//! `m / tol < width < m * tol`. The tolerance is stored ×100 so the check
//! stays in integer arithmetic (120 = 1.2, giving 2000-2880µs for sync,
//! 1000-1440µs for one and 500-720µs for zero).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sync mark: start of a frame
pub const MARK_SYNC_US: u32 = 2400;
/// One bit
pub const MARK_ONE_US: u32 = 1200;
/// Zero bit
pub const MARK_ZERO_US: u32 = 600;
/// Released gap after every mark
pub const MARK_DELIMITER_US: u32 = 600;
/// Classification tolerance (×100)
pub const MARK_TOLERANCE_X100: u16 = 120;

/// A command transmission is padded to this total length
pub const WORD_GAP_US: u32 = 45_000;
/// Minimum continuous idle time before the line counts as free
pub const LINE_READY_US: u32 = 5_000;
/// Poll interval of every busy-wait loop
pub const IDLE_POLL_US: u32 = 25;
/// Give up waiting for a free line after this long
pub const IDLE_TIMEOUT_US: u32 = 500_000;
/// Per-pulse timeout while receiving (longer than any valid mark)
pub const PULSE_TIMEOUT_US: u32 = 55_000;
/// Overall receive timeout
pub const RECEIVE_TIMEOUT_US: u32 = 60_000;

/// Errors in a timing profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingError {
    /// Marks must satisfy sync > one > zero
    MarkOrder,
    /// Zero mark and delimiter must be equal
    DelimiterMismatch,
    /// Tolerance must be greater than 1.0
    Tolerance,
    /// Acceptance windows of sync/one/zero overlap
    OverlappingWindows,
}

/// Symbol carried by a single mark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mark {
    Sync,
    One,
    Zero,
}

impl Mark {
    /// Mark for a data bit
    pub const fn from_bit(bit: bool) -> Self {
        if bit {
            Mark::One
        } else {
            Mark::Zero
        }
    }
}

/// Timing profile shared by encoder and decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingProfile {
    /// Sync mark width
    pub sync_mark_us: u32,
    /// One-bit mark width
    pub one_mark_us: u32,
    /// Zero-bit mark width
    pub zero_mark_us: u32,
    /// Released delimiter after every mark
    pub delimiter_us: u32,
    /// Classification tolerance factor (×100, must be > 100)
    pub tolerance_x100: u16,
    /// Total length a command transmission is padded to
    pub word_gap_us: u32,
    /// Continuous idle time required before transmitting
    pub line_ready_us: u32,
    /// Poll interval for idle sensing and padding
    pub idle_poll_us: u32,
    /// Upper bound on the idle wait
    pub idle_timeout_us: u32,
    /// Per-pulse measurement timeout while receiving
    pub pulse_timeout_us: u32,
    /// Overall receive timeout
    pub receive_timeout_us: u32,
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self {
            sync_mark_us: MARK_SYNC_US,
            one_mark_us: MARK_ONE_US,
            zero_mark_us: MARK_ZERO_US,
            delimiter_us: MARK_DELIMITER_US,
            tolerance_x100: MARK_TOLERANCE_X100,
            word_gap_us: WORD_GAP_US,
            line_ready_us: LINE_READY_US,
            idle_poll_us: IDLE_POLL_US,
            idle_timeout_us: IDLE_TIMEOUT_US,
            pulse_timeout_us: PULSE_TIMEOUT_US,
            receive_timeout_us: RECEIVE_TIMEOUT_US,
        }
    }
}

impl TimingProfile {
    /// Check the profile invariants
    pub fn validate(&self) -> Result<(), TimingError> {
        if !(self.sync_mark_us > self.one_mark_us && self.one_mark_us > self.zero_mark_us) {
            return Err(TimingError::MarkOrder);
        }
        if self.zero_mark_us != self.delimiter_us {
            return Err(TimingError::DelimiterMismatch);
        }
        if self.tolerance_x100 <= 100 {
            return Err(TimingError::Tolerance);
        }
        // Upper edge of a shorter window must not reach the lower edge of
        // the next longer one
        let tol = self.tolerance_x100 as u64;
        let overlaps =
            |short: u32, long: u32| (short as u64) * tol * tol >= (long as u64) * 100 * 100;
        if overlaps(self.zero_mark_us, self.one_mark_us)
            || overlaps(self.one_mark_us, self.sync_mark_us)
        {
            return Err(TimingError::OverlappingWindows);
        }
        Ok(())
    }

    /// Nominal width of a mark
    pub const fn mark_us(&self, mark: Mark) -> u32 {
        match mark {
            Mark::Sync => self.sync_mark_us,
            Mark::One => self.one_mark_us,
            Mark::Zero => self.zero_mark_us,
        }
    }

    /// Total wire time of a mark including its delimiter
    pub const fn slot_us(&self, mark: Mark) -> u32 {
        self.mark_us(mark) + self.delimiter_us
    }

    /// Check whether a measured width falls inside the window of `mark`
    ///
    /// Both bounds are exclusive.
    pub fn matches(&self, mark: Mark, width_us: u32) -> bool {
        let nominal = self.mark_us(mark) as u64;
        let width = width_us as u64;
        let tol = self.tolerance_x100 as u64;

        width * tol > nominal * 100 && width * 100 < nominal * tol
    }

    /// Three-way classification of a measured width
    ///
    /// Returns `None` for widths outside every window (noise, idle).
    pub fn classify(&self, width_us: u32) -> Option<Mark> {
        [Mark::Sync, Mark::One, Mark::Zero]
            .into_iter()
            .find(|&mark| self.matches(mark, width_us))
    }

    /// Settle time around a title segment exchange
    pub const fn ack_settle_us(&self) -> u32 {
        2 * self.line_ready_us
    }
}
