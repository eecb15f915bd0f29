//! Time abstractions
//!
//! All protocol timing is relative: a monotonic microsecond counter that may
//! wrap, and a blocking microsecond delay.

/// Monotonic microsecond clock with blocking delay
pub trait Clock {
    /// Current time in microseconds
    ///
    /// The counter is allowed to wrap; callers must only compare instants
    /// through [`Clock::elapsed_us`].
    fn now_us(&self) -> u32;

    /// Busy-wait for at least `us` microseconds
    fn delay_us(&mut self, us: u32);

    /// Microseconds elapsed since `since` (wrapping-safe)
    fn elapsed_us(&self, since: u32) -> u32 {
        self.now_us().wrapping_sub(since)
    }
}
