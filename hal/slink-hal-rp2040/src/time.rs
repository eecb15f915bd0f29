//! Microsecond clock over the embassy time driver

use embassy_time::{block_for, Duration, Instant};

/// Blocking clock backed by `embassy-time`
///
/// The protocol needs sub-millisecond busy waits, so this uses
/// [`block_for`] rather than async timers. Requires a tick rate of at
/// least 1 MHz (the RP2040 time driver default).
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl EmbassyClock {
    pub const fn new() -> Self {
        Self
    }
}

impl slink_hal::Clock for EmbassyClock {
    fn now_us(&self) -> u32 {
        // Truncation is fine: callers only use wrapping differences
        Instant::now().as_micros() as u32
    }

    fn delay_us(&mut self, us: u32) {
        block_for(Duration::from_micros(us as u64));
    }
}
