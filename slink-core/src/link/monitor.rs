//! Line monitor
//!
//! Before transmitting, the bus must have been released continuously for
//! `line_ready_us`. The line is polled every `idle_poll_us`; any assertion
//! restarts the idle stretch. The wait is bounded by `idle_timeout_us`,
//! after which the caller transmits anyway.

use slink_hal::{Clock, InputPin, OutputPin, PulseIn};

use super::{IdleStretch, Slink};

/// Outcome of an idle wait
///
/// Informational only: a timed-out wait is not an error, the caller simply
/// risks a collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IdleWait {
    /// The bus was released for the full ready interval
    Idle,
    /// Gave up waiting; the bus may be busy
    TimedOut,
}

impl<O, I, C> Slink<O, I, C>
where
    O: OutputPin,
    I: InputPin + PulseIn,
    C: Clock,
{
    /// Block until the bus has been idle for `line_ready_us`
    ///
    /// An idle stretch confirmed by a previous call is carried over only if
    /// this call starts within one poll interval of its last poll, so
    /// calling this again right away returns after a single poll. Any longer
    /// unobserved time restarts the stretch.
    pub fn wait_until_idle(&mut self) -> IdleWait {
        let timing = self.config.timing;
        let begin = self.clock.now_us();
        let mut idle_start = match self.idle_since.take() {
            Some(stretch)
                if begin.wrapping_sub(stretch.last_poll) <= timing.idle_poll_us =>
            {
                stretch.start
            }
            _ => begin,
        };

        loop {
            self.clock.delay_us(timing.idle_poll_us);
            let now = self.clock.now_us();

            if self.is_line_asserted() {
                idle_start = now;
            }

            if now.wrapping_sub(idle_start) >= timing.line_ready_us {
                self.idle_since = Some(IdleStretch {
                    start: idle_start,
                    last_poll: now,
                });
                return IdleWait::Idle;
            }

            if now.wrapping_sub(begin) >= timing.idle_timeout_us {
                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "bus not idle after {} us, sending anyway",
                    timing.idle_timeout_us
                );
                self.idle_since = None;
                return IdleWait::TimedOut;
            }
        }
    }
}
