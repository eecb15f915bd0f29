//! The S-Link link driver
//!
//! [`Slink`] owns the output line, the input line and the clock of one
//! interface. Operations are grouped by concern:
//!
//! - [`monitor`] - Waiting for an idle bus
//! - [`encoder`] - Timed marks on the output line
//! - [`transmitter`] - Command frames padded to a word
//! - [`receiver`] - Decoding replies from the input line
//! - [`title`] - Segmented title writes with acknowledgement
//! - [`sniffer`] - Passive bus monitor
//!
//! All operations block the caller until they complete or time out. The
//! bus is shared without arbitration, so the driver must only ever be used
//! from one execution context.

pub mod encoder;
pub mod monitor;
pub mod receiver;
pub mod sniffer;
pub mod title;
pub mod transmitter;

use slink_hal::{Clock, InputPin, OutputPin, PulseIn};
use slink_protocol::TimingProfile;

use crate::config::LinkConfig;

pub use monitor::IdleWait;
pub use sniffer::PulseKind;

/// S-Link interface on one output and one input line
pub struct Slink<O, I, C> {
    output: O,
    input: I,
    clock: C,
    config: LinkConfig,
    /// Last idle stretch the line monitor confirmed
    idle_since: Option<IdleStretch>,
}

/// Idle stretch seen by the line monitor
#[derive(Debug, Clone, Copy)]
struct IdleStretch {
    /// First poll of the stretch
    start: u32,
    /// Last poll that saw the line released
    last_poll: u32,
}

impl<O, I, C> Slink<O, I, C>
where
    O: OutputPin,
    I: InputPin + PulseIn,
    C: Clock,
{
    /// Create a link and release the bus
    pub fn new(output: O, input: I, clock: C, config: LinkConfig) -> Self {
        let mut link = Self {
            output,
            input,
            clock,
            config,
            idle_since: None,
        };
        link.release_line();
        link
    }

    /// Link configuration
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Timing profile in use
    pub fn timing(&self) -> &TimingProfile {
        &self.config.timing
    }

    /// Check if the bus is currently asserted by anyone
    pub fn is_line_asserted(&self) -> bool {
        self.input.level() == self.config.polarity.input_asserted_level()
    }

    /// Give back the lines and the clock
    pub fn free(self) -> (O, I, C) {
        (self.output, self.input, self.clock)
    }

    fn assert_line(&mut self) {
        self.output.set_level(self.config.polarity.assert_level());
    }

    fn release_line(&mut self) {
        self.output.set_level(self.config.polarity.release_level());
    }

    /// Forget any idle stretch seen before bus activity
    fn mark_activity(&mut self) {
        self.idle_since = None;
    }
}
