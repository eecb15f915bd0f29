//! Interface configuration types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use slink_hal::Level;
use slink_protocol::{TimingError, TimingProfile};

/// Default input pin (reads the bus)
pub const DEFAULT_IN_PIN: u8 = 14;

/// Default output pin (drives the bus transistor)
pub const DEFAULT_OUT_PIN: u8 = 15;

/// Default attempts per title segment
pub const DEFAULT_SEGMENT_ATTEMPTS: u8 = 3;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Serialization failed (buffer too small)
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// Stored data does not start with the config magic
    BadMagic,
    /// Stored data has an unknown format version
    VersionMismatch,
    /// Timing profile violates its invariants
    Timing(TimingError),
    /// At least one attempt per segment is required
    NoAttempts,
}

impl From<TimingError> for ConfigError {
    fn from(e: TimingError) -> Self {
        ConfigError::Timing(e)
    }
}

/// Electrical sense of the two lines
///
/// The usual interface drives the bus through an NPN transistor, so setting
/// the output high pulls the shared line low, and reads the shared line
/// directly, so the input reads low while any device asserts the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinePolarity {
    /// Output level that asserts the bus is high
    pub output_active_high: bool,
    /// Input reads low while the bus is asserted
    pub input_active_low: bool,
}

impl Default for LinePolarity {
    fn default() -> Self {
        Self {
            output_active_high: true,
            input_active_low: true,
        }
    }
}

impl LinePolarity {
    /// Output level that asserts the bus
    pub const fn assert_level(&self) -> Level {
        if self.output_active_high {
            Level::High
        } else {
            Level::Low
        }
    }

    /// Output level that releases the bus
    pub const fn release_level(&self) -> Level {
        self.assert_level().inverted()
    }

    /// Input level seen while the bus is asserted
    pub const fn input_asserted_level(&self) -> Level {
        if self.input_active_low {
            Level::Low
        } else {
            Level::High
        }
    }

    /// Input level seen while the bus is released
    pub const fn input_released_level(&self) -> Level {
        self.input_asserted_level().inverted()
    }
}

/// Configuration of one S-Link interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    /// GPIO number of the input line
    pub in_pin: u8,
    /// GPIO number of the output line
    pub out_pin: u8,
    /// Electrical sense of both lines
    pub polarity: LinePolarity,
    /// Wire timing
    pub timing: TimingProfile,
    /// Attempts per title segment before giving up
    pub segment_attempts: u8,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self::new(DEFAULT_IN_PIN, DEFAULT_OUT_PIN)
    }
}

impl LinkConfig {
    /// Create a config for the given pins with default timing
    pub fn new(in_pin: u8, out_pin: u8) -> Self {
        Self {
            in_pin,
            out_pin,
            polarity: LinePolarity::default(),
            timing: TimingProfile::default(),
            segment_attempts: DEFAULT_SEGMENT_ATTEMPTS,
        }
    }

    /// GPIO number of the input line
    pub const fn in_pin(&self) -> u8 {
        self.in_pin
    }

    /// GPIO number of the output line
    pub const fn out_pin(&self) -> u8 {
        self.out_pin
    }

    /// Check the config invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timing.validate()?;
        if self.segment_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        Ok(())
    }
}
