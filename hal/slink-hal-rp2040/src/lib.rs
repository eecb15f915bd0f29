//! RP2040-specific HAL for the Slink controller
//!
//! This crate provides RP2040 implementations of the `slink-hal` traits:
//!
//! - GPIO output and input lines over `embassy-rp`
//! - Pulse measurement by polling against the embassy time driver
//! - A blocking microsecond clock over `embassy-time`

#![no_std]

pub mod gpio;
pub mod time;

pub use gpio::{BusInput, BusOutput};
pub use time::EmbassyClock;

// Re-export shared traits from slink-hal for convenience
pub use slink_hal::{Clock, InputPin, OutputPin, PulseIn};
