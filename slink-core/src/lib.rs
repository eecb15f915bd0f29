//! Board-agnostic S-Link link driver
//!
//! This crate turns the protocol pieces of `slink-protocol` into blocking
//! operations on a pair of GPIO lines:
//!
//! - Line monitor (wait for an idle bus before transmitting)
//! - Bit encoder and command transmitter
//! - Frame receiver
//! - Title writer with per-segment acknowledgement and retry
//! - Passive bus monitor for debugging
//! - Link configuration and its persisted form
//!
//! Everything is a busy-wait against a [`slink_hal::Clock`]; nothing here
//! yields or allocates.

#![no_std]
#![deny(unsafe_code)]

#[cfg(any(test, feature = "sim"))]
extern crate std;

pub mod config;
pub mod link;
#[cfg(any(test, feature = "sim"))]
pub mod sim;

pub use config::{ConfigError, LinePolarity, LinkConfig};
pub use link::{IdleWait, PulseKind, Slink};
