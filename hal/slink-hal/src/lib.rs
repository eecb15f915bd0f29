//! Slink Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the S-Link protocol
//! needs. The protocol is pure timing: it only ever drives one output line,
//! samples one input line and measures time, so the surface is small.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  slink-core (link driver, title writer) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  slink-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  slink-hal-   │       │ slink-drivers │
//! │    rp2040     │       │ (embedded-hal)│
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`time::Clock`] - Monotonic microsecond time and blocking delays
//! - [`pulse::PulseIn`] - Pulse width measurement on an input line

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pulse;
pub mod time;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, Level, OutputPin};
pub use pulse::{measure_pulse, PulseIn};
pub use time::Clock;
