//! Link configuration
//!
//! Board-agnostic configuration of one S-Link interface, optionally
//! persisted as postcard binary data.

pub mod link;
#[cfg(feature = "serde")]
pub mod stored;

pub use link::*;
#[cfg(feature = "serde")]
pub use stored::*;
