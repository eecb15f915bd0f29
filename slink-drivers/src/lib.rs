//! Adapters and device front-ends
//!
//! This crate connects `slink-core` to the outside world:
//!
//! - Pin adapters for any `embedded-hal` 1.0 digital pins
//! - MiniDisc deck front-end with named commands

#![no_std]
#![deny(unsafe_code)]

pub mod embedded;
pub mod minidisc;

pub use embedded::{EhInput, EhOutput};
pub use minidisc::MdDeck;
