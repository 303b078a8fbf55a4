//! Hardware Abstraction Layer implementations.
//!
//! This module contains concrete implementations of the traits
//! defined in [`crate::traits`] for various platforms.
//!
//! # Available Implementations
//!
//! - `mock`: Test implementations for desktop development
//! - `embedded`: Adapter for any `embedded-hal` output pin (requires `embedded-hal` feature)
//! - `esp32`: ESP32 GPIO wiring and clock (requires `esp32` feature)

pub mod mock;

#[cfg(feature = "embedded-hal")]
pub mod embedded;

#[cfg(feature = "esp32")]
pub mod esp32;

pub use mock::*;

#[cfg(feature = "embedded-hal")]
pub use embedded::*;

#[cfg(feature = "esp32")]
pub use esp32::*;
