//! Trait definitions for hardware abstraction.
//!
//! This module defines the core abstractions that allow valve-actuator to:
//! - Run on different hardware (ESP32, any `embedded-hal` pin, desktop mock)
//! - Take its step decisions from any motion profile implementation
//!
//! # Hardware Abstraction
//!
//! The key traits are:
//!
//! - [`OutputLine`]: One coil terminal output
//! - [`MotionProfile`]: Target tracking and per-tick step decision
//! - [`Clock`]: Time source for `no_std` environments

pub mod hardware;

pub use hardware::*;
