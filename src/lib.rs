//! # valve-actuator
//!
//! Coil sequencing and position tracking for 4-wire stepper actuators,
//! as used in motorized thermostat radiator valves.
//!
//! ## Features
//!
//! - **Drive modes**: Full-step, half-step and wave-drive coil sequences
//! - **Negative-safe counter**: The absolute step counter may run in either direction
//! - **Power management**: Optional coil de-energization once the target is reached
//! - **Scheduling hint**: Requests fast polling only while the actuator moves
//! - **Motion profiles**: Pluggable step decisions, with a bundled ramped profile
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `sequencer` - Pure step index to coil pattern rendering
//! - `actuator` - Per-tick control loop owning the counter and coil lines
//! - `traits` - Hardware and motion profile abstractions
//! - `profile` - Acceleration/deceleration motion profile
//! - `hal` - Concrete implementations (mock for testing, embedded-hal and esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use valve_actuator::{
//!     ActuatorConfig, ActuatorController, CoilLines, DriveMode,
//!     hal::{MockClock, MockLine},
//!     profile::RampProfile,
//! };
//!
//! let clock = MockClock::new();
//! let lines = CoilLines::four(MockLine::new(), MockLine::new(), MockLine::new(), MockLine::new());
//! let config = ActuatorConfig::default()
//!     .with_drive_mode(DriveMode::HalfStep)
//!     .with_sleep_when_done(true);
//!
//! let mut actuator = ActuatorController::new(lines, RampProfile::new(&clock), config);
//! actuator.setup().unwrap();
//!
//! // Open the valve by 40 half-steps
//! actuator.profile_mut().set_target(40);
//!
//! // Main loop - call tick() on every scheduler pass
//! while actuator.profile().current_position() != 40 {
//!     clock.advance(1);
//!     actuator.tick().unwrap();
//! }
//! actuator.tick().unwrap();
//! assert!(!actuator.wants_fast_polling());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Per-tick actuator control loop.
pub mod actuator;
/// Shared configuration system for desktop and ESP32.
pub mod config;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Clock-driven motion profile with acceleration ramps.
pub mod profile;
/// Step index to coil pattern rendering.
pub mod sequencer;
/// Core traits for hardware and motion profile abstraction.
pub mod traits;

/// Request types for automation actions (serde-based).
#[cfg(feature = "serde")]
pub mod messages;

// Re-exports for convenience
pub use actuator::{ActuatorController, ActuatorState, CoilLines, MotionState, SchedulingHint};
pub use profile::RampProfile;
pub use sequencer::{render, CoilPattern, DriveMode};
pub use traits::{Clock, MotionProfile, OutputLine};

// Config re-exports
pub use config::{ActuatorConfig, Config, ConfigError, MotionConfig};

// Message re-exports
#[cfg(feature = "serde")]
pub use messages::{ActuatorRequest, ReportPositionRequest, SetSpeedRequest, SetTargetRequest};

// Parsing function re-exports (serde-json-core based)
#[cfg(feature = "serde-json-core")]
pub use messages::{
    parse_report_position_request, parse_set_speed_request, parse_set_target_request,
};
