//! ESP32 hardware support for ULN2003-style valve actuators.
//!
//! The actuator's coil terminals are driven straight from GPIO through a
//! Darlington array, so each coil line is an ESP-IDF `PinDriver` in output
//! mode wrapped in [`HalLine`](crate::hal::HalLine).
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-C3 SuperMini
//! - **Driver**: ULN2003 (or equivalent) low-side coil driver
//! - **Actuator**: 4-wire stepper valve head, three or four coil terminals
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments.

mod clock;
mod line;

pub use clock::Esp32Clock;
pub use line::{esp32_line, Esp32Line};

/// Pin assignments for SuperMini ESP32-C3.
pub mod pins {
    /// Coil terminal A (IN1 on the driver board)
    pub const COIL_A: i32 = 2;

    /// Coil terminal B (IN2)
    pub const COIL_B: i32 = 3;

    /// Coil terminal C (IN3)
    pub const COIL_C: i32 = 4;

    /// Coil terminal D (IN4), unused on three-wire valve heads
    pub const COIL_D: i32 = 5;
}
