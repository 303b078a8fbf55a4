//! Hardware abstraction traits for coil outputs, motion profiles, and time.
//!
//! This module defines the interfaces that let the actuator core run
//! against real GPIO on an ESP32 or against mocks on the desktop.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`OutputLine`] | One digital output driving a coil terminal |
//! | [`MotionProfile`] | Target tracking and the per-tick step decision |
//! | [`Clock`] | Time source for `no_std` environments |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`]. Any `embedded-hal` output pin can be used
//! through `hal::HalLine` (requires the `embedded-hal` feature).
//!
//! # Example
//!
//! ```rust
//! use valve_actuator::traits::OutputLine;
//! use valve_actuator::hal::MockLine;
//!
//! let mut line = MockLine::new();
//! line.setup().unwrap();
//! line.write(true).unwrap();
//!
//! assert!(line.level);
//! assert!(line.is_set_up);
//! ```

/// A single digital output wired to one coil terminal of the actuator.
///
/// The controller never owns the lifecycle of the physical pin beyond
/// calling [`setup`](Self::setup) once and [`write`](Self::write) on
/// every tick.
///
/// # Implementation Notes
///
/// - `setup()` is called exactly once, from `ActuatorController::setup`
/// - `write()` must take effect immediately; there is no flush step
/// - Lines that cannot fail should use [`core::convert::Infallible`]
///
/// # Example Implementation
///
/// ```rust,ignore
/// use valve_actuator::traits::OutputLine;
///
/// struct MyPin { /* register handle */ }
///
/// impl OutputLine for MyPin {
///     type Error = ();
///
///     fn setup(&mut self) -> Result<(), ()> {
///         // Configure as push-pull output...
///         Ok(())
///     }
///
///     fn write(&mut self, level: bool) -> Result<(), ()> {
///         // Set or clear the output bit...
///         Ok(())
///     }
/// }
/// ```
pub trait OutputLine {
    /// Error type for line operations.
    type Error;

    /// One-time line initialization.
    fn setup(&mut self) -> Result<(), Self::Error>;

    /// Drive the line high (`true`) or low (`false`).
    fn write(&mut self, level: bool) -> Result<(), Self::Error>;
}

/// Motion profile capability consumed by the actuator controller.
///
/// The profile tracks a target and a current position and decides, once
/// per tick, whether the actuator should advance and in which direction.
/// [`RampProfile`](crate::profile::RampProfile) is the bundled
/// implementation; hosts may supply their own.
pub trait MotionProfile {
    /// Returns true when the tracked position equals the target position.
    fn has_reached_target(&self) -> bool;

    /// Returns the step delta to apply this tick.
    ///
    /// Observed values are `-1`, `0` and `1`. The controller applies
    /// whatever value is returned without clamping.
    fn step_decision(&mut self) -> i32;
}

impl<P: MotionProfile + ?Sized> MotionProfile for &mut P {
    fn has_reached_target(&self) -> bool {
        (**self).has_reached_target()
    }

    fn step_decision(&mut self) -> i32 {
        (**self).step_decision()
    }
}

/// Time source trait for `no_std` compatibility.
///
/// Provides monotonic time in milliseconds for motion profile timing.
/// On desktop, this can wrap `std::time::Instant`. On embedded,
/// use a hardware timer.
///
/// # Example
///
/// ```rust
/// use valve_actuator::traits::Clock;
/// use valve_actuator::hal::MockClock;
///
/// let clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(100);
/// assert_eq!(clock.now_ms(), 100);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // OutputLine Tests
    // =========================================================================

    struct CountingLine {
        setups: usize,
        writes: usize,
        level: bool,
    }

    impl OutputLine for CountingLine {
        type Error = core::convert::Infallible;

        fn setup(&mut self) -> Result<(), Self::Error> {
            self.setups += 1;
            Ok(())
        }

        fn write(&mut self, level: bool) -> Result<(), Self::Error> {
            self.writes += 1;
            self.level = level;
            Ok(())
        }
    }

    #[test]
    fn output_line_records_writes() {
        let mut line = CountingLine {
            setups: 0,
            writes: 0,
            level: false,
        };
        line.setup().unwrap();
        line.write(true).unwrap();
        line.write(false).unwrap();

        assert_eq!(line.setups, 1);
        assert_eq!(line.writes, 2);
        assert!(!line.level);
    }

    // =========================================================================
    // MotionProfile Forwarding Tests
    // =========================================================================

    struct FixedProfile {
        at_target: bool,
        calls: u32,
    }

    impl MotionProfile for FixedProfile {
        fn has_reached_target(&self) -> bool {
            self.at_target
        }

        fn step_decision(&mut self) -> i32 {
            self.calls += 1;
            -1
        }
    }

    #[test]
    fn motion_profile_forwards_through_mut_ref() {
        let mut profile = FixedProfile {
            at_target: false,
            calls: 0,
        };
        {
            let mut borrowed = &mut profile;
            assert!(!borrowed.has_reached_target());
            assert_eq!(borrowed.step_decision(), -1);
        }
        assert_eq!(profile.calls, 1);
    }

    // =========================================================================
    // Clock Forwarding Tests
    // =========================================================================

    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn now_ms(&self) -> u64 {
            self.0
        }
    }

    fn read<C: Clock>(clock: C) -> u64 {
        clock.now_ms()
    }

    #[test]
    fn clock_forwards_through_ref() {
        let clock = FixedClock(42);
        assert_eq!(read(&clock), 42);
    }
}
