//! Clock-driven motion profile with acceleration and deceleration ramps.
//!
//! [`RampProfile`] tracks a target and a current position and paces
//! single-unit steps so that the step rate ramps up at the configured
//! acceleration, never exceeds the maximum speed, and ramps down in time
//! to stop at the target.
//!
//! # Example
//!
//! ```rust
//! use valve_actuator::profile::RampProfile;
//! use valve_actuator::hal::MockClock;
//! use valve_actuator::traits::MotionProfile;
//!
//! let clock = MockClock::new();
//! let mut profile = RampProfile::new(&clock).with_max_speed(1000.0);
//! profile.set_target(3);
//!
//! let mut moved = 0;
//! while !profile.has_reached_target() {
//!     clock.advance(1);
//!     moved += profile.step_decision();
//! }
//! assert_eq!(moved, 3);
//! ```

use crate::config::{ConfigError, MotionConfig, UNLIMITED};
use crate::traits::{Clock, MotionProfile};

/// Trapezoidal step-rate profile.
///
/// Speeds are in steps/s and ramps in steps/s². The profile assumes
/// [`step_decision`](MotionProfile::step_decision) is called at a roughly
/// constant interval; it moves at most one step per call.
#[derive(Debug)]
pub struct RampProfile<C: Clock> {
    clock: C,
    current_position: i32,
    target_position: i32,
    current_speed: f32,
    max_speed: f32,
    acceleration: f32,
    deceleration: f32,
    last_calculation_ms: u64,
    last_step_ms: u64,
}

impl<C: Clock> RampProfile<C> {
    /// Create a profile at position 0 with unlimited speed and ramps.
    pub fn new(clock: C) -> Self {
        let now = clock.now_ms();
        Self {
            clock,
            current_position: 0,
            target_position: 0,
            current_speed: 0.0,
            max_speed: UNLIMITED,
            acceleration: UNLIMITED,
            deceleration: UNLIMITED,
            last_calculation_ms: now,
            last_step_ms: now,
        }
    }

    /// Create a profile using the rates from a [`MotionConfig`].
    ///
    /// Fails if any rate is zero, negative or NaN.
    pub fn from_config(clock: C, config: &MotionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(clock)
            .with_max_speed(config.max_speed)
            .with_acceleration(config.acceleration)
            .with_deceleration(config.deceleration))
    }

    /// Set the maximum speed (builder form).
    pub fn with_max_speed(mut self, steps_per_s: f32) -> Self {
        self.set_max_speed(steps_per_s);
        self
    }

    /// Set the acceleration (builder form).
    pub fn with_acceleration(mut self, steps_per_s2: f32) -> Self {
        self.set_acceleration(steps_per_s2);
        self
    }

    /// Set the deceleration (builder form).
    pub fn with_deceleration(mut self, steps_per_s2: f32) -> Self {
        self.set_deceleration(steps_per_s2);
        self
    }

    /// Move the target. Takes effect on the next step decision.
    pub fn set_target(&mut self, steps: i32) {
        self.target_position = steps;
    }

    /// Overwrite the tracked position, e.g. after homing against an end stop.
    pub fn report_position(&mut self, steps: i32) {
        self.current_position = steps;
    }

    /// Set the maximum speed. Values that are not positive are ignored.
    pub fn set_max_speed(&mut self, steps_per_s: f32) {
        if !is_positive_rate(steps_per_s) {
            log::warn!("ignoring max speed {}", steps_per_s);
            return;
        }
        self.max_speed = steps_per_s;
        self.current_speed = self.current_speed.min(steps_per_s);
    }

    /// Set the acceleration. Values that are not positive are ignored.
    pub fn set_acceleration(&mut self, steps_per_s2: f32) {
        if !is_positive_rate(steps_per_s2) {
            log::warn!("ignoring acceleration {}", steps_per_s2);
            return;
        }
        self.acceleration = steps_per_s2;
    }

    /// Set the deceleration. Values that are not positive are ignored.
    pub fn set_deceleration(&mut self, steps_per_s2: f32) {
        if !is_positive_rate(steps_per_s2) {
            log::warn!("ignoring deceleration {}", steps_per_s2);
            return;
        }
        self.deceleration = steps_per_s2;
    }

    /// Tracked position.
    pub fn current_position(&self) -> i32 {
        self.current_position
    }

    /// Target position.
    pub fn target_position(&self) -> i32 {
        self.target_position
    }

    /// Step rate from the last speed calculation.
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    /// Maximum speed.
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Acceleration.
    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    /// Deceleration.
    pub fn deceleration(&self) -> f32 {
        self.deceleration
    }

    fn calculate_speed(&mut self, now_ms: u64) {
        let dt = now_ms.saturating_sub(self.last_calculation_ms) as f32 * 1e-3;
        self.last_calculation_ms = now_ms;

        if self.has_reached_target() {
            self.current_speed = 0.0;
            return;
        }

        let remaining = self.target_position.abs_diff(self.current_position);
        let v = self.current_speed;
        // distance needed to stop from v at the configured deceleration
        let steps_to_decelerate = (v * v / (2.0 * self.deceleration)) as u32;
        if remaining <= steps_to_decelerate {
            self.current_speed -= self.deceleration * dt;
        } else {
            self.current_speed += self.acceleration * dt;
        }
        self.current_speed = self.current_speed.clamp(0.0, self.max_speed);
    }
}

// false for NaN too
fn is_positive_rate(rate: f32) -> bool {
    rate > 0.0
}

impl<C: Clock> MotionProfile for RampProfile<C> {
    fn has_reached_target(&self) -> bool {
        self.current_position == self.target_position
    }

    fn step_decision(&mut self) -> i32 {
        let now = self.clock.now_ms();
        self.calculate_speed(now);
        if self.current_speed == 0.0 {
            return 0;
        }

        let since_step_ms = now.saturating_sub(self.last_step_ms) as f32;
        if since_step_ms >= 1e3 / self.current_speed {
            let delta = if self.target_position > self.current_position { 1 } else { -1 };
            self.last_step_ms = now;
            self.current_position += delta;
            return delta;
        }
        0
    }
}
