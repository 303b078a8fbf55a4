//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for the hardware traits, enabling
//! development and testing on desktop without an actuator attached.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockLine`] | [`OutputLine`] | Records setup and every written level |
//! | [`MockProfile`] | [`MotionProfile`] | Walks toward a target one step per tick |
//! | [`MockClock`] | [`Clock`] | Controllable time source |
//!
//! # Example
//!
//! ```rust
//! use valve_actuator::{ActuatorController, ActuatorConfig, CoilLines};
//! use valve_actuator::hal::{MockLine, MockProfile};
//!
//! let lines = CoilLines::four(MockLine::new(), MockLine::new(), MockLine::new(), MockLine::new());
//! let mut actuator = ActuatorController::new(lines, MockProfile::new(), ActuatorConfig::default());
//! actuator.setup().unwrap();
//!
//! // Full step at position 0 energizes A and B
//! assert_eq!(actuator.line_levels().as_slice(), &[true, true, false, false]);
//! ```
//!
//! [`OutputLine`]: crate::traits::OutputLine
//! [`MotionProfile`]: crate::traits::MotionProfile
//! [`Clock`]: crate::traits::Clock

use alloc::vec::Vec;
use core::convert::Infallible;

use crate::traits::{Clock, MotionProfile, OutputLine};

// ============================================================================
// Hardware Mocks
// ============================================================================

/// Mock output line for testing.
///
/// Records the setup call and every level written, in order. Use the
/// public fields to inspect state after test operations.
///
/// # Example
///
/// ```rust
/// use valve_actuator::hal::MockLine;
/// use valve_actuator::traits::OutputLine;
///
/// let mut line = MockLine::new();
/// line.write(true).unwrap();
/// line.write(false).unwrap();
///
/// assert!(!line.level);
/// assert_eq!(line.history, vec![true, false]);
/// assert_eq!(line.write_count(), 2);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MockLine {
    /// Most recently written level.
    pub level: bool,
    /// Whether `setup` has been called.
    pub is_set_up: bool,
    /// Number of times `setup` was called.
    pub setup_count: usize,
    /// Every level written, oldest first.
    pub history: Vec<bool>,
}

impl MockLine {
    /// Creates a new low, not-yet-set-up line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes since creation.
    pub fn write_count(&self) -> usize {
        self.history.len()
    }

    /// Forget recorded writes, keeping the current level.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl OutputLine for MockLine {
    type Error = Infallible;

    fn setup(&mut self) -> Result<(), Infallible> {
        self.is_set_up = true;
        self.setup_count += 1;
        Ok(())
    }

    fn write(&mut self, level: bool) -> Result<(), Infallible> {
        self.level = level;
        self.history.push(level);
        Ok(())
    }
}

/// Mock motion profile for testing.
///
/// By default it tracks `position` toward `target` one unit per
/// [`step_decision`](MotionProfile::step_decision) call. Set
/// `forced_decision` to return a fixed delta without moving.
///
/// # Example
///
/// ```rust
/// use valve_actuator::hal::MockProfile;
/// use valve_actuator::traits::MotionProfile;
///
/// let mut profile = MockProfile::new().with_target(2);
/// assert!(!profile.has_reached_target());
///
/// assert_eq!(profile.step_decision(), 1);
/// assert_eq!(profile.step_decision(), 1);
/// assert!(profile.has_reached_target());
/// assert_eq!(profile.decision_calls, 2);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MockProfile {
    /// Tracked position.
    pub position: i32,
    /// Target position.
    pub target: i32,
    /// Delta returned instead of walking toward the target, if set.
    pub forced_decision: Option<i32>,
    /// Number of times `step_decision` was called.
    pub decision_calls: usize,
}

impl MockProfile {
    /// Creates a profile at position 0 with target 0 (already at target).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target position.
    pub fn with_target(mut self, target: i32) -> Self {
        self.target = target;
        self
    }

    /// Forces every decision to `delta` without moving the tracked position.
    pub fn with_forced_decision(mut self, delta: i32) -> Self {
        self.forced_decision = Some(delta);
        self
    }

    /// Moves the target.
    pub fn set_target(&mut self, target: i32) {
        self.target = target;
    }
}

impl MotionProfile for MockProfile {
    fn has_reached_target(&self) -> bool {
        self.position == self.target
    }

    fn step_decision(&mut self) -> i32 {
        self.decision_calls += 1;
        if let Some(delta) = self.forced_decision {
            return delta;
        }
        let delta = (self.target - self.position).signum();
        self.position += delta;
        delta
    }
}

/// Mock clock for testing.
///
/// Provides a controllable time source for testing time-dependent behavior.
///
/// # Example
///
/// ```rust
/// use valve_actuator::hal::MockClock;
/// use valve_actuator::traits::Clock;
///
/// let clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.set(1000);
/// assert_eq!(clock.now_ms(), 1000);
///
/// clock.advance(500);
/// assert_eq!(clock.now_ms(), 1500);
/// ```
#[derive(Debug, Default)]
pub struct MockClock {
    current_ms: core::cell::Cell<u64>,
}

impl MockClock {
    /// Creates a new mock clock starting at 0ms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current time in milliseconds.
    pub fn set(&self, ms: u64) {
        self.current_ms.set(ms);
    }

    /// Advances the clock by the given duration.
    pub fn advance(&self, ms: u64) {
        self.current_ms.set(self.current_ms.get() + ms);
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // MockLine Tests
    // =========================================================================

    #[test]
    fn mock_line_default() {
        let line = MockLine::new();
        assert!(!line.level);
        assert!(!line.is_set_up);
        assert_eq!(line.setup_count, 0);
        assert_eq!(line.write_count(), 0);
    }

    #[test]
    fn mock_line_setup() {
        let mut line = MockLine::new();
        line.setup().unwrap();
        assert!(line.is_set_up);
        assert_eq!(line.setup_count, 1);
    }

    #[test]
    fn mock_line_records_history() {
        let mut line = MockLine::new();
        line.write(true).unwrap();
        line.write(true).unwrap();
        line.write(false).unwrap();
        assert_eq!(line.history, [true, true, false]);
        assert!(!line.level);

        line.clear_history();
        assert_eq!(line.write_count(), 0);
        assert!(!line.level);
    }

    // =========================================================================
    // MockProfile Tests
    // =========================================================================

    #[test]
    fn mock_profile_starts_at_target() {
        let profile = MockProfile::new();
        assert!(profile.has_reached_target());
    }

    #[test]
    fn mock_profile_walks_backwards() {
        let mut profile = MockProfile::new().with_target(-2);
        assert_eq!(profile.step_decision(), -1);
        assert_eq!(profile.position, -1);
        assert_eq!(profile.step_decision(), -1);
        assert!(profile.has_reached_target());
        assert_eq!(profile.step_decision(), 0);
    }

    #[test]
    fn mock_profile_forced_decision() {
        let mut profile = MockProfile::new().with_target(10).with_forced_decision(3);
        assert_eq!(profile.step_decision(), 3);
        assert_eq!(profile.step_decision(), 3);
        assert_eq!(profile.position, 0);
        assert_eq!(profile.decision_calls, 2);
    }

    // =========================================================================
    // MockClock Tests
    // =========================================================================

    #[test]
    fn mock_clock_shared_reference() {
        let clock = MockClock::new();
        let reader = &clock;
        clock.advance(25);
        assert_eq!(reader.now_ms(), 25);
    }
}
