//! Actuator controller that ties coil sequencing to a motion profile.
//!
//! This module provides [`ActuatorController`], which owns the absolute step
//! counter and the coil lines, and runs the per-tick control loop.
//!
//! # Overview
//!
//! Each [`tick`](ActuatorController::tick):
//! - asks the motion profile whether the target has been reached
//! - while moving, requests fast polling and advances the counter by the
//!   profile's step decision
//! - once at target, drops the fast polling request and either holds the
//!   current coil pattern or, with sleep enabled, de-energizes every coil
//! - renders the counter with the configured [`DriveMode`] and writes the
//!   pattern to the lines
//!
//! # Example
//!
//! ```rust
//! use valve_actuator::{ActuatorConfig, ActuatorController, CoilLines, DriveMode};
//! use valve_actuator::hal::{MockLine, MockProfile};
//!
//! let lines = CoilLines::three(MockLine::new(), MockLine::new(), MockLine::new());
//! let config = ActuatorConfig::default().with_drive_mode(DriveMode::WaveDrive);
//! let mut actuator = ActuatorController::new(lines, MockProfile::new(), config);
//! actuator.setup().unwrap();
//!
//! actuator.profile_mut().set_target(2);
//! actuator.tick().unwrap();
//! assert!(actuator.wants_fast_polling());
//! assert_eq!(actuator.position(), 1);
//!
//! actuator.tick().unwrap();
//! actuator.tick().unwrap();
//! assert!(!actuator.wants_fast_polling());
//! assert_eq!(actuator.position(), 2);
//! ```

use heapless::Vec as HVec;

use crate::config::{ActuatorConfig, ShortString};
use crate::sequencer::{render, CoilPattern, DriveMode, COIL_COUNT};
use crate::traits::{MotionProfile, OutputLine};

// ============================================================================
// Coil Lines
// ============================================================================

/// Ordered set of 3 or 4 coil lines (A, B, C and optionally D).
///
/// Line `n` is driven by bit `n` of a [`CoilPattern`]. With three lines the
/// D bit is never written.
#[derive(Debug)]
pub struct CoilLines<L> {
    lines: HVec<L, COIL_COUNT>,
}

impl<L> CoilLines<L> {
    /// Three-line actuator (A, B, C).
    pub fn three(a: L, b: L, c: L) -> Self {
        Self {
            lines: [a, b, c].into_iter().collect(),
        }
    }

    /// Four-line actuator (A, B, C, D).
    pub fn four(a: L, b: L, c: L, d: L) -> Self {
        Self {
            lines: [a, b, c, d].into_iter().collect(),
        }
    }

    /// Number of lines (3 or 4).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false; a line set holds at least three lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at `index` (0 = A).
    pub fn get(&self, index: usize) -> Option<&L> {
        self.lines.get(index)
    }

    /// Iterate lines in terminal order.
    pub fn iter(&self) -> core::slice::Iter<'_, L> {
        self.lines.iter()
    }
}

impl<L: OutputLine> CoilLines<L> {
    /// Run every line's one-time setup, in terminal order.
    pub fn setup_all(&mut self) -> Result<(), L::Error> {
        for line in self.lines.iter_mut() {
            line.setup()?;
        }
        Ok(())
    }

    /// Write one bit of `pattern` to each line.
    pub fn write_pattern(&mut self, pattern: CoilPattern) -> Result<(), L::Error> {
        for (index, line) in self.lines.iter_mut().enumerate() {
            line.write(pattern.is_energized(index))?;
        }
        Ok(())
    }
}

// ============================================================================
// Scheduling Hint
// ============================================================================

/// Request for tighter tick polling while the actuator is moving.
///
/// `start` and `stop` are idempotent; each returns whether the call
/// changed the state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchedulingHint {
    active: bool,
}

impl SchedulingHint {
    /// New inactive hint.
    pub const fn new() -> Self {
        Self { active: false }
    }

    /// Request fast polling.
    pub fn start(&mut self) -> bool {
        let changed = !self.active;
        self.active = true;
        changed
    }

    /// Withdraw the fast polling request.
    pub fn stop(&mut self) -> bool {
        let changed = self.active;
        self.active = false;
        changed
    }

    /// Whether fast polling is currently requested.
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

// ============================================================================
// Controller
// ============================================================================

/// What the controller did on its most recent tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MotionState {
    /// Not at target; the counter advanced this tick.
    Moving,
    /// At target; the last pattern is held energized.
    #[default]
    Holding,
    /// At target with sleep enabled; every coil is de-energized.
    Sleeping,
}

impl MotionState {
    /// Returns the state as a lowercase string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MotionState::Moving => "moving",
            MotionState::Holding => "holding",
            MotionState::Sleeping => "sleeping",
        }
    }
}

/// Stepper valve actuator controller.
///
/// Owns the step counter, the coil lines and the motion profile.
///
/// # Type Parameters
///
/// - `L`: Coil line implementation ([`OutputLine`] trait)
/// - `P`: Motion profile implementation ([`MotionProfile`] trait)
///
/// # Thread Safety
///
/// The controller is a single-threaded polled loop. Every method runs to
/// completion; call [`tick`](Self::tick) from one place only.
#[derive(Debug)]
pub struct ActuatorController<L: OutputLine, P: MotionProfile> {
    lines: CoilLines<L>,
    profile: P,
    name: ShortString,
    drive_mode: DriveMode,
    sleep_when_done: bool,
    fast_poll_interval_ms: u32,
    idle_poll_interval_ms: u32,
    position: i32,
    hint: SchedulingHint,
    motion: MotionState,
    pattern: CoilPattern,
}

impl<L: OutputLine, P: MotionProfile> ActuatorController<L, P> {
    /// Create a controller with the counter at 0.
    ///
    /// Nothing is written until [`setup`](Self::setup) is called.
    pub fn new(lines: CoilLines<L>, profile: P, config: ActuatorConfig) -> Self {
        Self {
            lines,
            profile,
            name: config.name,
            drive_mode: config.drive_mode,
            sleep_when_done: config.sleep_when_done,
            fast_poll_interval_ms: config.fast_poll_interval_ms,
            idle_poll_interval_ms: config.idle_poll_interval_ms,
            position: 0,
            hint: SchedulingHint::new(),
            motion: MotionState::Holding,
            pattern: CoilPattern::OFF,
        }
    }

    /// Initialize every line, then run one tick so the outputs reflect the
    /// counter before the first scheduled tick.
    pub fn setup(&mut self) -> Result<(), L::Error> {
        self.lines.setup_all()?;
        self.tick()
    }

    /// Run one control loop iteration. Call on every scheduler pass.
    pub fn tick(&mut self) -> Result<(), L::Error> {
        if self.profile.has_reached_target() {
            if self.hint.stop() {
                log::debug!("{}: target reached at step {}", self.name, self.position);
            }

            if self.sleep_when_done {
                self.set_motion(MotionState::Sleeping);
                self.lines.write_pattern(CoilPattern::OFF)?;
                self.pattern = CoilPattern::OFF;
                return Ok(());
            }
            self.set_motion(MotionState::Holding);
        } else {
            if self.hint.start() {
                log::debug!("{}: moving from step {}", self.name, self.position);
            }
            self.set_motion(MotionState::Moving);

            let delta = self.profile.step_decision();
            // 2^32 is a multiple of every phase modulus, so wrapping keeps the sequence intact
            self.position = self.position.wrapping_add(delta);
        }

        let pattern = render(self.position, self.drive_mode);
        self.lines.write_pattern(pattern)?;
        self.pattern = pattern;
        Ok(())
    }

    fn set_motion(&mut self, motion: MotionState) {
        if self.motion != motion {
            log::trace!("{}: {} -> {}", self.name, self.motion.as_str(), motion.as_str());
            self.motion = motion;
        }
    }

    /// Log the configuration at info level.
    pub fn dump_config(&self) {
        log::info!("{}:", self.name);
        log::info!("  Coil lines: {}", self.lines.len());
        log::info!(
            "  Sleep when done: {}",
            if self.sleep_when_done { "YES" } else { "NO" }
        );
        log::info!("  Step Mode: {}", self.drive_mode.as_str());
    }

    /// Absolute step counter.
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Configured drive mode.
    pub fn drive_mode(&self) -> DriveMode {
        self.drive_mode
    }

    /// Whether coils are de-energized at target.
    pub fn sleep_when_done(&self) -> bool {
        self.sleep_when_done
    }

    /// Whether the controller is requesting fast polling (moving).
    pub fn wants_fast_polling(&self) -> bool {
        self.hint.is_active()
    }

    /// Suggested delay before the next tick.
    pub fn poll_interval_ms(&self) -> u32 {
        if self.hint.is_active() {
            self.fast_poll_interval_ms
        } else {
            self.idle_poll_interval_ms
        }
    }

    /// State chosen on the most recent tick.
    pub fn motion_state(&self) -> MotionState {
        self.motion
    }

    /// Pattern most recently written to the lines.
    pub fn pattern(&self) -> CoilPattern {
        self.pattern
    }

    /// Levels most recently written, one per line.
    pub fn line_levels(&self) -> HVec<bool, COIL_COUNT> {
        (0..self.lines.len())
            .map(|line| self.pattern.is_energized(line))
            .collect()
    }

    /// Coil lines.
    pub fn lines(&self) -> &CoilLines<L> {
        &self.lines
    }

    /// Motion profile.
    pub fn profile(&self) -> &P {
        &self.profile
    }

    /// Motion profile, for setting targets.
    pub fn profile_mut(&mut self) -> &mut P {
        &mut self.profile
    }

    /// Consume the controller, returning the lines and profile.
    pub fn into_parts(self) -> (CoilLines<L>, P) {
        (self.lines, self.profile)
    }

    /// Snapshot for diagnostics.
    pub fn state(&self) -> ActuatorState {
        ActuatorState {
            position: self.position,
            drive_mode: self.drive_mode,
            sleep_when_done: self.sleep_when_done,
            motion: self.motion,
            pattern: self.pattern,
            fast_polling: self.hint.is_active(),
        }
    }
}

/// Full state snapshot for diagnostics.
///
/// # Example
///
/// ```rust
/// use valve_actuator::{ActuatorConfig, ActuatorController, CoilLines, MotionState};
/// use valve_actuator::hal::{MockLine, MockProfile};
///
/// let lines = CoilLines::three(MockLine::new(), MockLine::new(), MockLine::new());
/// let actuator = ActuatorController::new(lines, MockProfile::new(), ActuatorConfig::default());
///
/// let state = actuator.state();
/// assert_eq!(state.position, 0);
/// assert_eq!(state.motion, MotionState::Holding);
/// assert!(!state.fast_polling);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActuatorState {
    /// Absolute step counter.
    pub position: i32,
    /// Configured drive mode.
    pub drive_mode: DriveMode,
    /// Whether coils are de-energized at target.
    pub sleep_when_done: bool,
    /// State chosen on the most recent tick.
    pub motion: MotionState,
    /// Pattern most recently written.
    pub pattern: CoilPattern,
    /// Whether fast polling is requested.
    pub fast_polling: bool,
}
