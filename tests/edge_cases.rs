//! Edge case and boundary condition tests for the actuator controller

use valve_actuator::{
    hal::{MockLine, MockProfile},
    render, ActuatorConfig, ActuatorController, CoilLines, DriveMode, MotionState,
};

fn three_lines() -> CoilLines<MockLine> {
    CoilLines::three(MockLine::new(), MockLine::new(), MockLine::new())
}

// ============================================================================
// Step Decision Magnitude
// ============================================================================

#[test]
fn oversized_step_decision_is_applied_unclamped() {
    let profile = MockProfile::new().with_target(100).with_forced_decision(3);
    let mut actuator = ActuatorController::new(three_lines(), profile, ActuatorConfig::default());

    actuator.tick().unwrap();
    assert_eq!(actuator.position(), 3);
    actuator.tick().unwrap();
    assert_eq!(actuator.position(), 6);
    assert_eq!(actuator.pattern(), render(6, DriveMode::FullStep));
}

#[test]
fn zero_step_decision_rewrites_same_pattern() {
    let profile = MockProfile::new().with_target(5).with_forced_decision(0);
    let mut actuator = ActuatorController::new(three_lines(), profile, ActuatorConfig::default());

    actuator.tick().unwrap();
    actuator.tick().unwrap();
    assert_eq!(actuator.position(), 0);
    assert_eq!(actuator.motion_state(), MotionState::Moving);
    assert!(actuator.wants_fast_polling());
    assert_eq!(actuator.lines().get(0).unwrap().history, [true, true]);
}

// ============================================================================
// Three-Line Actuators
// ============================================================================

#[test]
fn three_lines_never_write_d() {
    let profile = MockProfile::new().with_target(8);
    let mut actuator = ActuatorController::new(three_lines(), profile, ActuatorConfig::default());

    for _ in 0..8 {
        actuator.tick().unwrap();
        let pattern = actuator.pattern();
        let written: Vec<bool> = actuator.lines().iter().map(|l| l.level).collect();
        assert_eq!(written, pattern.levels::<3>());
        assert_eq!(actuator.line_levels().len(), 3);
    }
}

#[test]
fn three_lines_sleep_writes_only_three() {
    let config = ActuatorConfig::default().with_sleep_when_done(true);
    let mut actuator = ActuatorController::new(three_lines(), MockProfile::new(), config);
    actuator.setup().unwrap();

    assert_eq!(actuator.lines().len(), 3);
    for line in actuator.lines().iter() {
        assert_eq!(line.history, [false]);
    }
}

// ============================================================================
// Direction Changes
// ============================================================================

#[test]
fn reversing_retraces_patterns() {
    let profile = MockProfile::new().with_target(3);
    let config = ActuatorConfig::default().with_drive_mode(DriveMode::HalfStep);
    let mut actuator = ActuatorController::new(three_lines(), profile, config);

    let mut forward = Vec::new();
    for _ in 0..3 {
        actuator.tick().unwrap();
        forward.push(actuator.pattern());
    }

    actuator.profile_mut().set_target(0);
    let mut backward = Vec::new();
    for _ in 0..3 {
        actuator.tick().unwrap();
        backward.push(actuator.pattern());
    }

    assert_eq!(backward[0], forward[1]);
    assert_eq!(backward[1], forward[0]);
    assert_eq!(backward[2], render(0, DriveMode::HalfStep));
    assert_eq!(actuator.position(), 0);
}

#[test]
fn negative_positions_render_consistently() {
    let profile = MockProfile::new().with_target(-9);
    let mut actuator = ActuatorController::new(three_lines(), profile, ActuatorConfig::default());

    while actuator.profile().position != -9 {
        actuator.tick().unwrap();
        assert_eq!(
            actuator.pattern(),
            render(actuator.position() + 400, DriveMode::FullStep)
        );
    }
}

// ============================================================================
// Setup Behavior
// ============================================================================

#[test]
fn setup_while_away_from_target_takes_a_step() {
    let profile = MockProfile::new().with_target(10);
    let mut actuator = ActuatorController::new(three_lines(), profile, ActuatorConfig::default());
    actuator.setup().unwrap();

    assert_eq!(actuator.position(), 1);
    assert!(actuator.wants_fast_polling());
    assert_eq!(actuator.profile().decision_calls, 1);
}

#[test]
fn tick_before_setup_is_allowed() {
    let mut actuator =
        ActuatorController::new(three_lines(), MockProfile::new(), ActuatorConfig::default());
    actuator.tick().unwrap();

    assert!(actuator.lines().iter().all(|l| !l.is_set_up));
    assert_eq!(actuator.motion_state(), MotionState::Holding);
}
