//! Desktop simulation of the valve actuator control loop.
//!
//! Drives a mock four-line actuator through a ramped motion profile and
//! prints each coil pattern as it is written, so the drive modes can be
//! compared without hardware.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example simulate
//! cargo run --example simulate -- HALF_STEP 12 sleep
//! ```
//!
//! Arguments: drive mode (default `FULL_STEP`), target steps (default 8),
//! and `sleep` to de-energize coils at target.

use std::thread;
use std::time::{Duration, Instant};

use valve_actuator::config::parse_drive_mode;
use valve_actuator::hal::MockLine;
use valve_actuator::{
    ActuatorConfig, ActuatorController, Clock, CoilLines, MotionConfig, MotionState, RampProfile,
};

/// Wall-clock time source for the simulation.
struct StdClock(Instant);

impl Clock for StdClock {
    fn now_ms(&self) -> u64 {
        self.0.elapsed().as_millis() as u64
    }
}

fn render_levels(levels: &[bool]) -> String {
    levels
        .iter()
        .zip(['A', 'B', 'C', 'D'])
        .map(|(&on, name)| if on { name } else { '.' })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let mode = parse_drive_mode(args.next().as_deref().unwrap_or("FULL_STEP"))?;
    let target: i32 = args.next().as_deref().unwrap_or("8").parse()?;
    let sleep = args.next().as_deref() == Some("sleep");

    println!("=================================");
    println!("  valve-actuator Simulation");
    println!("=================================");
    println!("Mode: {mode}, target: {target}, sleep when done: {sleep}");
    println!();

    let config = ActuatorConfig::default()
        .with_name("simulated")
        .with_drive_mode(mode)
        .with_sleep_when_done(sleep)
        .with_fast_poll_interval_ms(5)
        .with_idle_poll_interval_ms(50);
    let motion = MotionConfig::default()
        .with_max_speed(40.0)
        .with_acceleration(80.0)
        .with_deceleration(80.0);

    let lines = CoilLines::four(MockLine::new(), MockLine::new(), MockLine::new(), MockLine::new());
    let profile = RampProfile::from_config(StdClock(Instant::now()), &motion)?;
    let mut actuator = ActuatorController::new(lines, profile, config);
    actuator.setup()?;
    actuator.profile_mut().set_target(target);

    let mut last_position = None;
    loop {
        actuator.tick()?;
        if last_position != Some(actuator.position()) {
            last_position = Some(actuator.position());
            println!(
                "step {:>4}  [{}]  {:>6.1} steps/s",
                actuator.position(),
                render_levels(&actuator.line_levels()),
                actuator.profile().current_speed()
            );
        }
        if actuator.motion_state() != MotionState::Moving {
            break;
        }
        thread::sleep(Duration::from_millis(u64::from(actuator.poll_interval_ms())));
    }

    println!();
    println!(
        "Reached {} ({}), coils [{}]",
        actuator.position(),
        actuator.motion_state().as_str(),
        render_levels(&actuator.line_levels())
    );
    Ok(())
}
