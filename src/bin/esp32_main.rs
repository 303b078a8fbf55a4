//! ESP32-C3 SuperMini thermostat valve actuator.
//!
//! This is the main entry point for the physical hardware controller.
//! It runs the actuator control loop:
//! - Polls the motion profile for step decisions while moving
//! - Writes coil patterns to the ULN2003 inputs
//! - Drops to a slow poll (and optionally de-energizes coils) once at target
//!
//! # Build
//!
//! ```bash
//! cargo build --release --features esp32 --bin esp32_main
//! ```
//!
//! # Configuration
//!
//! Compile-time environment variables:
//! - `VALVE_DRIVE_MODE`: `FULL_STEP` (default), `HALF_STEP` or `WAVE_DRIVE`
//! - `VALVE_SLEEP_WHEN_DONE`: `true` to de-energize coils at target
//! - `VALVE_MAX_SPEED`, `VALVE_ACCELERATION`, `VALVE_DECELERATION`: e.g. `250 steps/s`
//! - `VALVE_TARGET`: initial target position in steps

use esp_idf_hal::gpio::OutputPin;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::log::EspLogger;
use valve_actuator::config::{parse_acceleration, parse_drive_mode, parse_speed};
use valve_actuator::hal::esp32::{esp32_line, Esp32Clock};
use valve_actuator::{
    ActuatorConfig, ActuatorController, CoilLines, Config, MotionConfig, RampProfile,
};
use std::thread;
use std::time::Duration;

/// Build the configuration from compile-time environment variables.
fn load_config() -> anyhow::Result<Config> {
    let mut actuator = ActuatorConfig::default().with_name("valve_actuator");
    if let Some(mode) = option_env!("VALVE_DRIVE_MODE") {
        actuator = actuator.with_drive_mode(parse_drive_mode(mode)?);
    }
    if let Some(sleep) = option_env!("VALVE_SLEEP_WHEN_DONE") {
        actuator = actuator.with_sleep_when_done(sleep.trim().eq_ignore_ascii_case("true"));
    }

    let mut motion = MotionConfig::default();
    if let Some(speed) = option_env!("VALVE_MAX_SPEED") {
        motion = motion.with_max_speed(parse_speed(speed)?);
    }
    if let Some(accel) = option_env!("VALVE_ACCELERATION") {
        motion = motion.with_acceleration(parse_acceleration(accel)?);
    }
    if let Some(decel) = option_env!("VALVE_DECELERATION") {
        motion = motion.with_deceleration(parse_acceleration(decel)?);
    }

    Ok(Config::default().with_actuator(actuator).with_motion(motion))
}

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    EspLogger::initialize_default();

    log::info!("================================");
    log::info!("  valve-actuator SuperMini");
    log::info!("================================");

    let config = load_config()?;
    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Initialize Coil Lines (ULN2003 IN1-IN3 on GPIO2/3/4)
    // =========================================================================
    let lines = CoilLines::three(
        esp32_line(peripherals.pins.gpio2.downgrade_output())?,
        esp32_line(peripherals.pins.gpio3.downgrade_output())?,
        esp32_line(peripherals.pins.gpio4.downgrade_output())?,
    );
    log::info!("[OK] Coil lines initialized (GPIO2/3/4)");

    // =========================================================================
    // Motion Profile + Controller
    // =========================================================================
    let profile = RampProfile::from_config(Esp32Clock::new(), &config.motion)?;
    let mut actuator = ActuatorController::new(lines, profile, config.actuator);
    actuator.setup()?;
    actuator.dump_config();

    if let Some(target) = option_env!("VALVE_TARGET") {
        let target: i32 = target.trim().parse()?;
        actuator.profile_mut().set_target(target);
        log::info!("Initial target: {} steps", target);
    }

    // =========================================================================
    // Main Loop
    // =========================================================================
    loop {
        actuator.tick()?;
        thread::sleep(Duration::from_millis(u64::from(actuator.poll_interval_ms())));
    }
}
