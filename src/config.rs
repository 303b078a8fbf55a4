//! Shared configuration system for desktop and ESP32.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! # Example
//!
//! ```rust
//! use valve_actuator::config::{ActuatorConfig, Config, MotionConfig};
//! use valve_actuator::DriveMode;
//!
//! // Use defaults
//! let config = Config::default();
//!
//! // Or customize
//! let config = Config::default()
//!     .with_actuator(
//!         ActuatorConfig::default()
//!             .with_name("living-room")
//!             .with_drive_mode(DriveMode::HalfStep)
//!             .with_sleep_when_done(true),
//!     )
//!     .with_motion(MotionConfig::default().with_max_speed(250.0));
//! ```
//!
//! # Text Values
//!
//! Speeds and accelerations may be given as text, as in a device YAML file:
//!
//! ```rust
//! use valve_actuator::config::{parse_acceleration, parse_speed};
//!
//! assert_eq!(parse_speed("250 steps/s"), Ok(250.0));
//! assert_eq!(parse_acceleration("inf"), Ok(1e6));
//! assert!(parse_speed("-3").is_err());
//! ```

use heapless::String as HString;

use crate::sequencer::DriveMode;

/// Maximum length for short config strings (component names)
pub const MAX_SHORT_STRING: usize = 64;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Value substituted for `inf` speeds and accelerations (steps/s, steps/s²).
pub const UNLIMITED: f32 = 1e6;

// ============================================================================
// Helper for creating heapless strings
// ============================================================================

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    // Take only what fits
    let take = s.len().min(MAX_SHORT_STRING);
    // Find valid UTF-8 boundary
    let valid_end = s
        .char_indices()
        .take_while(|(i, c)| i + c.len_utf8() <= take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Errors
// ============================================================================

/// Reasons a configuration value is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Speed or acceleration text is not a floating point number.
    NotANumber,
    /// Speed must be larger than 0 steps/s.
    NonPositiveSpeed,
    /// Acceleration must be larger than 0 steps/s².
    NonPositiveAcceleration,
    /// Drive mode is not one of `FULL_STEP`, `HALF_STEP`, `WAVE_DRIVE`.
    UnknownDriveMode,
    /// JSON document could not be parsed.
    MalformedJson,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::NotANumber => write!(f, "expected a floating point number"),
            ConfigError::NonPositiveSpeed => write!(f, "speed must be larger than 0 steps/s"),
            ConfigError::NonPositiveAcceleration => {
                write!(f, "acceleration must be larger than 0 steps/s^2")
            }
            ConfigError::UnknownDriveMode => {
                write!(f, "drive mode must be FULL_STEP, HALF_STEP or WAVE_DRIVE")
            }
            ConfigError::MalformedJson => write!(f, "malformed configuration JSON"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

// ============================================================================
// Text Validation
// ============================================================================

const SPEED_SUFFIXES: [&str; 1] = ["steps/s"];

const ACCELERATION_SUFFIXES: [&str; 5] =
    ["steps/s^2", "steps/s*s", "steps/s/s", "steps/ss", "steps/(s*s)"];

fn parse_positive(s: &str, suffixes: &[&str], non_positive: ConfigError) -> Result<f32, ConfigError> {
    let mut value = s.trim();
    for suffix in suffixes {
        if let Some(stripped) = value.strip_suffix(suffix) {
            value = stripped.trim_end();
        }
    }

    if value == "inf" {
        return Ok(UNLIMITED);
    }

    let parsed: f32 = value.parse().map_err(|_| ConfigError::NotANumber)?;
    if parsed.is_nan() {
        return Err(ConfigError::NotANumber);
    }
    if parsed <= 0.0 {
        return Err(non_positive);
    }
    Ok(parsed)
}

/// Parse a speed such as `"250"`, `"250 steps/s"` or `"inf"`.
pub fn parse_speed(s: &str) -> Result<f32, ConfigError> {
    parse_positive(s, &SPEED_SUFFIXES, ConfigError::NonPositiveSpeed)
}

/// Parse an acceleration such as `"500 steps/s^2"` or `"inf"`.
pub fn parse_acceleration(s: &str) -> Result<f32, ConfigError> {
    parse_positive(s, &ACCELERATION_SUFFIXES, ConfigError::NonPositiveAcceleration)
}

/// Parse a drive mode key such as `"HALF_STEP"`.
pub fn parse_drive_mode(s: &str) -> Result<DriveMode, ConfigError> {
    DriveMode::from_text(s).ok_or(ConfigError::UnknownDriveMode)
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Coil driver configuration
    #[cfg_attr(feature = "serde", serde(default))]
    pub actuator: ActuatorConfig,
    /// Motion profile configuration
    #[cfg_attr(feature = "serde", serde(default))]
    pub motion: MotionConfig,
}

impl Config {
    /// Set actuator configuration
    pub fn with_actuator(mut self, actuator: ActuatorConfig) -> Self {
        self.actuator = actuator;
        self
    }

    /// Set motion configuration
    pub fn with_motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    /// Parse a configuration from JSON.
    ///
    /// Missing sections and fields keep their defaults; numeric motion
    /// values are re-validated after parsing.
    ///
    /// ```rust
    /// use valve_actuator::{Config, DriveMode};
    ///
    /// let json = br#"{"actuator": {"drive_mode": "WAVE_DRIVE", "sleep_when_done": true}}"#;
    /// let config = Config::from_json(json).unwrap();
    /// assert_eq!(config.actuator.drive_mode, DriveMode::WaveDrive);
    /// assert!(config.actuator.sleep_when_done);
    /// ```
    #[cfg(feature = "serde-json-core")]
    pub fn from_json(json: &[u8]) -> Result<Self, ConfigError> {
        let (config, _): (Self, usize) =
            serde_json_core::from_slice(json).map_err(|_| ConfigError::MalformedJson)?;
        config.motion.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Actuator Config
// ============================================================================

/// Coil driver configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActuatorConfig {
    /// Component name used in configuration dumps
    pub name: ShortString,
    /// Coil energization strategy
    pub drive_mode: DriveMode,
    /// De-energize all coils once the target is reached
    pub sleep_when_done: bool,
    /// Suggested tick interval while moving (milliseconds)
    pub fast_poll_interval_ms: u32,
    /// Suggested tick interval while holding (milliseconds)
    pub idle_poll_interval_ms: u32,
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            name: short_string("valve"),
            drive_mode: DriveMode::FullStep,
            sleep_when_done: false,
            fast_poll_interval_ms: 1,
            idle_poll_interval_ms: 16,
        }
    }
}

impl ActuatorConfig {
    /// Set the component name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }

    /// Set the drive mode
    pub fn with_drive_mode(mut self, mode: DriveMode) -> Self {
        self.drive_mode = mode;
        self
    }

    /// Set whether coils are de-energized at target
    pub fn with_sleep_when_done(mut self, sleep: bool) -> Self {
        self.sleep_when_done = sleep;
        self
    }

    /// Set the tick interval used while moving
    pub fn with_fast_poll_interval_ms(mut self, ms: u32) -> Self {
        self.fast_poll_interval_ms = ms;
        self
    }

    /// Set the tick interval used while holding
    pub fn with_idle_poll_interval_ms(mut self, ms: u32) -> Self {
        self.idle_poll_interval_ms = ms;
        self
    }
}

// ============================================================================
// Motion Config
// ============================================================================

/// Motion profile configuration (steps/s and steps/s²)
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConfig {
    /// Maximum step rate
    pub max_speed: f32,
    /// Ramp-up rate
    pub acceleration: f32,
    /// Ramp-down rate
    pub deceleration: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            max_speed: UNLIMITED,
            acceleration: UNLIMITED,
            deceleration: UNLIMITED,
        }
    }
}

impl MotionConfig {
    /// Set the maximum speed
    pub fn with_max_speed(mut self, steps_per_s: f32) -> Self {
        self.max_speed = steps_per_s;
        self
    }

    /// Set the acceleration
    pub fn with_acceleration(mut self, steps_per_s2: f32) -> Self {
        self.acceleration = steps_per_s2;
        self
    }

    /// Set the deceleration
    pub fn with_deceleration(mut self, steps_per_s2: f32) -> Self {
        self.deceleration = steps_per_s2;
        self
    }

    /// Check that all rates are positive numbers
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_speed.is_nan() || self.max_speed <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed);
        }
        for rate in [self.acceleration, self.deceleration] {
            if rate.is_nan() || rate <= 0.0 {
                return Err(ConfigError::NonPositiveAcceleration);
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
