//! Request types for the actuator's automation actions.
//!
//! These types are `no_std` compatible and can be deserialized using
//! `serde-json-core` on the device or any serde format on the desktop.
//!
//! # Example
//!
//! ```
//! use valve_actuator::messages::SetTargetRequest;
//!
//! #[cfg(feature = "serde-json-core")]
//! {
//!     let json = br#"{"target": 120}"#;
//!     let (req, _): (SetTargetRequest, _) = serde_json_core::from_slice(json).unwrap();
//!     assert_eq!(req.target, 120);
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::profile::RampProfile;
use crate::traits::Clock;

// ============================================================================
// Request Types
// ============================================================================

/// Request to move the actuator to an absolute step position.
///
/// # JSON Example
///
/// ```json
/// {"target": 450}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetTargetRequest {
    /// Target position in steps
    pub target: i32,
}

/// Request to overwrite the tracked position without moving.
///
/// Used after homing: drive into the end stop, then report position 0.
///
/// # JSON Example
///
/// ```json
/// {"position": 0}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPositionRequest {
    /// Current position in steps
    pub position: i32,
}

/// Request to change the maximum step rate.
///
/// # JSON Example
///
/// ```json
/// {"speed": 250.0}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetSpeedRequest {
    /// Maximum speed in steps/s
    pub speed: f32,
}

/// Any automation action, keyed by action name.
///
/// # JSON Examples
///
/// ```json
/// {"set_target": {"target": 450}}
/// {"report_position": {"position": 0}}
/// {"set_speed": {"speed": 250.0}}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActuatorRequest {
    /// Move to an absolute position.
    SetTarget {
        /// Target position in steps
        target: i32,
    },
    /// Overwrite the tracked position.
    ReportPosition {
        /// Current position in steps
        position: i32,
    },
    /// Change the maximum step rate.
    SetSpeed {
        /// Maximum speed in steps/s
        speed: f32,
    },
}

impl From<SetTargetRequest> for ActuatorRequest {
    fn from(req: SetTargetRequest) -> Self {
        ActuatorRequest::SetTarget { target: req.target }
    }
}

impl From<ReportPositionRequest> for ActuatorRequest {
    fn from(req: ReportPositionRequest) -> Self {
        ActuatorRequest::ReportPosition {
            position: req.position,
        }
    }
}

impl From<SetSpeedRequest> for ActuatorRequest {
    fn from(req: SetSpeedRequest) -> Self {
        ActuatorRequest::SetSpeed { speed: req.speed }
    }
}

impl ActuatorRequest {
    /// Apply the request to a motion profile.
    ///
    /// Non-positive or NaN speeds are ignored.
    pub fn apply<C: Clock>(self, profile: &mut RampProfile<C>) {
        match self {
            ActuatorRequest::SetTarget { target } => profile.set_target(target),
            ActuatorRequest::ReportPosition { position } => profile.report_position(position),
            ActuatorRequest::SetSpeed { speed } => profile.set_max_speed(speed),
        }
    }
}

// ============================================================================
// Parsing (serde-json-core)
// ============================================================================

/// Parse a set-target request from JSON bytes.
#[cfg(feature = "serde-json-core")]
pub fn parse_set_target_request(json: &[u8]) -> Option<SetTargetRequest> {
    serde_json_core::from_slice(json).ok().map(|(req, _)| req)
}

/// Parse a report-position request from JSON bytes.
#[cfg(feature = "serde-json-core")]
pub fn parse_report_position_request(json: &[u8]) -> Option<ReportPositionRequest> {
    serde_json_core::from_slice(json).ok().map(|(req, _)| req)
}

/// Parse a set-speed request from JSON bytes.
#[cfg(feature = "serde-json-core")]
pub fn parse_set_speed_request(json: &[u8]) -> Option<SetSpeedRequest> {
    serde_json_core::from_slice(json).ok().map(|(req, _)| req)
}
