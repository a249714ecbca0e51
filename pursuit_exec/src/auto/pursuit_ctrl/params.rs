//! Pursuit control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for pursuit control
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Params {

    /// Linear speed demanded while following the path
    pub cruise_speed_ms: f64,

    /// Gain applied to the angle error to get the angular speed demand
    pub angular_gain: f64,

    /// Waypoints closer than this distance to the robot are considered reached
    pub look_ahead_m: f64,

    /// Optional limit on the magnitude of the angular speed demand. If not set the demand is not
    /// limited.
    #[serde(default)]
    pub max_ang_speed_rads: Option<f64>
}

#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("Cruise speed must be finite and positive, found {0}")]
    InvalidCruiseSpeed(f64),

    #[error("Angular gain must be finite and positive, found {0}")]
    InvalidAngularGain(f64),

    #[error("Look-ahead distance must be finite and positive, found {0}")]
    InvalidLookAhead(f64),

    #[error("Angular speed limit must be finite and non-negative, found {0}")]
    InvalidMaxAngSpeed(f64)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Params {

    /// Determines if the parameters are valid.
    ///
    /// A look-ahead distance which isn't positive would mean no waypoint is ever reached, and a
    /// negative angular speed limit can't be applied.
    pub fn are_valid(&self) -> Result<(), ParamsError> {
        if !is_positive(self.cruise_speed_ms) {
            return Err(ParamsError::InvalidCruiseSpeed(self.cruise_speed_ms))
        }

        if !is_positive(self.angular_gain) {
            return Err(ParamsError::InvalidAngularGain(self.angular_gain))
        }

        if !is_positive(self.look_ahead_m) {
            return Err(ParamsError::InvalidLookAhead(self.look_ahead_m))
        }

        if let Some(max) = self.max_ang_speed_rads {
            if !(max.is_finite() && max >= 0.0) {
                return Err(ParamsError::InvalidMaxAngSpeed(max))
            }
        }

        Ok(())
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            cruise_speed_ms: 0.7,
            angular_gain: 1.3,
            look_ahead_m: 1.0,
            max_ang_speed_rads: None
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
