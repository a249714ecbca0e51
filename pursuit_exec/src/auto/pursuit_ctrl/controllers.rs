//! # Pursuit control law
//!
//! This module maps the robot pose and carrot point onto speed demands.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Point2;
use serde::Serialize;

// Internal
use crate::auto::{
    geom::{angle_error, bearing_angle, distance, heading_angle},
    loc::Pose
};
use comms_if::eqpt::sim::DiffDriveDems;

use super::{Params, StatusReport};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A speed command for a differential drive robot.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ControlCommand {
    /// Angular speed in radians/second, positive counter-clockwise
    pub angular_speed_rads: f64,

    /// Linear speed in meters/second, positive forwards
    pub linear_speed_ms: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ControlCommand {
    /// A command which brings the robot to a standstill.
    pub fn stop() -> Self {
        Self {
            angular_speed_rads: 0.0,
            linear_speed_ms: 0.0
        }
    }

    /// Returns `true` if this command demands no motion.
    pub fn is_stop(&self) -> bool {
        self.angular_speed_rads == 0.0 && self.linear_speed_ms == 0.0
    }
}

impl From<ControlCommand> for DiffDriveDems {
    fn from(cmd: ControlCommand) -> Self {
        Self {
            target_angular_speed: cmd.angular_speed_rads,
            target_linear_speed: cmd.linear_speed_ms
        }
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the command which steers the robot at `pose` towards `target`.
///
/// The angular speed is the angle error to the target scaled by the angular gain, and limited if
/// the parameters set a limit. The linear speed is always the cruise speed. The error terms are
/// written into the report.
pub fn get_pursuit_cmd(
    pose: &Pose,
    target: &Point2<f64>,
    params: &Params,
    report: &mut StatusReport
) -> ControlCommand {
    let position = pose.position2();

    let dist_m = distance(target.x - position.x, target.y - position.y);
    let head_rad = heading_angle(&pose.forward());
    let bear_rad = bearing_angle(&position, target);
    let err_rad = angle_error(head_rad, bear_rad);

    report.target_x_m = Some(target.x);
    report.target_y_m = Some(target.y);
    report.dist_to_target_m = Some(dist_m);
    report.heading_rad = head_rad;
    report.bearing_rad = Some(bear_rad);
    report.angle_error_rad = Some(err_rad);

    let mut ang_speed_rads = err_rad * params.angular_gain;

    if let Some(max) = params.max_ang_speed_rads {
        if ang_speed_rads.abs() > max {
            ang_speed_rads = ang_speed_rads.signum() * max;
            report.ang_speed_limited = true;
        }
    }

    ControlCommand {
        angular_speed_rads: ang_speed_rads,
        linear_speed_ms: params.cruise_speed_ms
    }
}
