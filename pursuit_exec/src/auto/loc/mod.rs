//! # Localisation module
//!
//! This module provides the pose of the robot. The pose itself comes from the simulation
//! server, this module only converts it into the quantities the controller works with: the
//! planar position and the forward (heading) vector.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::{Point2, Quaternion, Vector3};
use comms_if::eqpt::sim::SimPose;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The current pose (position and attitude in the world frame) of the robot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pose {

    /// The position in the world frame
    pub position_m: Vector3<f64>,

    /// The attitude of the robot in the world frame. This quaternion rotates a vector in the
    /// robot body frame into the world frame.
    pub attitude_q: Quaternion<f64>
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {

    /// Build a planar pose at `(x, y)` with the given yaw about +Z.
    pub fn from_xy_yaw(x: f64, y: f64, yaw_rad: f64) -> Self {
        let half = 0.5 * yaw_rad;

        Self {
            position_m: Vector3::new(x, y, 0.0),
            attitude_q: Quaternion::new(half.cos(), 0.0, 0.0, half.sin())
        }
    }

    /// Return the 2D position of the robot.
    pub fn position2(&self) -> Point2<f64> {
        Point2::new(self.position_m[0], self.position_m[1])
    }

    /// Return the forward direction of the robot in the world frame.
    ///
    /// This is the body +X axis rotated into the world frame, `q * (0, x) * q'`. For a unit
    /// attitude quaternion the result is a unit vector.
    pub fn forward(&self) -> Vector3<f64> {
        let body_x = Quaternion::from_imag(Vector3::x());

        (self.attitude_q * body_x * self.attitude_q.conjugate()).imag()
    }
}

impl From<SimPose> for Pose {
    fn from(sim: SimPose) -> Self {
        Self {
            position_m: Vector3::new(sim.position.x, sim.position.y, sim.position.z),
            attitude_q: Quaternion::new(
                sim.orientation.w,
                sim.orientation.x,
                sim.orientation.y,
                sim.orientation.z
            )
        }
    }
}
