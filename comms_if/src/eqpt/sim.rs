//! # Simulator Equipment Interface
//!
//! Structures exchanged with the motion simulation server over its HTTP interface, plus the
//! record format of recorded path files (which are dumps of the same localisation responses).
//!
//! Field names on the wire are PascalCase, e.g. `Pose.Position.X`.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Resource which returns the robot's current pose, answered with `200 OK`.
pub const LOCALISATION_PATH: &str = "/lokarria/localization";

/// Resource which accepts differential drive speed demands, answered with `204 No Content`.
pub const DIFF_DRIVE_PATH: &str = "/lokarria/differentialdrive";

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Position in the world frame in meters.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Position {
    pub x: f64,
    pub y: f64,

    /// Height is not used for planar control and may be absent in path files.
    #[serde(default)]
    pub z: f64
}

/// Orientation quaternion of the robot in the world frame.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Orientation {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64
}

/// Position and orientation as reported by the simulator.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SimPose {
    pub position: Position,
    pub orientation: Orientation
}

/// Response to a `GET` on [`LOCALISATION_PATH`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct LocalisationResponse {
    pub pose: SimPose
}

/// Demands that are posted to [`DIFF_DRIVE_PATH`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DiffDriveDems {
    /// Angular speed demand in radians/second, positive counter-clockwise.
    pub target_angular_speed: f64,

    /// Linear speed demand in meters/second, positive forwards.
    pub target_linear_speed: f64
}

/// The pose part of a recorded path record, only the position is needed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PathPose {
    pub position: Position
}

/// A single record of a recorded path file.
///
/// Path files are JSON arrays of these records in the order they were recorded. Any other
/// fields in the records (timestamps, orientations) are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PathRecord {
    pub pose: PathPose
}
