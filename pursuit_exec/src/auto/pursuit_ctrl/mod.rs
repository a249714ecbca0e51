//! # Pursuit control module
//!
//! Pursuit control is responsible for driving the robot along a recorded path. It does this by
//! chasing a "carrot point": the first waypoint on the path which is still at least the
//! look-ahead distance away from the robot. Waypoints closer than that are considered reached
//! and are removed from the path.
//!
//! Each cycle the angle error between the robot's heading and the bearing to the carrot point is
//! computed, and the angular speed demand is proportional to that error. The linear speed demand
//! is a constant cruise speed. Once every waypoint has been reached the robot is stopped and the
//! module returns to `Off`.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod carrot;
pub mod controllers;
pub mod params;
pub mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use carrot::*;
pub use controllers::*;
pub use params::{Params, ParamsError};
pub use state::*;
