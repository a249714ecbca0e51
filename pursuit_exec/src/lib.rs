//! # Pursuit library.
//!
//! This library provides the pure-pursuit path follower used by `pursuit_exec`, and allows
//! integration tests to drive the control loop without a simulation server.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Autonomy - localisation, paths, geometry and the pursuit controller
pub mod auto;

/// Control loop execution - runs the pursuit controller against a pose source and demand sink
pub mod exec;

/// Executable parameters
pub mod params;

/// Simulation client - reads the robot pose from and sends speed demands to the simulator
pub mod sim_client;
