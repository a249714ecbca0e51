//! # Communications interface crate.
//!
//! Provides the communications interfaces between the path follower and the
//! motion simulation server.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Request and response definitions for equipment exposed by the simulator
pub mod eqpt;

/// Network module
pub mod net;
