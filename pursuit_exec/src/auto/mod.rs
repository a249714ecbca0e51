//! # Autonomy module
//!
//! Everything needed to follow a recorded path: where the robot is (`loc`), where it should go
//! (`path`), the planar geometry relating the two (`geom`), and the controller which turns them
//! into speed demands (`pursuit_ctrl`).

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod geom;
pub mod loc;
pub mod path;
pub mod pursuit_ctrl;
