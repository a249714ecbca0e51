//! # Pursuit Executable Parameters
//!
//! This module provide parameters for the pursuit executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Serialize, Deserialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PursuitExecParams {

    /// Recorded path file to follow, relative to the software root
    pub path_file: String,

    /// Target period of one control cycle in seconds
    pub cycle_period_s: f64
}
