//! # Equipment Interface
//!
//! This module defines the interface structures which are exchanged with the simulation server.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod sim;
