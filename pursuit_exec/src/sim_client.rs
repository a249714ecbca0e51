//! # Simulation Client
//!
//! The SimClient connects the path follower to the motion simulation server. It reads the robot
//! pose from the server's localisation resource and posts speed demands to its differential
//! drive resource.
//!
//! Every call is a blocking request made in full before it returns, no state is held between
//! calls other than the HTTP connection pool.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::trace;

use crate::{
    auto::{loc::Pose, pursuit_ctrl::ControlCommand},
    exec::{DemandSink, PoseSource}
};
use comms_if::{
    eqpt::sim::{DiffDriveDems, LocalisationResponse, DIFF_DRIVE_PATH, LOCALISATION_PATH},
    net::{HttpClient, NetError, NetParams}
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Client for the simulation server.
///
/// Clones share the underlying connection pool, so one clone can be used as the pose source and
/// another as the demand sink.
#[derive(Clone)]
pub struct SimClient {
    client: HttpClient
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimClient {
    /// Create a new instance of the SimClient.
    pub fn new(params: &NetParams) -> Self {
        Self {
            client: HttpClient::new(params)
        }
    }

    /// The URL of the server's localisation resource.
    pub fn localisation_url(&self) -> String {
        self.client.url(LOCALISATION_PATH)
    }
}

impl PoseSource for SimClient {
    fn get_pose(&mut self) -> Result<Pose, NetError> {
        let response: LocalisationResponse = self.client.get_json(LOCALISATION_PATH)?;

        trace!("SimClient pose: {:?}", response.pose);

        Ok(Pose::from(response.pose))
    }
}

impl DemandSink for SimClient {
    fn send_dems(&mut self, cmd: &ControlCommand) -> Result<(), NetError> {
        self.client.post_json(DIFF_DRIVE_PATH, &DiffDriveDems::from(*cmd))
    }
}
