//! Pursuit control module state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};
use nalgebra::Point2;
use serde::Serialize;

// Internal
use super::*;
use crate::auto::{loc::Pose, path::Path};
use util::{
    archive::{ArchiveError, Archiver},
    module::State,
    params,
    session::Session
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

pub struct PursuitCtrl {
    params: Params,

    /// Executing mode
    mode: PursuitCtrlMode,

    /// The path being followed. Waypoints are removed as they are reached.
    path: Option<Path>,

    report: StatusReport,
    arch_report: Archiver
}

/// Input data to pursuit control.
#[derive(Debug, Copy, Clone)]
pub struct InputData {
    /// The current pose of the robot
    pub pose: Pose
}

/// The status report containing the quantities computed during a cycle.
///
/// Fields relating to the target are `None` on cycles where there was no target.
#[derive(Debug, Default, Copy, Clone, Serialize)]
pub struct StatusReport {
    /// Position of the robot
    pub position_x_m: f64,
    pub position_y_m: f64,

    /// The carrot point being steered towards
    pub target_x_m: Option<f64>,
    pub target_y_m: Option<f64>,

    /// Distance from the robot to the carrot point
    pub dist_to_target_m: Option<f64>,

    /// Heading of the robot
    pub heading_rad: f64,

    /// Bearing from the robot to the carrot point
    pub bearing_rad: Option<f64>,

    /// Signed angle error (bearing - heading) in (-pi, pi]
    pub angle_error_rad: Option<f64>,

    /// If true the angular speed demand was limited
    pub ang_speed_limited: bool,

    /// Number of waypoints reached (and removed) this cycle
    pub num_points_reached: usize,

    /// Number of waypoints left in the path after this cycle
    pub num_points_remaining: usize
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Potential errors that can occur during processing of the module.
#[derive(Debug, thiserror::Error)]
pub enum PursuitCtrlError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(params::LoadError),

    #[error("Parameters are invalid: {0}")]
    ParamsInvalid(ParamsError),

    #[error("Could not create the status report archive: {0}")]
    ArchiveError(ArchiveError),

    /// A path is already loaded. This error occurs when attempting to start a new path before
    /// the current one has finished.
    #[error("Attempted to load a path while one is already loaded")]
    PathAlreadyLoaded,

    /// Attempted to load a path without any points in it.
    #[error("Attempted to load an empty path")]
    AttemptEmptyPathLoad,

    /// The module is in follow path mode but there is no path loaded.
    #[error("No path has been set")]
    NoPath
}

/// The possible modes of execution of PursuitCtrl. Each mode is handled by a `mode_xyz`
/// function.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PursuitCtrlMode {
    Off,
    FollowPath
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for PursuitCtrl {
    type InitData = &'static str;
    type InitError = PursuitCtrlError;

    type InputData = InputData;
    type OutputData = Option<ControlCommand>;
    type StatusReport = StatusReport;
    type ProcError = PursuitCtrlError;

    /// Initialise the PursuitCtrl module.
    ///
    /// Expected init data is the path to the parameter file.
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>
    {
        self.params = params::load(init_data)
            .map_err(PursuitCtrlError::ParamLoadError)?;

        // Check parameters are valid
        self.params.are_valid()
            .map_err(PursuitCtrlError::ParamsInvalid)?;

        self.arch_report = Archiver::from_path(session, "pursuit_ctrl/status_report.csv")
            .map_err(PursuitCtrlError::ArchiveError)?;

        Ok(())
    }

    /// Process pursuit control.
    ///
    /// Processing involves:
    ///  1. Selecting the carrot point, removing reached waypoints from the path.
    ///  1. Calculating the speed command to steer towards the carrot point, or a stop command if
    ///     the path has been completed.
    ///
    /// In `Off` mode no command is output.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        // Setup cycle data
        self.report = StatusReport::default();
        self.report.position_x_m = input_data.pose.position_m[0];
        self.report.position_y_m = input_data.pose.position_m[1];

        let output = match self.mode {
            PursuitCtrlMode::Off => self.mode_off(),
            PursuitCtrlMode::FollowPath => self.mode_follow_path(&input_data.pose)
        }?;

        debug!(
            "PursuitCtrl: target {:?}, angle error {:?} rad, {} points remaining, cmd {:?}",
            self.report.target_x_m.zip(self.report.target_y_m),
            self.report.angle_error_rad,
            self.report.num_points_remaining,
            output
        );

        if let Err(e) = self.arch_report.serialise(self.report) {
            warn!("Could not archive the PursuitCtrl status report: {}", e);
        }

        Ok((output, self.report))
    }
}

impl PursuitCtrl {
    /// Create a new instance of the module with the given parameters.
    ///
    /// The module starts in `Off` mode without archiving. Use `State::init` to load parameters
    /// from a file and archive into a session.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            mode: PursuitCtrlMode::Off,
            path: None,
            report: StatusReport::default(),
            arch_report: Archiver::default()
        }
    }

    /// The parameters in use.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The current mode.
    pub fn mode(&self) -> PursuitCtrlMode {
        self.mode
    }

    /// Returns `true` while a path is being followed.
    pub fn is_following(&self) -> bool {
        self.mode == PursuitCtrlMode::FollowPath
    }

    /// Number of waypoints not yet reached on the current path.
    pub fn num_points_remaining(&self) -> usize {
        self.path.as_ref().map(Path::get_num_points).unwrap_or(0)
    }

    /// Begin following a path.
    ///
    /// Following starts on the next call to `proc`. Loading a new path before the current one
    /// has finished will result in an error, use `abort_path` first. Following is refused if the
    /// parameters are invalid.
    pub fn begin_path(&mut self, path: Path) -> Result<(), PursuitCtrlError> {

        self.params.are_valid()
            .map_err(PursuitCtrlError::ParamsInvalid)?;

        // Check to see if there's already a path loaded
        if self.path.is_some() {
            return Err(PursuitCtrlError::PathAlreadyLoaded)
        }

        if path.is_empty() {
            return Err(PursuitCtrlError::AttemptEmptyPathLoad)
        }

        info!(
            "Following path of {} points ({:.2} m)",
            path.get_num_points(),
            path.get_length().unwrap_or(0.0)
        );

        self.path = Some(path);
        self.mode = PursuitCtrlMode::FollowPath;

        Ok(())
    }

    /// Abort the path currently being followed.
    ///
    /// The path is discarded and the module switches to `Off`. The caller is responsible for
    /// stopping the robot.
    pub fn abort_path(&mut self) {
        if let Some(path) = self.path.take() {
            warn!("Path aborted with {} points remaining", path.get_num_points());
        }

        self.mode = PursuitCtrlMode::Off;
    }

    /// Mode not executing.
    ///
    /// No actions are taken in this mode. To move from Off to FollowPath the user must call
    /// `begin_path`.
    fn mode_off(&mut self) -> Result<Option<ControlCommand>, PursuitCtrlError> {
        Ok(None)
    }

    /// Mode following path.
    ///
    /// Steers towards the carrot point. Once the carrot selection empties the path a stop
    /// command is issued and the module switches to `Off`.
    fn mode_follow_path(
        &mut self,
        pose: &Pose
    ) -> Result<Option<ControlCommand>, PursuitCtrlError> {

        // Validate path
        let path = match self.path {
            Some(ref mut p) => p,
            None => return Err(PursuitCtrlError::NoPath)
        };

        // ---- TARGET MANAGEMENT ----

        let num_points_before = path.get_num_points();
        let target: Option<Point2<f64>> = select_carrot(
            path,
            &pose.position2(),
            self.params.look_ahead_m
        );

        self.report.num_points_reached = num_points_before - path.get_num_points();
        self.report.num_points_remaining = path.get_num_points();

        // ---- COMMAND GENERATION ----

        match target {
            Some(t) => Ok(Some(get_pursuit_cmd(pose, &t, &self.params, &mut self.report))),
            None => {
                // Path complete, stop and clear the path
                info!("Final waypoint reached, path complete");

                self.report.heading_rad = crate::auto::geom::heading_angle(&pose.forward());
                self.path = None;
                self.mode = PursuitCtrlMode::Off;

                Ok(Some(ControlCommand::stop()))
            }
        }
    }
}

impl Default for PursuitCtrl {
    fn default() -> Self {
        Self::new(Params::default())
    }
}
