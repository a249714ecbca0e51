//! # Control loop execution
//!
//! Runs pursuit control to completion. Each cycle:
//!
//! - Read the robot pose from the pose source
//! - Process PursuitCtrl to get the speed command
//! - Send the command to the demand sink
//! - Sleep for the rest of the cycle period (only while steering to a target)
//!
//! The loop ends when PursuitCtrl has reached the end of its path, at which point one final stop
//! command is sent. Any fault from the pose source or the demand sink ends the loop immediately.
//! A stop command is still attempted on the way out so the robot is never left driving.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{
    ops::{Deref, DerefMut},
    thread,
    time::{Duration, Instant}
};
use log::{error, info, warn};
use serde::Serialize;

use crate::auto::{
    loc::Pose,
    pursuit_ctrl::{ControlCommand, InputData, PursuitCtrl, PursuitCtrlError}
};
use comms_if::net::NetError;
use util::module::State;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Provides the current pose of the robot.
pub trait PoseSource {
    fn get_pose(&mut self) -> Result<Pose, NetError>;
}

/// Delivers speed commands to the robot.
pub trait DemandSink {
    fn send_dems(&mut self, cmd: &ControlCommand) -> Result<(), NetError>;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Summary of a completed run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunSummary {
    /// Wall clock time from the start of the first cycle to the end of the last one. The final
    /// stop command is sent after this is measured and isn't included.
    pub elapsed_s: f64,

    /// Number of control cycles executed
    pub num_cycles: u64,

    /// Number of cycles which took longer than the cycle period
    pub num_overruns: u64,

    /// Number of waypoints in the path at the start of the run
    pub num_points: usize
}

/// Sends a stop command to the wrapped sink when dropped, unless disarmed.
struct StopGuard<'a, D: DemandSink> {
    sink: &'a mut D,

    armed: bool
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("PursuitCtrl is not following a path")]
    NotFollowing,

    #[error("Could not get the robot pose: {0}")]
    PoseError(NetError),

    #[error("Could not send demands to the robot: {0}")]
    DemsError(NetError),

    #[error("Error during PursuitCtrl processing: {0}")]
    CtrlError(PursuitCtrlError)
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<'a, D: DemandSink> StopGuard<'a, D> {
    fn new(sink: &'a mut D) -> Self {
        Self {
            sink,
            armed: true
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl<'a, D: DemandSink> Deref for StopGuard<'a, D> {
    type Target = D;

    fn deref(&self) -> &Self::Target {
        &*self.sink
    }
}

impl<'a, D: DemandSink> DerefMut for StopGuard<'a, D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.sink
    }
}

impl<'a, D: DemandSink> Drop for StopGuard<'a, D> {
    fn drop(&mut self) {
        if !self.armed {
            return
        }

        warn!("Control loop exited abnormally, stopping the robot");

        if let Err(e) = self.sink.send_dems(&ControlCommand::stop()) {
            error!("Could not stop the robot: {}", e);
        }
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Run pursuit control until the path has been completed.
///
/// `pursuit_ctrl` must already be following a path. On a fault the path is aborted, a stop
/// command is attempted, and the fault is returned.
pub fn run<P, D>(
    pursuit_ctrl: &mut PursuitCtrl,
    pose_source: &mut P,
    dems_sink: &mut D,
    cycle_period: Duration
) -> Result<RunSummary, ExecError>
where
    P: PoseSource,
    D: DemandSink
{
    if !pursuit_ctrl.is_following() {
        return Err(ExecError::NotFollowing)
    }

    let num_points = pursuit_ctrl.num_points_remaining();
    let start_instant = Instant::now();

    let mut sink = StopGuard::new(dems_sink);

    let (num_cycles, num_overruns) = match run_cycles(
        pursuit_ctrl, pose_source, &mut *sink, cycle_period
    ) {
        Ok(counts) => counts,
        Err(e) => {
            error!("Control loop fault: {}", e);
            pursuit_ctrl.abort_path();
            return Err(e)
        }
    };

    let elapsed_s = start_instant.elapsed().as_secs_f64();

    // Final stop. This is the one stop attempt on this exit path so the guard isn't needed.
    sink.disarm();
    sink.send_dems(&ControlCommand::stop())
        .map_err(ExecError::DemsError)?;

    info!(
        "Path complete: {} points in {} cycles, {:.3} s",
        num_points, num_cycles, elapsed_s
    );

    Ok(RunSummary {
        elapsed_s,
        num_cycles,
        num_overruns,
        num_points
    })
}

/// Execute cycles while PursuitCtrl is following a path, returning the number of cycles and
/// overruns.
fn run_cycles<P, D>(
    pursuit_ctrl: &mut PursuitCtrl,
    pose_source: &mut P,
    dems_sink: &mut D,
    cycle_period: Duration
) -> Result<(u64, u64), ExecError>
where
    P: PoseSource,
    D: DemandSink
{
    let mut num_cycles = 0u64;
    let mut num_overruns = 0u64;

    while pursuit_ctrl.is_following() {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // ---- DATA INPUT ----

        let pose = pose_source.get_pose()
            .map_err(ExecError::PoseError)?;

        // ---- CONTROL ALGORITHM PROCESSING ----

        let (cmd, report) = pursuit_ctrl.proc(&InputData { pose })
            .map_err(ExecError::CtrlError)?;

        // ---- DEMANDS ----

        if let Some(cmd) = cmd {
            dems_sink.send_dems(&cmd)
                .map_err(ExecError::DemsError)?;
        }

        num_cycles += 1;

        // ---- CYCLE MANAGEMENT ----

        // Only wait while there's a target, on completion go straight to the final stop
        if report.target_x_m.is_none() {
            continue
        }

        let cycle_dur = cycle_start_instant.elapsed();

        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => thread::sleep(d),
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
                );
                num_overruns += 1;
            }
        }
    }

    Ok((num_cycles, num_overruns))
}
