//! Main path follower executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session, logging and parameters
//!     - Load the recorded path and hand it to PursuitCtrl
//!     - Main loop (see `pursuit_lib::exec`):
//!         - Pose acquisition from the simulation server
//!         - Pursuit control processing
//!         - Speed demands to the simulation server
//!     - Stop the robot and report the runtime
//!
//! # Modules
//!
//! All cyclic modules (e.g. `pursuit_ctrl`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.
//!

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{error, info};
use std::time::Duration;
use color_eyre::{Report, eyre::{WrapErr, eyre}};

// Internal
use comms_if::net::NetParams;
use pursuit_lib::{
    auto::{path::Path, pursuit_ctrl::PursuitCtrl},
    exec,
    params::PursuitExecParams,
    sim_client::SimClient
};
use util::{
    host,
    module::State,
    logger::{level_from_env, logger_init, LevelFilter},
    session::Session
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    // ---- EARLY INITIALISATION ----

    color_eyre::install()?;

    // Initialise session
    let session = Session::new(
        "pursuit_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(level_from_env(LevelFilter::Debug), &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Pure Pursuit Path Follower\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let net_params: NetParams = util::params::load(
        "net.toml"
    ).wrap_err("Could not load net params")?;

    let exec_params: PursuitExecParams = util::params::load(
        "pursuit_exec.toml"
    ).wrap_err("Could not load exec params")?;

    if !(exec_params.cycle_period_s.is_finite() && exec_params.cycle_period_s >= 0.0) {
        return Err(eyre!(
            "Expected a non-negative cycle period, found {}", exec_params.cycle_period_s
        ));
    }

    info!("Exec parameters loaded");

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut pursuit_ctrl = PursuitCtrl::default();
    pursuit_ctrl.init("pursuit_ctrl.toml", &session)
        .wrap_err("Failed to initialise PursuitCtrl")?;
    info!("PursuitCtrl init complete: {:?}", pursuit_ctrl.params());

    info!("Module initialisation complete\n");

    // ---- LOAD PATH ----

    let path_file = host::get_sw_root()
        .wrap_err("Could not find the software root")?
        .join(&exec_params.path_file);

    info!("Loading path from {:?}", path_file);

    let path = Path::load(&path_file)
        .wrap_err_with(|| format!("Could not load the path from {:?}", path_file))?;

    match path.get_length() {
        Some(l) => info!("Path contains {} points, {:.3} m long", path.get_num_points(), l),
        None => info!("Path contains a single point")
    }

    pursuit_ctrl.begin_path(path)
        .wrap_err("Could not begin following the path")?;

    // ---- INITIALISE NETWORK ----

    let mut sim_pose = SimClient::new(&net_params);
    let mut sim_dems = sim_pose.clone();

    info!("SimClient initialised on {}\n", sim_pose.localisation_url());

    // ---- MAIN LOOP ----

    info!("Beginning main loop\n");

    let summary = match exec::run(
        &mut pursuit_ctrl,
        &mut sim_pose,
        &mut sim_dems,
        Duration::from_secs_f64(exec_params.cycle_period_s)
    ) {
        Ok(s) => s,
        Err(e) => {
            println!("Error");
            error!("Path following failed: {}", e);
            return Err(e).wrap_err("Path following failed")
        }
    };

    println!("Runtime was: {:.3} s", summary.elapsed_s);

    if let Err(e) = session.save_json("run_summary.json", &summary) {
        error!("Could not save the run summary: {}", e);
    }

    info!("End of execution");

    Ok(())
}
