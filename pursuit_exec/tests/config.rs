//! Checks that the shipped parameter files and example path load

use std::path::PathBuf;

use comms_if::net::NetParams;
use pursuit_lib::{
    auto::{path::Path, pursuit_ctrl::Params},
    params::PursuitExecParams
};

fn sw_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..")
}

#[test]
fn test_shipped_params() {
    let params_dir = sw_root().join("params");

    let net: NetParams = util::params::load_from_path(params_dir.join("net.toml")).unwrap();
    assert_eq!(net.sim_endpoint, "localhost:50000");
    assert!(net.request_timeout_ms > 0);

    let ctrl: Params = util::params::load_from_path(params_dir.join("pursuit_ctrl.toml")).unwrap();
    assert_eq!(ctrl, Params::default());

    let exec: PursuitExecParams =
        util::params::load_from_path(params_dir.join("pursuit_exec.toml")).unwrap();
    assert!(exec.cycle_period_s > 0.0);
}

#[test]
fn test_example_path() {
    let exec: PursuitExecParams =
        util::params::load_from_path(sw_root().join("params/pursuit_exec.toml")).unwrap();

    let path = Path::load(sw_root().join(&exec.path_file)).unwrap();

    assert_eq!(path.get_num_points(), 45);
    assert_eq!(path.front().map(|p| (p.x, p.y)), Some((0.0, 0.0)));
    assert!(path.get_length().unwrap() > 10.0);
}
