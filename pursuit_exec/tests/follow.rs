//! Control loop tests against an in-process kinematic robot

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{cell::RefCell, rc::Rc, thread, time::Duration};

use nalgebra::Point2;

use comms_if::net::NetError;
use pursuit_lib::{
    auto::{
        loc::Pose,
        path::Path,
        pursuit_ctrl::{
            ControlCommand, Params, ParamsError, PursuitCtrl, PursuitCtrlError, PursuitCtrlMode
        }
    },
    exec::{self, DemandSink, ExecError, PoseSource}
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Integration step of the robot model, one step per demand received.
const STEP_S: f64 = 0.1;

/// Number of demands after which the robot refuses any more, so a diverging run can't hang.
const MAX_DEMS: usize = 20_000;

// ------------------------------------------------------------------------------------------------
// ROBOT MODEL
// ------------------------------------------------------------------------------------------------

/// Differential drive robot integrating each demand for one step.
struct Robot {
    x_m: f64,
    y_m: f64,
    yaw_rad: f64,

    /// Every demand the robot has been sent, including ones it refused
    dems: Vec<ControlCommand>,

    num_pose_reads: usize,

    /// Refuse the pose read with this (1-based) index
    fail_pose_read: Option<usize>,

    /// Refuse the demand with this (1-based) index
    fail_dems: Option<usize>
}

struct PoseHandle(Rc<RefCell<Robot>>);

struct DemsHandle(Rc<RefCell<Robot>>);

impl Robot {
    fn new(x_m: f64, y_m: f64, yaw_rad: f64) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            x_m,
            y_m,
            yaw_rad,
            dems: Vec::new(),
            num_pose_reads: 0,
            fail_pose_read: None,
            fail_dems: None
        }))
    }

    fn dist_to(&self, x_m: f64, y_m: f64) -> f64 {
        ((self.x_m - x_m).powi(2) + (self.y_m - y_m).powi(2)).sqrt()
    }
}

impl PoseSource for PoseHandle {
    fn get_pose(&mut self) -> Result<Pose, NetError> {
        let mut robot = self.0.borrow_mut();
        robot.num_pose_reads += 1;

        if robot.fail_pose_read == Some(robot.num_pose_reads) {
            return Err(NetError::UnexpectedResponse(503))
        }

        Ok(Pose::from_xy_yaw(robot.x_m, robot.y_m, robot.yaw_rad))
    }
}

impl DemandSink for DemsHandle {
    fn send_dems(&mut self, cmd: &ControlCommand) -> Result<(), NetError> {
        let mut robot = self.0.borrow_mut();
        robot.dems.push(*cmd);

        let num_dems = robot.dems.len();
        if robot.fail_dems == Some(num_dems) || num_dems > MAX_DEMS {
            return Err(NetError::UnexpectedResponse(500))
        }

        robot.yaw_rad += cmd.angular_speed_rads * STEP_S;
        robot.x_m += cmd.linear_speed_ms * robot.yaw_rad.cos() * STEP_S;
        robot.y_m += cmd.linear_speed_ms * robot.yaw_rad.sin() * STEP_S;

        Ok(())
    }
}

// ------------------------------------------------------------------------------------------------
// HELPERS
// ------------------------------------------------------------------------------------------------

fn following(points: Vec<Point2<f64>>) -> PursuitCtrl {
    let mut ctrl = PursuitCtrl::new(Params {
        cruise_speed_ms: 0.7,
        angular_gain: 1.3,
        look_ahead_m: 1.0,
        max_ang_speed_rads: None
    });

    ctrl.begin_path(Path::new(points)).unwrap();

    ctrl
}

fn run(
    ctrl: &mut PursuitCtrl,
    robot: &Rc<RefCell<Robot>>
) -> Result<exec::RunSummary, ExecError> {
    exec::run(
        ctrl,
        &mut PoseHandle(robot.clone()),
        &mut DemsHandle(robot.clone()),
        Duration::from_secs(0)
    )
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[test]
fn test_straight_line() {
    let robot = Robot::new(0.0, 0.0, 0.0);
    let mut ctrl = following(vec![Point2::new(10.0, 0.0)]);

    let summary = run(&mut ctrl, &robot).unwrap();
    let robot = robot.borrow();

    assert_eq!(summary.num_points, 1);
    assert_eq!(summary.num_cycles as usize + 1, robot.dems.len());

    assert_eq!(
        robot.dems[0],
        ControlCommand { angular_speed_rads: 0.0, linear_speed_ms: 0.7 }
    );

    // Forward only while the heading tracks the bearing
    assert!(robot.dems.iter().all(|c| c.angular_speed_rads.abs() < 1e-12));

    // Completion stop from the controller then the final stop
    let n = robot.dems.len();
    assert!(robot.dems[n - 1].is_stop());
    assert!(robot.dems[n - 2].is_stop());
    assert!(robot.dems[..n - 2].iter().all(|c| !c.is_stop()));

    // Stopped just inside the look-ahead distance
    let d = robot.dist_to(10.0, 0.0);
    assert!(d < 1.0 && d > 0.9, "final distance {}", d);
    assert!(robot.y_m.abs() < 1e-9);

    assert_eq!(ctrl.mode(), PursuitCtrlMode::Off);
}

#[test]
fn test_corner() {
    let mut points: Vec<Point2<f64>> = (0..=10)
        .map(|i| Point2::new(i as f64 * 0.5, 0.0))
        .collect();
    points.extend((1..=10).map(|i| Point2::new(5.0, i as f64 * 0.5)));

    let robot = Robot::new(0.0, 0.0, 0.0);
    let mut ctrl = following(points);

    let summary = run(&mut ctrl, &robot).unwrap();
    let robot = robot.borrow();

    assert_eq!(summary.num_points, 21);
    assert!(robot.dist_to(5.0, 5.0) < 1.0);
    assert!(robot.dems.last().unwrap().is_stop());
    assert!(!ctrl.is_following());

    // The robot turned left through the corner
    assert!(robot.dems.iter().any(|c| c.angular_speed_rads > 0.5));
}

#[test]
fn test_start_facing_away() {
    let robot = Robot::new(0.0, 0.0, std::f64::consts::PI);
    let mut ctrl = following(vec![Point2::new(4.0, 0.0), Point2::new(6.0, 0.0)]);

    run(&mut ctrl, &robot).unwrap();
    let robot = robot.borrow();

    assert!(robot.dist_to(6.0, 0.0) < 1.0);

    // Turning on the spot isn't possible so the first command still drives forward
    assert_eq!(robot.dems[0].linear_speed_ms, 0.7);
    assert!(robot.dems[0].angular_speed_rads.abs() > 4.0);
}

#[test]
fn test_dems_fault_stops_robot() {
    let robot = Robot::new(0.0, 0.0, 0.0);
    robot.borrow_mut().fail_dems = Some(5);
    let mut ctrl = following(vec![Point2::new(10.0, 0.0)]);

    let result = run(&mut ctrl, &robot);

    assert!(matches!(result, Err(ExecError::DemsError(NetError::UnexpectedResponse(500)))));

    // The failed demand then exactly one stop attempt
    let robot = robot.borrow();
    assert_eq!(robot.dems.len(), 6);
    assert!(robot.dems[5].is_stop());
    assert!(!robot.dems[4].is_stop());

    assert!(!ctrl.is_following());
    assert_eq!(ctrl.num_points_remaining(), 0);
}

#[test]
fn test_pose_fault_stops_robot() {
    let robot = Robot::new(0.0, 0.0, 0.0);
    robot.borrow_mut().fail_pose_read = Some(3);
    let mut ctrl = following(vec![Point2::new(10.0, 0.0)]);

    let result = run(&mut ctrl, &robot);

    assert!(matches!(result, Err(ExecError::PoseError(NetError::UnexpectedResponse(503)))));

    let robot = robot.borrow();
    assert_eq!(robot.num_pose_reads, 3);
    assert_eq!(robot.dems.len(), 3);
    assert!(!robot.dems[1].is_stop());
    assert!(robot.dems[2].is_stop());

    assert!(!ctrl.is_following());
}

#[test]
fn test_final_stop_fault() {
    // The only point is reached on the first cycle
    let robot = Robot::new(0.0, 0.0, 0.0);
    robot.borrow_mut().fail_dems = Some(2);
    let mut ctrl = following(vec![Point2::new(0.0, 0.0)]);

    let result = run(&mut ctrl, &robot);

    assert!(matches!(result, Err(ExecError::DemsError(_))));

    // Completion stop then the failed final stop, which isn't attempted a second time
    let robot = robot.borrow();
    assert_eq!(robot.dems.len(), 2);
    assert!(robot.dems.iter().all(|c| c.is_stop()));
}

#[test]
fn test_not_following() {
    let robot = Robot::new(0.0, 0.0, 0.0);
    let mut ctrl = PursuitCtrl::default();

    let result = run(&mut ctrl, &robot);

    assert!(matches!(result, Err(ExecError::NotFollowing)));
    assert_eq!(robot.borrow().num_pose_reads, 0);
    assert!(robot.borrow().dems.is_empty());
}

#[test]
fn test_elapsed_excludes_final_stop() {
    /// Sink which takes a long time to deliver its second demand
    struct SlowFinalStop(usize);

    impl DemandSink for SlowFinalStop {
        fn send_dems(&mut self, _cmd: &ControlCommand) -> Result<(), NetError> {
            self.0 += 1;
            if self.0 == 2 {
                thread::sleep(Duration::from_millis(300));
            }
            Ok(())
        }
    }

    // The only point is reached on the first cycle, the second demand is the final stop
    let robot = Robot::new(0.0, 0.0, 0.0);
    let mut ctrl = following(vec![Point2::new(0.0, 0.0)]);
    let mut sink = SlowFinalStop(0);

    let summary = exec::run(
        &mut ctrl,
        &mut PoseHandle(robot.clone()),
        &mut sink,
        Duration::from_secs(0)
    ).unwrap();

    assert_eq!(sink.0, 2);
    assert_eq!(summary.num_cycles, 1);
    assert!(summary.elapsed_s < 0.2, "elapsed {} s", summary.elapsed_s);
}

#[test]
fn test_zero_look_ahead_refused() {
    // Sitting on the only waypoint, which could never be reached with no look-ahead distance
    let robot = Robot::new(10.0, 0.0, 0.0);
    let mut ctrl = PursuitCtrl::new(Params {
        look_ahead_m: 0.0,
        ..Params::default()
    });

    assert!(matches!(
        ctrl.begin_path(Path::new(vec![Point2::new(10.0, 0.0)])),
        Err(PursuitCtrlError::ParamsInvalid(ParamsError::InvalidLookAhead(_)))
    ));

    assert!(matches!(run(&mut ctrl, &robot), Err(ExecError::NotFollowing)));
    assert_eq!(robot.borrow().num_pose_reads, 0);
    assert!(robot.borrow().dems.is_empty());
}
