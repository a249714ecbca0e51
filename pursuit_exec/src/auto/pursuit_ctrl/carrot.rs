//! # Carrot point selection

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::trace;
use nalgebra::Point2;

use crate::auto::{geom::distance, path::Path};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Find the carrot point for the robot at `position`.
///
/// Waypoints at the front of the path which are closer than `look_ahead_m` to the robot have
/// been reached and are removed. The first waypoint at least `look_ahead_m` away is returned,
/// and stays in the path.
///
/// If every remaining waypoint is within range the path is left empty and `None` is returned,
/// meaning the path is complete. Several waypoints may be removed in one call if the robot has
/// jumped past them.
pub fn select_carrot(
    path: &mut Path,
    position: &Point2<f64>,
    look_ahead_m: f64
) -> Option<Point2<f64>> {

    while let Some(next) = path.front().copied() {
        let dist_m = distance(next.x - position.x, next.y - position.y);

        if dist_m < look_ahead_m {
            trace!("Waypoint ({:.3}, {:.3}) reached at {:.3} m", next.x, next.y, dist_m);
            path.pop_front();
        }
        else {
            return Some(next)
        }
    }

    None
}
