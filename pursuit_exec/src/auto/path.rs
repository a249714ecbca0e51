//! # Path
//!
//! This module defines the path followed by the robot. A path is the sequence of waypoints the
//! robot passed through while it was being recorded. Waypoints are consumed from the front as
//! the robot reaches them, so the front of the path is always the next waypoint to pass.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use nalgebra::Point2;

use comms_if::eqpt::sim::PathRecord;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A path defining the desired trajectory of the robot.
///
/// Points can only be removed, never added or reordered, once the path has been built.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    points_m: VecDeque<Point2<f64>>,
}

// -----------------------------------------------------------------------------------------------
// ENUMS
// -----------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("Cannot load the path file: {0}")]
    FileLoadError(std::io::Error),

    #[error("Cannot read the path file: {0}")]
    DeserialiseError(serde_json::Error),

    #[error("Attempted to create a path from an empty sequence")]
    EmptySequence,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Path {
    /// Create a new path from points given in the order they should be visited.
    pub fn new<I>(points_m: I) -> Self
    where
        I: IntoIterator<Item = Point2<f64>>
    {
        Self {
            points_m: points_m.into_iter().collect(),
        }
    }

    /// Load a recorded path file.
    ///
    /// The file is a JSON array of [`PathRecord`]s, in the order they were recorded.
    pub fn load<P: AsRef<std::path::Path>>(file_path: P) -> Result<Self, PathError> {
        let path_str = std::fs::read_to_string(file_path)
            .map_err(PathError::FileLoadError)?;

        let records: Vec<PathRecord> = serde_json::from_str(&path_str)
            .map_err(PathError::DeserialiseError)?;

        Self::from_records(&records)
    }

    /// Build a path from recorded records, keeping the recorded order.
    pub fn from_records(records: &[PathRecord]) -> Result<Self, PathError> {
        if records.is_empty() {
            return Err(PathError::EmptySequence)
        }

        Ok(Self::new(
            records.iter().map(|r| Point2::new(r.pose.position.x, r.pose.position.y))
        ))
    }

    /// Number of points remaining in the path.
    pub fn get_num_points(&self) -> usize {
        self.points_m.len()
    }

    /// Returns `true` if there are no points remaining.
    pub fn is_empty(&self) -> bool {
        self.points_m.is_empty()
    }

    /// The next point to be reached, if any.
    pub fn front(&self) -> Option<&Point2<f64>> {
        self.points_m.front()
    }

    /// Remove and return the next point to be reached.
    pub fn pop_front(&mut self) -> Option<Point2<f64>> {
        self.points_m.pop_front()
    }

    /// Iterate over the remaining points in the order they will be reached.
    pub fn iter(&self) -> impl Iterator<Item = &Point2<f64>> {
        self.points_m.iter()
    }

    /// Return the length of the path in meters, summing the distance between consecutive
    /// points.
    ///
    /// If the path has fewer than two points then `None` is returned.
    pub fn get_length(&self) -> Option<f64> {
        if self.points_m.len() < 2 {
            return None;
        }

        Some(
            self.points_m.iter()
                .zip(self.points_m.iter().skip(1))
                .map(|(a, b)| nalgebra::distance(a, b))
                .sum()
        )
    }
}
