//! Nearest waypoint search and lateral cross-track error
//!
//! The error is the y difference between the vehicle and its nearest
//! waypoint, not the perpendicular distance to the path. It is only a
//! faithful cross-track error for paths running mostly along the x axis.

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::common::{Path2D, Point2D};

/// Index of the waypoint closest to `position`.
///
/// Linear scan; on equal distances the lowest index wins. `None` for an empty path.
pub fn closest_point_index(position: &Point2D, path: &Path2D) -> Option<usize> {
    path.points
        .iter()
        .position_min_by_key(|p| OrderedFloat(position.distance(p)))
}

/// Signed lateral error `position.y - closest.y`.
///
/// Positive when the vehicle is above its nearest waypoint.
pub fn compute_error(position: &Point2D, path: &Path2D) -> Option<f64> {
    closest_point_index(position, path).map(|i| position.y - path.points[i].y)
}
