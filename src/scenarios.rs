//! Reference scenario: a drifting vehicle on a track with a raised middle section
//!
//! The track is one waypoint per metre along x: y = 0 for x in [0, 300),
//! y = 2 for [300, 600) and y = 0 again for [600, 1000). The vehicle starts
//! one metre above the track with a 10 degree steering drift.

use std::ops::Range;

use rand::Rng;

use crate::common::{Path2D, Point2D, TrackingResult};
use crate::vehicle::{Vehicle2D, DEFAULT_LENGTH};

/// Number of waypoints (and ticks) in the step scenario
pub const STEP_TRACK_LENGTH: usize = 1000;

/// Steering drift of the reference vehicle [deg]
pub const STEP_DRIFT_DEG: f64 = 10.0;

/// Build a track from consecutive flat segments, one waypoint per integer x
pub fn segmented_track(segments: &[(Range<i64>, f64)]) -> Path2D {
    let points = segments
        .iter()
        .flat_map(|(xs, y)| xs.clone().map(move |x| Point2D::new(x as f64, *y)))
        .collect();
    Path2D::from_points(points)
}

/// y = 0, then y = 2 between x = 300 and 600, then back to 0
pub fn step_track() -> Path2D {
    segmented_track(&[(0..300, 0.0), (300..600, 2.0), (600..STEP_TRACK_LENGTH as i64, 0.0)])
}

/// Place `vehicle` at (0, 1) heading along +x with the reference drift
pub fn configure_drifting<R: Rng>(vehicle: &mut Vehicle2D<R>) {
    vehicle.set(0.0, 1.0, 0.0);
    vehicle.set_steering_drift(STEP_DRIFT_DEG.to_radians());
}

/// Noise-free reference vehicle seeded with `seed`
pub fn drifting_vehicle(seed: u64) -> TrackingResult<Vehicle2D> {
    let mut vehicle = Vehicle2D::seeded(DEFAULT_LENGTH, seed)?;
    configure_drifting(&mut vehicle);
    Ok(vehicle)
}
