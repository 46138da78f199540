//! PID path tracker
//!
//! Steers a vehicle back onto a reference path using a PID law on the
//! lateral cross-track error.

use crate::common::{Controller, Path2D, PathTracker, Pose2D, TrackingError, TrackingResult};
use crate::path_tracking::cross_track::compute_error;
use crate::path_tracking::pid::{PidController, PidGains, PidState};

/// PID steering controller against a fixed waypoint path
#[derive(Debug, Clone)]
pub struct PidPathTracker {
    controller: PidController,
}

impl PidPathTracker {
    pub fn new(gains: PidGains) -> Self {
        PidPathTracker {
            controller: PidController::new(gains),
        }
    }

    pub fn gains(&self) -> &PidGains {
        self.controller.gains()
    }

    pub fn state(&self) -> &PidState {
        self.controller.state()
    }

    /// Cross-track error of `pose` against `path`
    pub fn cross_track_error(&self, pose: &Pose2D, path: &Path2D) -> TrackingResult<f64> {
        compute_error(&pose.position(), path).ok_or(TrackingError::EmptyPath)
    }

    /// One control tick from an already measured error
    pub fn steer_from_error(&mut self, error: f64) -> f64 {
        self.controller.update(error)
    }
}

impl PathTracker for PidPathTracker {
    fn compute_steering(&mut self, pose: &Pose2D, path: &Path2D) -> TrackingResult<f64> {
        let error = self.cross_track_error(pose, path)?;
        Ok(self.steer_from_error(error))
    }

    fn reset(&mut self) {
        self.controller.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat_path() -> Path2D {
        let xs: Vec<f64> = (0..10).map(|i| i as f64).collect();
        Path2D::from_xy(&xs, &vec![0.0; xs.len()])
    }

    #[test]
    fn test_empty_path_is_rejected() {
        let mut tracker = PidPathTracker::new(PidGains::default());
        let result = tracker.compute_steering(&Pose2D::origin(), &Path2D::new());
        assert!(matches!(result, Err(TrackingError::EmptyPath)));
    }

    #[test]
    fn test_first_tick_has_no_derivative_kick() {
        let mut tracker = PidPathTracker::new(PidGains::new(0.1, 3.0, 0.0));
        let pose = Pose2D::new(0.0, 1.0, 0.0);
        let steer = tracker.compute_steering(&pose, &flat_path()).unwrap();
        assert_relative_eq!(steer, -0.1, epsilon = 1e-12);
        assert_eq!(tracker.state().cumulative_error, 1.0);
    }

    #[test]
    fn test_matches_controller_trait_on_first_tick() {
        let pose = Pose2D::new(0.0, 1.0, 0.0);
        let mut tracker = PidPathTracker::new(PidGains::default());
        let mut pid = PidController::new(PidGains::default());
        for _ in 0..3 {
            let steer = tracker.compute_steering(&pose, &flat_path()).unwrap();
            assert_relative_eq!(steer, pid.compute(&1.0, &0.0), epsilon = 1e-12);
        }
        assert_eq!(tracker.state(), pid.state());
    }

    #[test]
    fn test_vehicle_above_path_steers_down() {
        let mut tracker = PidPathTracker::new(PidGains::default());
        let steer = tracker
            .compute_steering(&Pose2D::new(3.0, 2.0, 0.0), &flat_path())
            .unwrap();
        assert!(steer < 0.0);

        tracker.reset();
        let steer = tracker
            .compute_steering(&Pose2D::new(3.0, -2.0, 0.0), &flat_path())
            .unwrap();
        assert!(steer > 0.0);
    }

    #[test]
    fn test_reset_clears_accumulated_error() {
        let mut tracker = PidPathTracker::new(PidGains::default());
        let pose = Pose2D::new(1.0, 0.5, 0.0);
        for _ in 0..5 {
            tracker.compute_steering(&pose, &flat_path()).unwrap();
        }
        assert_relative_eq!(tracker.state().cumulative_error, 2.5);
        tracker.reset();
        assert_eq!(*tracker.state(), PidState::default());
    }
}
