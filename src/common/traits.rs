//! Common traits defining interfaces for the tracking loop

use crate::common::error::TrackingResult;
use crate::common::types::*;
use crate::vehicle::MotionLimits;

/// Trait for path tracking/following algorithms
pub trait PathTracker {
    /// Compute the steering command that brings `pose` back onto `path`
    fn compute_steering(&mut self, pose: &Pose2D, path: &Path2D) -> TrackingResult<f64>;

    /// Forget any accumulated state before a new run
    fn reset(&mut self);
}

/// Trait for vehicle/robot motion models
pub trait MotionModel {
    /// Current pose
    fn pose(&self) -> Pose2D;

    /// Drive `distance` with front wheel angle `steering`, saturating both to `limits`
    fn advance(&mut self, steering: f64, distance: f64, limits: &MotionLimits);
}

/// Trait for controllers (PID, ...)
pub trait Controller {
    /// State type
    type State;
    /// Reference/target type
    type Reference;
    /// Output control type
    type Output;

    /// Compute control output
    fn compute(&mut self, state: &Self::State, reference: &Self::Reference) -> Self::Output;

    /// Reset controller state
    fn reset(&mut self);
}
