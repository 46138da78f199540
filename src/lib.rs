//! pid_path_tracking - PID path tracking for a kinematic bicycle model
//!
//! This crate simulates a steered vehicle following a reference path under
//! actuator noise and steering drift, closing the loop with a PID law on
//! the cross-track error.

// Core modules
pub mod common;

// Algorithm modules
pub mod vehicle;
pub mod path_tracking;
pub mod scenarios;

// Re-export common types for convenience
pub use common::{Point2D, Pose2D, Path2D, Trajectory};
pub use common::{PathTracker, MotionModel, Controller};
pub use common::{TrackingError, TrackingResult};
pub use vehicle::{Vehicle2D, MotionLimits};
pub use path_tracking::{PidGains, PidPathTracker, SimulationConfig, SimulationResult, run_simulation};
