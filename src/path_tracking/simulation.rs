//! Closed-loop simulation: PID tracker driving a motion model
//!
//! Each tick measures the cross-track error, updates the controller,
//! moves the vehicle at constant speed and records the new position.
//! There is no goal check; a run always lasts `ticks` steps.

use tracing::{debug, info, trace};

use crate::common::error::ensure_finite;
use crate::common::{MotionModel, Path2D, TrackingError, TrackingResult, Trajectory};
use crate::path_tracking::pid::PidGains;
use crate::path_tracking::pid_tracker::PidPathTracker;
use crate::vehicle::MotionLimits;

/// Configuration for a tracking run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// PID gains
    pub gains: PidGains,
    /// Number of ticks to simulate
    pub ticks: usize,
    /// Distance driven per tick [m]; negative values saturate to 0
    pub speed: f64,
    /// Steering saturation and straight-line tolerance
    pub limits: MotionLimits,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gains: PidGains::default(),
            ticks: 1000,
            speed: 1.0,
            limits: MotionLimits::default(),
        }
    }
}

impl SimulationConfig {
    /// Create with explicit gains, tick count and speed
    pub fn with_params(gains: PidGains, ticks: usize, speed: f64) -> Self {
        Self {
            gains,
            ticks,
            speed,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> TrackingResult<()> {
        self.gains.validate()?;
        ensure_finite("speed", self.speed)?;
        self.limits.validate()
    }
}

/// Output of a run, one entry per tick in every vector
#[derive(Debug, Clone, Default)]
pub struct SimulationResult {
    pub trajectory: Trajectory,
    /// Cross-track error measured at the start of each tick
    pub cross_track_errors: Vec<f64>,
    /// Steering command issued each tick, before saturation
    pub steering_commands: Vec<f64>,
}

impl SimulationResult {
    fn with_capacity(ticks: usize) -> Self {
        Self {
            trajectory: Trajectory::with_capacity(ticks),
            cross_track_errors: Vec::with_capacity(ticks),
            steering_commands: Vec::with_capacity(ticks),
        }
    }

    pub fn len(&self) -> usize {
        self.trajectory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectory.is_empty()
    }

    pub fn mean_abs_error(&self) -> f64 {
        if self.cross_track_errors.is_empty() {
            return 0.0;
        }
        self.cross_track_errors.iter().map(|e| e.abs()).sum::<f64>()
            / self.cross_track_errors.len() as f64
    }

    pub fn max_abs_error(&self) -> f64 {
        self.cross_track_errors
            .iter()
            .fold(0.0, |acc: f64, e| acc.max(e.abs()))
    }
}

/// Run the PID tracker against `path` for `config.ticks` ticks.
///
/// The vehicle is advanced in place; its final pose is the last trajectory point.
pub fn run_simulation<M: MotionModel>(
    vehicle: &mut M,
    path: &Path2D,
    config: &SimulationConfig,
) -> TrackingResult<SimulationResult> {
    config.validate()?;
    if path.is_empty() {
        return Err(TrackingError::EmptyPath);
    }

    let mut tracker = PidPathTracker::new(config.gains);
    debug!(
        kp = config.gains.kp,
        kd = config.gains.kd,
        ki = config.gains.ki,
        ticks = config.ticks,
        speed = config.speed,
        waypoints = path.len(),
        "starting PID tracking run"
    );

    let mut result = SimulationResult::with_capacity(config.ticks);
    for tick in 0..config.ticks {
        let pose = vehicle.pose();
        let error = tracker.cross_track_error(&pose, path)?;
        let steer = tracker.steer_from_error(error);
        vehicle.advance(steer, config.speed, &config.limits);

        let moved = vehicle.pose();
        trace!(tick, error, steer, x = moved.x, y = moved.y, "tick");
        result.cross_track_errors.push(error);
        result.steering_commands.push(steer);
        result.trajectory.record(moved.position());
    }

    info!(
        ticks = result.len(),
        mean_abs_error = result.mean_abs_error(),
        max_abs_error = result.max_abs_error(),
        "PID tracking run finished"
    );
    Ok(result)
}
