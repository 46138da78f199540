//! Kinematic bicycle model with actuator noise and steering drift
//!
//! The vehicle is a single-track approximation: one steered front wheel and
//! one rear wheel separated by the wheelbase `length`. Every move samples
//! the commanded steering angle and distance from Gaussians centred on the
//! command, adds a constant steering drift, then follows the exact circular
//! arc (or a straight line when the turn is negligible).

use std::f64::consts::FRAC_PI_4;
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::common::error::{ensure_non_negative, ensure_positive};
use crate::common::{normalize_orientation, MotionModel, Pose2D, TrackingError, TrackingResult};

/// Default wheelbase [m]
pub const DEFAULT_LENGTH: f64 = 10.0;

/// Saturation and straight-line threshold applied on every move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionLimits {
    /// Below this absolute turn angle [rad] the motion is treated as straight
    pub tolerance: f64,
    /// Commanded steering is clamped to +/- this angle [rad]
    pub max_steering_angle: f64,
}

impl Default for MotionLimits {
    fn default() -> Self {
        Self {
            tolerance: 0.001,
            max_steering_angle: FRAC_PI_4,
        }
    }
}

impl MotionLimits {
    pub fn new(tolerance: f64, max_steering_angle: f64) -> TrackingResult<Self> {
        let limits = Self { tolerance, max_steering_angle };
        limits.validate()?;
        Ok(limits)
    }

    pub fn validate(&self) -> TrackingResult<()> {
        ensure_positive("tolerance", self.tolerance)?;
        ensure_positive("max_steering_angle", self.max_steering_angle)
    }
}

/// 2D vehicle driven by the bicycle model
///
/// The random source is owned by the vehicle so that a seeded generator
/// makes a whole run reproducible.
pub struct Vehicle2D<R: Rng = ChaCha8Rng> {
    pose: Pose2D,
    length: f64,
    steering_noise: f64,
    distance_noise: f64,
    steering_drift: f64,
    steering_dist: Normal<f64>,
    distance_dist: Normal<f64>,
    rng: R,
}

/// Zero-mean Gaussian with the given standard deviation
fn zero_mean_noise(name: &str, std_dev: f64) -> TrackingResult<Normal<f64>> {
    ensure_non_negative(name, std_dev)?;
    Normal::new(0.0, std_dev)
        .map_err(|e| TrackingError::InvalidParameter(format!("{}: {}", name, e)))
}

impl Vehicle2D<ChaCha8Rng> {
    /// Create a vehicle whose noise is drawn from a ChaCha8 stream seeded with `seed`
    pub fn seeded(length: f64, seed: u64) -> TrackingResult<Self> {
        Self::new(length, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Vehicle2D<R> {
    /// Create a vehicle at the origin facing +x, without noise or drift
    pub fn new(length: f64, rng: R) -> TrackingResult<Self> {
        ensure_positive("length", length)?;
        Ok(Vehicle2D {
            pose: Pose2D::origin(),
            length,
            steering_noise: 0.0,
            distance_noise: 0.0,
            steering_drift: 0.0,
            steering_dist: zero_mean_noise("steering_noise", 0.0)?,
            distance_dist: zero_mean_noise("distance_noise", 0.0)?,
            rng,
        })
    }

    /// Create with the default wheelbase
    pub fn with_rng(rng: R) -> TrackingResult<Self> {
        Self::new(DEFAULT_LENGTH, rng)
    }

    /// Set position and heading; the heading is wrapped into [0, 2pi)
    pub fn set(&mut self, x: f64, y: f64, orientation: f64) {
        self.pose = Pose2D::new(x, y, orientation);
    }

    /// Set the standard deviations of the steering [rad] and distance [m] noise.
    ///
    /// Negative or non-finite values are rejected and leave the vehicle untouched.
    pub fn set_noise(&mut self, steering_noise: f64, distance_noise: f64) -> TrackingResult<()> {
        let steering_dist = zero_mean_noise("steering_noise", steering_noise)?;
        let distance_dist = zero_mean_noise("distance_noise", distance_noise)?;
        self.steering_noise = steering_noise;
        self.distance_noise = distance_noise;
        self.steering_dist = steering_dist;
        self.distance_dist = distance_dist;
        Ok(())
    }

    /// Set the systematic steering bias [rad] added to every command
    pub fn set_steering_drift(&mut self, drift: f64) {
        self.steering_drift = drift;
    }

    pub fn pose(&self) -> Pose2D {
        self.pose
    }

    pub fn x(&self) -> f64 {
        self.pose.x
    }

    pub fn y(&self) -> f64 {
        self.pose.y
    }

    pub fn orientation(&self) -> f64 {
        self.pose.orientation
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn steering_noise(&self) -> f64 {
        self.steering_noise
    }

    pub fn distance_noise(&self) -> f64 {
        self.distance_noise
    }

    pub fn steering_drift(&self) -> f64 {
        self.steering_drift
    }

    /// Move with the default limits (tolerance 0.001, max steering pi/4)
    pub fn drive(&mut self, steering: f64, distance: f64) {
        self.drive_with(steering, distance, &MotionLimits::default());
    }

    /// Move the vehicle.
    ///
    /// steering = front wheel angle, clamped to `limits.max_steering_angle`
    /// distance = distance driven, clamped to be non-negative
    ///
    /// A NaN steering command is not saturated and propagates into the pose.
    pub fn drive_with(&mut self, steering: f64, distance: f64, limits: &MotionLimits) {
        let max = limits.max_steering_angle;
        let steering = if steering > max {
            max
        } else if steering < -max {
            -max
        } else {
            steering
        };
        let distance = distance.max(0.0);

        // the generator is sampled even at zero std-dev, where the offset is exactly 0
        let steering_offset = self.steering_dist.sample(&mut self.rng);
        let distance_offset = self.distance_dist.sample(&mut self.rng);

        // drift is added after the clamp, so actuation may exceed the limit
        let steering2 = steering + steering_offset + self.steering_drift;
        let distance2 = distance + distance_offset;

        let turn = steering2.tan() * distance2 / self.length;
        let yaw = self.pose.orientation;

        if turn.abs() < limits.tolerance {
            self.pose.x += distance2 * yaw.cos();
            self.pose.y += distance2 * yaw.sin();
        } else {
            let radius = distance2 / turn;
            let cx = self.pose.x - yaw.sin() * radius;
            let cy = self.pose.y + yaw.cos() * radius;
            let new_yaw = normalize_orientation(yaw + turn);
            self.pose = Pose2D {
                x: cx + new_yaw.sin() * radius,
                y: cy - new_yaw.cos() * radius,
                orientation: new_yaw,
            };
        }
    }
}

impl<R: Rng> MotionModel for Vehicle2D<R> {
    fn pose(&self) -> Pose2D {
        self.pose
    }

    fn advance(&mut self, steering: f64, distance: f64, limits: &MotionLimits) {
        self.drive_with(steering, distance, limits);
    }
}

impl<R: Rng> fmt::Display for Vehicle2D<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[x={:.5} y={:.5} orient={:.5}]",
            self.pose.x, self.pose.y, self.pose.orientation
        )
    }
}

impl<R: Rng> fmt::Debug for Vehicle2D<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vehicle2D")
            .field("pose", &self.pose)
            .field("length", &self.length)
            .field("steering_noise", &self.steering_noise)
            .field("distance_noise", &self.distance_noise)
            .field("steering_drift", &self.steering_drift)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{PI, TAU};

    fn vehicle() -> Vehicle2D {
        Vehicle2D::seeded(DEFAULT_LENGTH, 7).unwrap()
    }

    #[test]
    fn test_defaults() {
        let v = vehicle();
        assert_eq!(v.pose(), Pose2D::origin());
        assert_eq!(v.length(), 10.0);
        assert_eq!(v.steering_noise(), 0.0);
        assert_eq!(v.distance_noise(), 0.0);
        assert_eq!(v.steering_drift(), 0.0);
    }

    #[test]
    fn test_with_rng_uses_default_length() {
        let v = Vehicle2D::with_rng(ChaCha8Rng::seed_from_u64(1)).unwrap();
        assert_eq!(v.length(), DEFAULT_LENGTH);
        assert_eq!(v.pose(), Pose2D::origin());
    }

    #[test]
    fn test_rejects_bad_length() {
        assert!(Vehicle2D::seeded(0.0, 0).is_err());
        assert!(Vehicle2D::seeded(-2.0, 0).is_err());
        assert!(Vehicle2D::seeded(f64::NAN, 0).is_err());
    }

    #[test]
    fn test_set_normalizes_orientation() {
        let mut v = vehicle();
        v.set(3.0, -4.0, -PI / 2.0);
        assert_eq!(v.x(), 3.0);
        assert_eq!(v.y(), -4.0);
        assert_abs_diff_eq!(v.orientation(), 1.5 * PI, epsilon = 1e-12);

        v.set(0.0, 0.0, 5.0 * PI);
        assert_abs_diff_eq!(v.orientation(), PI, epsilon = 1e-12);
    }

    #[test]
    fn test_set_noise_rejects_negative() {
        let mut v = vehicle();
        v.set_noise(0.1, 0.2).unwrap();
        assert!(v.set_noise(-0.1, 0.0).is_err());
        assert!(v.set_noise(0.0, -1.0).is_err());
        assert_eq!(v.steering_noise(), 0.1);
        assert_eq!(v.distance_noise(), 0.2);
        assert!(v.set_noise(f64::INFINITY, 0.0).is_err());
        assert!(v.set_noise(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_rejected_noise_keeps_previous_distribution() {
        let noisy_run = |v: &mut Vehicle2D| {
            for _ in 0..10 {
                v.drive(0.1, 1.0);
            }
            v.pose()
        };
        let mut reference = vehicle();
        reference.set_noise(0.1, 0.05).unwrap();
        let expected = noisy_run(&mut reference);

        let mut v = vehicle();
        v.set_noise(0.1, 0.05).unwrap();
        assert!(v.set_noise(f64::NAN, 0.05).is_err());
        assert_eq!(noisy_run(&mut v), expected);

        let mut quiet = vehicle();
        assert_ne!(noisy_run(&mut quiet), expected);
    }

    #[test]
    fn test_zero_noise_is_exact() {
        let mut v = vehicle();
        for _ in 0..5 {
            v.drive(0.0, 1.5);
        }
        assert_eq!(v.pose(), Pose2D::new(7.5, 0.0, 0.0));
    }

    #[test]
    fn test_straight_line_motion() {
        let mut v = vehicle();
        v.set(1.0, 2.0, PI / 6.0);
        v.drive(0.0, 3.0);
        assert_abs_diff_eq!(v.x(), 1.0 + 3.0 * (PI / 6.0).cos(), epsilon = 1e-12);
        assert_abs_diff_eq!(v.y(), 2.0 + 3.0 * (PI / 6.0).sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(v.orientation(), PI / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_distance_is_clamped() {
        let mut v = vehicle();
        v.set(5.0, 5.0, 1.0);
        v.drive(0.3, -2.0);
        assert_eq!(v.pose(), Pose2D::new(5.0, 5.0, 1.0));
    }

    #[test]
    fn test_steering_is_clamped_before_drift() {
        let mut clamped = vehicle();
        clamped.drive(10.0, 1.0);
        let mut at_limit = vehicle();
        at_limit.drive(FRAC_PI_4, 1.0);
        assert_eq!(clamped.pose(), at_limit.pose());

        // drift pushes the effective angle past the nominal limit
        let mut drifting = vehicle();
        drifting.set_steering_drift(0.2);
        drifting.drive(10.0, 1.0);
        let expected_turn = (FRAC_PI_4 + 0.2).tan() / DEFAULT_LENGTH;
        assert_abs_diff_eq!(drifting.orientation(), expected_turn, epsilon = 1e-12);
    }

    #[test]
    fn test_nan_steering_is_not_saturated() {
        let mut v = vehicle();
        v.drive(f64::NAN, 1.0);
        assert!(v.x().is_nan());
        assert!(v.y().is_nan());

        let mut full_lock = vehicle();
        full_lock.drive(-FRAC_PI_4, 1.0);
        assert!(full_lock.y() < 0.0);
    }

    #[test]
    fn test_arc_motion_stays_on_circle() {
        let mut v = vehicle();
        v.set(2.0, -1.0, 0.4);
        let steering: f64 = 0.3;
        let distance: f64 = 2.0;
        let turn = steering.tan() * distance / v.length();
        let radius = distance / turn;
        let cx = 2.0 - 0.4_f64.sin() * radius;
        let cy = -1.0 + 0.4_f64.cos() * radius;

        v.drive(steering, distance);

        let r = ((v.x() - cx).powi(2) + (v.y() - cy).powi(2)).sqrt();
        assert_abs_diff_eq!(r, radius.abs(), epsilon = 1e-9);
        assert_abs_diff_eq!(v.orientation(), 0.4 + turn, epsilon = 1e-12);
    }

    #[test]
    fn test_right_turn_wraps_orientation() {
        let mut v = vehicle();
        v.drive(-0.5, 1.0);
        assert!(v.orientation() > PI && v.orientation() < TAU);
        assert!(v.y() < 0.0);
    }

    #[test]
    fn test_small_turn_uses_straight_line() {
        let mut v = vehicle();
        let limits = MotionLimits::new(0.1, FRAC_PI_4).unwrap();
        v.drive_with(0.05, 1.0, &limits);
        assert_eq!(v.orientation(), 0.0);
        assert_abs_diff_eq!(v.x(), 1.0, epsilon = 1e-12);
        assert_eq!(v.y(), 0.0);
    }

    #[test]
    fn test_invalid_limits() {
        assert!(MotionLimits::new(0.0, FRAC_PI_4).is_err());
        assert!(MotionLimits::new(0.001, -1.0).is_err());
        assert!(MotionLimits::default().validate().is_ok());
    }

    #[test]
    fn test_noise_is_reproducible_per_seed() {
        let run = |seed: u64| {
            let mut v = Vehicle2D::seeded(DEFAULT_LENGTH, seed).unwrap();
            v.set_noise(0.1, 0.05).unwrap();
            for _ in 0..20 {
                v.drive(0.1, 1.0);
            }
            v.pose()
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }

    #[test]
    fn test_display() {
        let mut v = vehicle();
        v.set(1.0, 2.5, 0.25);
        assert_eq!(format!("{}", v), "[x=1.00000 y=2.50000 orient=0.25000]");
    }
}
