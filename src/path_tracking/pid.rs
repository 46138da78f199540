//! Discrete PID law on the cross-track error
//!
//! One update per tick, no time step: the derivative is the raw error
//! difference and the integral is the raw running sum.

use crate::common::error::ensure_finite;
use crate::common::{Controller, TrackingResult};

/// Controller gains
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidGains {
    /// Proportional gain
    pub kp: f64,
    /// Derivative gain
    pub kd: f64,
    /// Integral gain
    pub ki: f64,
}

impl Default for PidGains {
    fn default() -> Self {
        Self {
            kp: 0.1,
            kd: 3.0,
            ki: 0.0001,
        }
    }
}

impl PidGains {
    pub fn new(kp: f64, kd: f64, ki: f64) -> Self {
        Self { kp, kd, ki }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn validate(&self) -> TrackingResult<()> {
        ensure_finite("kp", self.kp)?;
        ensure_finite("kd", self.kd)?;
        ensure_finite("ki", self.ki)
    }
}

/// Error memory carried from one tick to the next
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PidState {
    pub previous_error: f64,
    pub cumulative_error: f64,
}

#[derive(Debug, Clone)]
pub struct PidController {
    gains: PidGains,
    state: PidState,
    primed: bool,
}

impl PidController {
    pub fn new(gains: PidGains) -> Self {
        PidController {
            gains,
            state: PidState::default(),
            primed: false,
        }
    }

    pub fn gains(&self) -> &PidGains {
        &self.gains
    }

    pub fn state(&self) -> &PidState {
        &self.state
    }

    /// Start a run from `error` so the first derivative term is zero
    pub fn prime(&mut self, error: f64) {
        self.state = PidState {
            previous_error: error,
            cumulative_error: 0.0,
        };
        self.primed = true;
    }

    /// Feed one error sample and return the corrective command.
    ///
    /// The first sample after construction or `reset` primes the controller.
    pub fn update(&mut self, error: f64) -> f64 {
        if !self.primed {
            self.prime(error);
        }
        self.state.cumulative_error += error;
        let diff = error - self.state.previous_error;
        self.state.previous_error = error;
        -self.gains.kp * error - self.gains.kd * diff - self.gains.ki * self.state.cumulative_error
    }
}

impl Controller for PidController {
    type State = f64;
    type Reference = f64;
    type Output = f64;

    fn compute(&mut self, state: &f64, reference: &f64) -> f64 {
        self.update(state - reference)
    }

    fn reset(&mut self) {
        self.state = PidState::default();
        self.primed = false;
    }
}
