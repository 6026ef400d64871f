//! Simulation configuration and the shared time grid
//!
//! All physical constants are fixed when a [`SimulationConfig`] is built.
//! [`SimulationConfig::validate`] rejects any combination that would make
//! the integration ill-defined, so everything downstream can assume a
//! positive rod length, a positive step and a non-empty grid.

use crate::dynamics::{omega_critical, KapitzaPendulum};
use crate::integrator::PendulumState;
use std::f64::consts::PI;

/// Largest time grid a configuration may request
pub const MAX_GRID_SAMPLES: usize = 10_000_000;

/// Configuration errors, detected at startup
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A parameter is NaN or infinite
    #[error("{name} must be finite, got {value}")]
    NonFinite {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },
    /// Rod length is zero or negative
    #[error("rod length must be positive, got {0}")]
    NonPositiveLength(f64),
    /// Time step is zero or negative
    #[error("time step must be positive, got {0}")]
    NonPositiveStep(f64),
    /// Duration does not exceed one time step
    #[error("duration {t_max} must exceed the time step {dt}")]
    DurationTooShort {
        /// Total duration
        t_max: f64,
        /// Time step
        dt: f64,
    },
    /// Pivot amplitude is negative
    #[error("pivot amplitude must be non-negative, got {0}")]
    NegativeAmplitude(f64),
    /// Gravity is zero or negative
    #[error("gravity must be positive, got {0}")]
    NonPositiveGravity(f64),
    /// `t_max / dt` asks for more samples than [`MAX_GRID_SAMPLES`]
    #[error("time grid of {samples} samples exceeds the limit of {limit}")]
    GridTooLarge {
        /// Requested sample count, `ceil(t_max / dt)`
        samples: f64,
        /// Allowed maximum
        limit: usize,
    },
    /// Frequency bounds are inverted or the step is invalid
    #[error("invalid frequency bounds [{min}, {max}] with step {step}")]
    InvalidBounds {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
        /// Quantization step
        step: f64,
    },
}

/// Allowed range of the driving frequency, with optional quantization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBounds {
    /// Lowest accepted ω (rad/s)
    pub min: f64,
    /// Highest accepted ω (rad/s)
    pub max: f64,
    /// Quantization step measured from `min`; 0 disables snapping
    pub step: f64,
}

impl Default for FrequencyBounds {
    fn default() -> Self {
        Self {
            min: 5.0,
            max: 100.0,
            step: 0.1,
        }
    }
}

impl FrequencyBounds {
    /// Create bounds without quantization
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max, step: 0.0 }
    }

    /// Set the quantization step
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Clamp `omega` into `[min, max]`, then snap it to the step grid
    pub fn clamp(&self, omega: f64) -> f64 {
        let omega = omega.clamp(self.min, self.max);
        if self.step > 0.0 {
            let snapped = ((omega - self.min) / self.step).round() * self.step + self.min;
            snapped.clamp(self.min, self.max)
        } else {
            omega
        }
    }

    /// Clamp `omega` into `[min, max]` without snapping
    pub fn clamp_unsnapped(&self, omega: f64) -> f64 {
        omega.clamp(self.min, self.max)
    }

    /// True when `omega` lies inside the range
    pub fn contains(&self, omega: f64) -> bool {
        (self.min..=self.max).contains(&omega)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidBounds {
            min: self.min,
            max: self.max,
            step: self.step,
        };
        if !self.min.is_finite() || !self.max.is_finite() || !self.step.is_finite() {
            return Err(invalid());
        }
        if self.min > self.max || self.step < 0.0 {
            return Err(invalid());
        }
        Ok(())
    }
}

/// Immutable physical and numerical constants of a run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Rod length L (m)
    pub length: f64,
    /// Pivot oscillation amplitude A (m)
    pub amplitude: f64,
    /// Gravitational acceleration g (m/s²)
    pub gravity: f64,
    /// Time step dt (s)
    pub dt: f64,
    /// Total duration t_max (s), excluded from the grid
    pub t_max: f64,
    /// State at t = 0 for every run
    pub initial: PendulumState,
    /// Allowed driving frequencies
    pub bounds: FrequencyBounds,
}

impl Default for SimulationConfig {
    /// A 1 m rod, 10 cm pivot stroke, released 0.1 rad off the inverted
    /// position and observed for 10 s at 50 Hz.
    fn default() -> Self {
        Self {
            length: 1.0,
            amplitude: 0.1,
            gravity: 9.81,
            dt: 0.02,
            t_max: 10.0,
            initial: PendulumState::new(PI - 0.1, 0.0),
            bounds: FrequencyBounds::default(),
        }
    }
}

impl SimulationConfig {
    /// Set the rod length
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Set the pivot amplitude
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Set gravitational acceleration
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set time step and total duration
    pub fn with_timing(mut self, dt: f64, t_max: f64) -> Self {
        self.dt = dt;
        self.t_max = t_max;
        self
    }

    /// Set the initial state
    pub fn with_initial(mut self, initial: PendulumState) -> Self {
        self.initial = initial;
        self
    }

    /// Set the frequency bounds
    pub fn with_bounds(mut self, bounds: FrequencyBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Check every invariant the integration relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("length", self.length),
            ("amplitude", self.amplitude),
            ("gravity", self.gravity),
            ("dt", self.dt),
            ("t_max", self.t_max),
            ("theta0", self.initial.theta),
            ("theta_dot0", self.initial.theta_dot),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }

        if self.length <= 0.0 {
            return Err(ConfigError::NonPositiveLength(self.length));
        }
        if self.dt <= 0.0 {
            return Err(ConfigError::NonPositiveStep(self.dt));
        }
        if self.t_max <= self.dt {
            return Err(ConfigError::DurationTooShort {
                t_max: self.t_max,
                dt: self.dt,
            });
        }
        if self.amplitude < 0.0 {
            return Err(ConfigError::NegativeAmplitude(self.amplitude));
        }
        if self.gravity <= 0.0 {
            return Err(ConfigError::NonPositiveGravity(self.gravity));
        }
        let samples = self.sample_count();
        if samples > MAX_GRID_SAMPLES as f64 {
            return Err(ConfigError::GridTooLarge {
                samples,
                limit: MAX_GRID_SAMPLES,
            });
        }
        self.bounds.validate()
    }

    /// Number of grid samples, `ceil(t_max / dt)`
    fn sample_count(&self) -> f64 {
        (self.t_max / self.dt).ceil()
    }

    /// Reference frequency sqrt(2g/A); `+∞` for a motionless pivot
    pub fn omega_critical(&self) -> f64 {
        omega_critical(self.gravity, self.amplitude)
    }

    /// Starting drive: `omega_critical` clamped into the bounds
    ///
    /// Finite for every valid configuration: positive gravity keeps
    /// `omega_critical` in `(0, +∞]`.
    pub fn initial_frequency(&self) -> f64 {
        self.bounds.clamp_unsnapped(self.omega_critical())
    }

    /// Pendulum model for a given drive
    pub fn pendulum(&self, omega: f64) -> KapitzaPendulum {
        KapitzaPendulum {
            length: self.length,
            amplitude: self.amplitude,
            gravity: self.gravity,
            omega,
        }
    }
}

/// Sample times `0, dt, 2dt, …` up to but excluding `t_max`
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    dt: f64,
    times: Vec<f64>,
}

impl TimeGrid {
    /// Build the grid for a configuration
    ///
    /// Holds `ceil(t_max / dt)` samples, each computed as `i * dt` so that
    /// rounding does not accumulate along the grid.
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let n = config.sample_count() as usize;
        let times = (0..n).map(|i| i as f64 * config.dt).collect();
        Ok(Self {
            dt: config.dt,
            times,
        })
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false for a grid built from a valid configuration
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Sample time at `index`
    pub fn get(&self, index: usize) -> Option<f64> {
        self.times.get(index).copied()
    }

    /// Spacing between samples
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// All sample times
    pub fn as_slice(&self) -> &[f64] {
        &self.times
    }

    /// Iterate over sample times
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.times.iter().copied()
    }
}
