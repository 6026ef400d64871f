//! Pendulum Dynamics
//!
//! Equations of motion for a rigid pendulum whose pivot oscillates
//! vertically as `y0(t) = A cos(ωt)`.
//!
//! In the pivot's accelerating frame the bob sees an effective gravity
//! `g + ÿ0(t)`, so the angular acceleration is
//!
//! ```text
//! θ̈ = -(g + ÿ0(t)) / L · sin θ,    ÿ0(t) = -ω² A sin(ωt)
//! ```
//!
//! `θ` is measured from the downward vertical, so `θ = π` is the
//! inverted position.
//!
//! The forcing term uses `sin(ωt)` while the drawn pivot follows
//! `cos(ωt)`: the two are a quarter period apart, so `ÿ0` is not the
//! exact second derivative of `y0`. Reference trajectories are defined by
//! this forcing, so both formulas are kept as they are.

/// Second-order scalar system: q̈ = f(t, q, q̇)
pub trait SecondOrderSystem {
    /// Evaluate the generalized acceleration
    ///
    /// # Arguments
    /// * `t` - Current time
    /// * `q` - Generalized coordinate
    /// * `q_dot` - Its time derivative
    fn acceleration(&self, t: f64, q: f64, q_dot: f64) -> f64;
}

/// Pendulum on a vertically driven pivot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KapitzaPendulum {
    /// Rod length L (m)
    pub length: f64,
    /// Pivot oscillation amplitude A (m)
    pub amplitude: f64,
    /// Gravitational acceleration g (m/s²)
    pub gravity: f64,
    /// Driving angular frequency ω (rad/s)
    pub omega: f64,
}

impl KapitzaPendulum {
    /// Vertical pivot position A cos(ωt)
    pub fn pivot_height(&self, t: f64) -> f64 {
        self.amplitude * (self.omega * t).cos()
    }

    /// Vertical pivot forcing -ω² A sin(ωt)
    ///
    /// Same amplitude as the second derivative of `pivot_height`, but a
    /// quarter period out of phase with it.
    pub fn pivot_acceleration(&self, t: f64) -> f64 {
        -self.omega.powi(2) * self.amplitude * (self.omega * t).sin()
    }

    /// Instantaneous gravity seen from the pivot frame
    pub fn effective_gravity(&self, t: f64) -> f64 {
        self.gravity + self.pivot_acceleration(t)
    }
}

impl SecondOrderSystem for KapitzaPendulum {
    fn acceleration(&self, t: f64, theta: f64, _theta_dot: f64) -> f64 {
        -self.effective_gravity(t) / self.length * theta.sin()
    }
}

/// Reference drive frequency sqrt(2g/A) above which the inverted
/// position is dynamically stabilized.
///
/// A motionless pivot (`A = 0`) has no such threshold and yields `+∞`.
pub fn omega_critical(gravity: f64, amplitude: f64) -> f64 {
    (2.0 * gravity / amplitude).sqrt()
}
