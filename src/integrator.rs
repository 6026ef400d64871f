//! Semi-implicit (symplectic) Euler integration
//!
//! Each step updates the velocity from the current acceleration and then
//! advances the position with the *new* velocity:
//!
//! ```text
//! q̇ₙ₊₁ = q̇ₙ + h · f(tₙ, qₙ, q̇ₙ)
//! qₙ₊₁ = qₙ + h · q̇ₙ₊₁
//! ```
//!
//! Unlike explicit Euler this ordering does not pump energy into an
//! oscillator, which keeps long undamped pendulum runs bounded.

use crate::dynamics::SecondOrderSystem;

/// Pendulum state: angle from the downward vertical and its rate
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PendulumState {
    /// Angle θ (rad), unbounded
    pub theta: f64,
    /// Angular velocity θ̇ (rad/s)
    pub theta_dot: f64,
}

impl PendulumState {
    /// Create a state from angle and angular velocity
    pub fn new(theta: f64, theta_dot: f64) -> Self {
        Self { theta, theta_dot }
    }

    /// True when both components are finite
    pub fn is_finite(&self) -> bool {
        self.theta.is_finite() && self.theta_dot.is_finite()
    }
}

/// Fixed-step semi-implicit Euler integrator
#[derive(Debug, Clone, Copy)]
pub struct SymplecticEuler {
    /// Step size h
    pub dt: f64,
}

impl SymplecticEuler {
    /// Create an integrator with step size `dt`
    pub fn new(dt: f64) -> Self {
        Self { dt }
    }

    /// Advance `state` by one step starting at time `t`
    pub fn step<S: SecondOrderSystem>(&self, sys: &S, t: f64, state: PendulumState) -> PendulumState {
        let theta_ddot = sys.acceleration(t, state.theta, state.theta_dot);
        let theta_dot = state.theta_dot + theta_ddot * self.dt;
        let theta = state.theta + theta_dot * self.dt;
        PendulumState { theta, theta_dot }
    }

    /// Integrate over a sampled time grid
    ///
    /// The output has exactly one state per entry of `times`. Sample 0 is
    /// `initial`; each later sample is one step from the previous one,
    /// taken at the previous sample's time. The last grid time only
    /// receives a state, it never starts a step.
    ///
    /// Non-finite values are propagated rather than reported: at extreme
    /// drives the model itself is unstable.
    pub fn integrate<S: SecondOrderSystem>(
        &self,
        sys: &S,
        initial: PendulumState,
        times: &[f64],
    ) -> Vec<PendulumState> {
        let mut states = Vec::with_capacity(times.len());
        if times.is_empty() {
            return states;
        }

        let mut state = initial;
        states.push(state);
        for &t in &times[..times.len() - 1] {
            state = self.step(sys, t, state);
            states.push(state);
        }

        states
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Harmonic oscillator: q̈ = -ω² q
    struct HarmonicOscillator {
        omega: f64,
    }

    impl SecondOrderSystem for HarmonicOscillator {
        fn acceleration(&self, _t: f64, q: f64, _q_dot: f64) -> f64 {
            -self.omega * self.omega * q
        }
    }

    /// Free fall: q̈ = -g
    struct FreeFall;

    impl SecondOrderSystem for FreeFall {
        fn acceleration(&self, _t: f64, _q: f64, _q_dot: f64) -> f64 {
            -1.0
        }
    }

    fn grid(n: usize, dt: f64) -> Vec<f64> {
        (0..n).map(|i| i as f64 * dt).collect()
    }

    #[test]
    fn test_velocity_updated_before_position() {
        let euler = SymplecticEuler::new(0.5);
        let next = euler.step(&FreeFall, 0.0, PendulumState::new(0.0, 0.0));

        // Explicit Euler would leave the position at 0 after one step
        assert_eq!(next.theta_dot, -0.5);
        assert_eq!(next.theta, -0.25);
    }

    #[test]
    fn test_output_length_matches_grid() {
        let euler = SymplecticEuler::new(0.1);
        let sys = HarmonicOscillator { omega: 1.0 };
        for n in [1, 2, 17, 500] {
            let states = euler.integrate(&sys, PendulumState::new(1.0, 0.0), &grid(n, 0.1));
            assert_eq!(states.len(), n);
        }
    }

    #[test]
    fn test_empty_grid_yields_empty_output() {
        let euler = SymplecticEuler::new(0.1);
        let states = euler.integrate(&FreeFall, PendulumState::default(), &[]);
        assert!(states.is_empty());
    }

    #[test]
    fn test_first_sample_is_initial_state() {
        let euler = SymplecticEuler::new(0.01);
        let initial = PendulumState::new(0.3, -0.2);
        let states = euler.integrate(&HarmonicOscillator { omega: 3.0 }, initial, &grid(10, 0.01));
        assert_eq!(states[0], initial);
    }

    #[test]
    fn test_harmonic_energy_stays_bounded() {
        // Symplectic Euler conserves a modified energy: the drift over many
        // periods stays O(h) and does not grow.
        let omega = 1.0;
        let dt = 0.01;
        let sys = HarmonicOscillator { omega };
        let euler = SymplecticEuler::new(dt);
        let n = (20.0 * 2.0 * std::f64::consts::PI / dt) as usize;
        let states = euler.integrate(&sys, PendulumState::new(1.0, 0.0), &grid(n, dt));

        let energy = |s: &PendulumState| 0.5 * s.theta_dot * s.theta_dot + 0.5 * omega * omega * s.theta * s.theta;
        let e0 = energy(&states[0]);
        let max_drift = states
            .iter()
            .map(|s| (energy(s) - e0).abs() / e0)
            .fold(0.0_f64, f64::max);

        assert!(max_drift < 0.02, "relative energy drift {} too large", max_drift);
    }

    #[test]
    fn test_is_finite() {
        assert!(PendulumState::new(1.0, 2.0).is_finite());
        assert!(!PendulumState::new(f64::NAN, 0.0).is_finite());
        assert!(!PendulumState::new(0.0, f64::INFINITY).is_finite());
    }
}
