//! Re-simulation Controller
//!
//! Owns the active drive frequency, the trajectory computed for it and the
//! trail drawn so far. Every frequency change recomputes the whole
//! trajectory from the fixed initial condition before returning, so a
//! reader never sees a partial result.

use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::config::{ConfigError, SimulationConfig, TimeGrid};
use crate::render::RenderTrail;
use crate::simulator::{simulate, Trajectory};

/// Two frequencies closer than this are treated as equal
pub const FREQUENCY_TOLERANCE: f64 = 1e-9;

/// Holds the current drive frequency and its trajectory
///
/// The trajectory is shared as an `Arc` and replaced wholesale; a handle
/// obtained from [`current_trajectory`](Self::current_trajectory) stays
/// valid (and unchanged) after a frequency change.
#[derive(Debug)]
pub struct ResimulationController {
    config: SimulationConfig,
    grid: Arc<TimeGrid>,
    omega: f64,
    trajectory: Arc<Trajectory>,
    trail: RenderTrail,
    recomputations: u64,
}

impl ResimulationController {
    /// Validate `config`, build the time grid and simulate the initial drive
    ///
    /// The initial drive is `omega_critical` clamped into the configured
    /// bounds.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        let grid = Arc::new(TimeGrid::new(&config)?);
        let omega = config.initial_frequency();
        let trajectory = Arc::new(simulate(omega, &config, &grid));

        info!(
            omega,
            omega_critical = config.omega_critical(),
            samples = grid.len(),
            "kapitza controller ready"
        );

        Ok(Self {
            config,
            grid,
            omega,
            trajectory,
            trail: RenderTrail::default(),
            recomputations: 0,
        })
    }

    /// Change the drive frequency
    ///
    /// The request is clamped (and snapped) to the configured bounds. If
    /// it equals the current frequency, either as clamped or as snapped,
    /// nothing happens; otherwise the trajectory is recomputed from `t = 0`
    /// and the trail is cleared. Non-finite requests are ignored.
    ///
    /// Re-sending the (unsnapped) startup frequency is a no-op.
    ///
    /// Returns `true` when a recomputation took place.
    pub fn set_frequency(&mut self, omega: f64) -> bool {
        if !omega.is_finite() {
            warn!(requested = omega, "ignoring non-finite drive frequency");
            return false;
        }

        let bounds = self.config.bounds;
        if (bounds.clamp_unsnapped(omega) - self.omega).abs() <= FREQUENCY_TOLERANCE {
            trace!(omega, "drive frequency unchanged");
            return false;
        }

        let omega = bounds.clamp(omega);
        if (omega - self.omega).abs() <= FREQUENCY_TOLERANCE {
            trace!(omega, "drive frequency unchanged");
            return false;
        }

        self.trajectory = Arc::new(simulate(omega, &self.config, &self.grid));
        self.omega = omega;
        self.trail.clear();
        self.recomputations += 1;

        debug!(
            omega,
            samples = self.trajectory.len(),
            recomputations = self.recomputations,
            "trajectory recomputed"
        );
        true
    }

    /// Trajectory for the current frequency
    pub fn current_trajectory(&self) -> Arc<Trajectory> {
        Arc::clone(&self.trajectory)
    }

    /// Current drive frequency (rad/s)
    pub fn current_frequency(&self) -> f64 {
        self.omega
    }

    /// Shared sample times
    pub fn time_grid(&self) -> Arc<TimeGrid> {
        Arc::clone(&self.grid)
    }

    /// Configuration in effect
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Bob positions drawn since the last recomputation
    pub fn trail(&self) -> &RenderTrail {
        &self.trail
    }

    /// Mutable access for the renderer to extend the trail
    pub fn trail_mut(&mut self) -> &mut RenderTrail {
        &mut self.trail
    }

    /// Number of recomputations triggered by [`set_frequency`](Self::set_frequency)
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
