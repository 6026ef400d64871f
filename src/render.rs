//! Planar projection for renderers
//!
//! Drawing is left to the caller. This module turns a trajectory sample
//! into pivot and bob positions in the plane and keeps the trail of bob
//! positions, with `y` pointing up and the pivot's rest point at the
//! origin.

use std::f64::consts::PI;
use std::time::Duration;

use crate::config::{SimulationConfig, TimeGrid};
use crate::controller::ResimulationController;
use crate::simulator::Trajectory;

/// Bob positions accumulated frame by frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderTrail {
    points: Vec<(f64, f64)>,
}

impl RenderTrail {
    /// Append a point
    pub fn push(&mut self, x: f64, y: f64) {
        self.points.push((x, y));
    }

    /// Remove all points
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no point has been drawn
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in drawing order
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Sample index into the grid and trajectory
    pub index: usize,
    /// Sample time (s)
    pub t: f64,
    /// Pivot position `(0, A cos ωt)`
    pub pivot: (f64, f64),
    /// Bob position `(L sin θ, y0 - L cos θ)`
    pub bob: (f64, f64),
    /// Drive frequency (rad/s)
    pub omega: f64,
    /// Drive frequency (Hz)
    pub frequency_hz: f64,
}

impl Frame {
    /// Project sample `index` of `trajectory`
    ///
    /// Returns `None` when `index` is outside the grid.
    pub fn project(
        config: &SimulationConfig,
        grid: &TimeGrid,
        trajectory: &Trajectory,
        omega: f64,
        index: usize,
    ) -> Option<Self> {
        let t = grid.get(index)?;
        let state = trajectory.get(index)?;

        let y0 = config.pendulum(omega).pivot_height(t);
        let x = config.length * state.theta.sin();
        let y = y0 - config.length * state.theta.cos();

        Some(Self {
            index,
            t,
            pivot: (0.0, y0),
            bob: (x, y),
            omega,
            frequency_hz: omega / (2.0 * PI),
        })
    }

    /// Rod length as drawn, `|bob - pivot|`
    pub fn rod_length(&self) -> f64 {
        let dx = self.bob.0 - self.pivot.0;
        let dy = self.bob.1 - self.pivot.1;
        dx.hypot(dy)
    }
}

/// Steps through the current trajectory one frame per call
///
/// The frame index wraps around at the end of the grid, so the animation
/// repeats; the trail is only reset when the trajectory is recomputed.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    next_index: usize,
}

impl Animator {
    /// Start at frame 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the next call to [`next_frame`](Self::next_frame) will draw
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Restart from frame 0
    pub fn rewind(&mut self) {
        self.next_index = 0;
    }

    /// Project the next frame and append its bob position to the trail
    pub fn next_frame(&mut self, controller: &mut ResimulationController) -> Option<Frame> {
        let grid = controller.time_grid();
        if grid.is_empty() {
            return None;
        }

        let index = self.next_index % grid.len();
        let trajectory = controller.current_trajectory();
        let frame = Frame::project(
            controller.config(),
            &grid,
            &trajectory,
            controller.current_frequency(),
            index,
        )?;

        controller.trail_mut().push(frame.bob.0, frame.bob.1);
        self.next_index = (index + 1) % grid.len();
        Some(frame)
    }

    /// Wall-clock time between frames for real-time playback
    pub fn frame_interval(config: &SimulationConfig) -> Duration {
        Duration::from_secs_f64(config.dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrator::PendulumState;

    #[test]
    fn test_project_initial_frame() {
        let config = SimulationConfig::default();
        let grid = TimeGrid::new(&config).unwrap();
        let omega = 14.0;
        let traj = crate::simulator::simulate(omega, &config, &grid);

        let frame = Frame::project(&config, &grid, &traj, omega, 0).unwrap();
        let theta = config.initial.theta;
        assert_eq!(frame.t, 0.0);
        assert_eq!(frame.pivot, (0.0, 0.1));
        assert!((frame.bob.0 - theta.sin()).abs() < 1e-15);
        assert!((frame.bob.1 - (0.1 - theta.cos())).abs() < 1e-15);
        assert!((frame.frequency_hz - 14.0 / (2.0 * PI)).abs() < 1e-15);
    }

    #[test]
    fn test_project_out_of_range() {
        let config = SimulationConfig::default();
        let grid = TimeGrid::new(&config).unwrap();
        let traj = crate::simulator::simulate(10.0, &config, &grid);
        assert!(Frame::project(&config, &grid, &traj, 10.0, grid.len()).is_none());
    }

    #[test]
    fn test_rod_length_preserved() {
        let config = SimulationConfig::default()
            .with_length(0.75)
            .with_initial(PendulumState::new(1.2, 0.4));
        let grid = TimeGrid::new(&config).unwrap();
        let traj = crate::simulator::simulate(30.0, &config, &grid);
        for index in [0, 1, 137, grid.len() - 1] {
            let frame = Frame::project(&config, &grid, &traj, 30.0, index).unwrap();
            assert!((frame.rod_length() - 0.75).abs() < 1e-12);
        }
    }

    #[test]
    fn test_animator_appends_to_trail_and_wraps() {
        let config = SimulationConfig::default().with_timing(0.1, 0.5);
        let mut ctl = ResimulationController::new(config).unwrap();
        let mut animator = Animator::new();

        let indices: Vec<usize> = (0..7)
            .map(|_| animator.next_frame(&mut ctl).unwrap().index)
            .collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 0, 1]);
        assert_eq!(ctl.trail().len(), 7);
        assert_eq!(animator.next_index(), 2);
    }

    #[test]
    fn test_recompute_resets_trail_not_index() {
        let mut ctl = ResimulationController::new(SimulationConfig::default()).unwrap();
        let mut animator = Animator::new();
        for _ in 0..10 {
            animator.next_frame(&mut ctl);
        }
        ctl.set_frequency(42.0);
        assert!(ctl.trail().is_empty());

        let frame = animator.next_frame(&mut ctl).unwrap();
        assert_eq!(frame.index, 10);
        assert_eq!(frame.omega, 42.0);
        assert_eq!(ctl.trail().points(), &[frame.bob]);
    }

    #[test]
    fn test_frame_interval() {
        let config = SimulationConfig::default();
        assert_eq!(Animator::frame_interval(&config), Duration::from_millis(20));
    }

    #[test]
    fn test_trail_clear() {
        let mut trail = RenderTrail::default();
        trail.push(1.0, 2.0);
        assert_eq!(trail.points(), &[(1.0, 2.0)]);
        trail.clear();
        assert!(trail.is_empty());
    }
}
