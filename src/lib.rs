//! # Kapitza: Driven-Pivot Pendulum Simulation
//!
//! Numerical core for the Kapitza pendulum: a rigid pendulum whose pivot
//! oscillates vertically at high frequency. Above a critical drive the
//! inverted position becomes dynamically stable.
//!
//! ## Features
//!
//! - Semi-implicit (symplectic) Euler integration on a fixed time grid
//! - Pure, deterministic trajectory simulation for any drive frequency
//! - A re-simulation controller that owns the active frequency and
//!   replaces the trajectory atomically on every change
//! - Planar projection and trail bookkeeping for renderers
//!
//! ## Basic Usage
//!
//! ```rust
//! use kapitza::{simulate, SimulationConfig, TimeGrid};
//!
//! let config = SimulationConfig::default();
//! let grid = TimeGrid::new(&config).unwrap();
//!
//! let traj = simulate(config.omega_critical(), &config, &grid);
//! assert_eq!(traj.len(), grid.len());
//! assert_eq!(traj[0], config.initial);
//! ```
//!
//! ## Interactive Use
//!
//! A UI holds a [`ResimulationController`]; slider callbacks call
//! [`ResimulationController::set_frequency`] and the frame callback reads
//! the current trajectory, typically through an [`Animator`].
//!
//! ```rust
//! use kapitza::{Animator, ResimulationController, SimulationConfig};
//!
//! let mut ctl = ResimulationController::new(SimulationConfig::default()).unwrap();
//! let mut animator = Animator::new();
//!
//! let frame = animator.next_frame(&mut ctl).unwrap();
//! assert_eq!(frame.index, 0);
//!
//! // Slider moved: the trajectory is recomputed and the trail cleared
//! assert!(ctl.set_frequency(60.0));
//! assert!(ctl.trail().is_empty());
//! ```
//!
//! ## Model
//!
//! With `θ` measured from the downward vertical and the pivot at
//! `y0(t) = A cos(ωt)`:
//!
//! ```text
//! θ̈ = -(g + ÿ0(t)) / L · sin θ,    ÿ0(t) = -ω² A sin(ωt)
//! ```
//!
//! The stabilization threshold used as the default drive is
//! `ω_c = sqrt(2g / A)`.
//!
//! ## References
//!
//! 1. Kapitza, P.L. (1951). "Dynamic stability of a pendulum when its
//!    point of suspension vibrates". Soviet Phys. JETP 21, 588-597.
//!
//! 2. Hairer, E., Lubich, C., & Wanner, G. (2006). "Geometric Numerical
//!    Integration". Springer.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod dynamics;
pub mod integrator;
pub mod render;
pub mod simulator;

pub use config::{ConfigError, FrequencyBounds, SimulationConfig, TimeGrid, MAX_GRID_SAMPLES};
pub use controller::{ResimulationController, FREQUENCY_TOLERANCE};
pub use dynamics::{omega_critical, KapitzaPendulum, SecondOrderSystem};
pub use integrator::{PendulumState, SymplecticEuler};
pub use render::{Animator, Frame, RenderTrail};
pub use simulator::{simulate, Trajectory};
