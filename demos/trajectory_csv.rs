//! Write one trajectory to CSV.
//!
//! Run with:
//!   cargo run --example trajectory_csv [omega] [output.csv]

use std::path::PathBuf;

use anyhow::{Context, Result};
use kapitza::{Frame, ResimulationController, SimulationConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kapitza=info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let mut ctl = ResimulationController::new(SimulationConfig::default())?;
    if let Some(arg) = args.next() {
        let omega: f64 = arg
            .parse()
            .with_context(|| format!("omega must be a number, got {arg:?}"))?;
        ctl.set_frequency(omega);
    }
    let path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("kapitza_trajectory.csv"));

    let grid = ctl.time_grid();
    let traj = ctl.current_trajectory();
    let omega = ctl.current_frequency();

    let mut wtr = csv::Writer::from_path(&path)
        .with_context(|| format!("cannot open {}", path.display()))?;
    wtr.write_record(["t", "theta", "theta_dot", "pivot_y", "bob_x", "bob_y"])?;
    for index in 0..grid.len() {
        let frame = Frame::project(ctl.config(), &grid, &traj, omega, index)
            .context("trajectory shorter than the time grid")?;
        let state = traj[index];
        wtr.write_record([
            frame.t.to_string(),
            state.theta.to_string(),
            state.theta_dot.to_string(),
            frame.pivot.1.to_string(),
            frame.bob.0.to_string(),
            frame.bob.1.to_string(),
        ])?;
    }
    wtr.flush()?;

    println!(
        "wrote {} samples for omega = {:.3} rad/s to {}",
        grid.len(),
        omega,
        path.display()
    );
    Ok(())
}
