//! Headless Kapitza pendulum session.
//!
//! Plays the trajectory frame by frame the way an interactive UI would,
//! then moves the "slider" below and above the critical drive and reports
//! whether the pendulum stays inverted.
//!
//! Run with:
//!   cargo run --example inverted_pendulum [omega]
//!
//! Set `RUST_LOG=kapitza=debug` to see recomputations.

use std::f64::consts::PI;

use anyhow::{Context, Result};
use kapitza::{Animator, ResimulationController, SimulationConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kapitza=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SimulationConfig::default();
    let mut ctl = ResimulationController::new(config).context("invalid simulation config")?;

    if let Some(arg) = std::env::args().nth(1) {
        let omega: f64 = arg
            .parse()
            .with_context(|| format!("omega must be a number, got {arg:?}"))?;
        ctl.set_frequency(omega);
    }

    let omega_c = ctl.config().omega_critical();
    println!("Kapitza pendulum");
    println!("  omega_critical = {omega_c:.3} rad/s");
    println!("  frame interval = {:?}", Animator::frame_interval(ctl.config()));
    println!();

    // One second of animation, printed every 10th frame
    let mut animator = Animator::new();
    for _ in 0..50 {
        let frame = animator
            .next_frame(&mut ctl)
            .context("trajectory shorter than the time grid")?;
        if frame.index % 10 == 0 {
            println!(
                "  time = {:5.2} s  omega = {:5.1}  freq = {:5.2} Hz  bob = ({:+.3}, {:+.3})",
                frame.t, frame.omega, frame.frequency_hz, frame.bob.0, frame.bob.1
            );
        }
    }
    println!("  trail points: {}", ctl.trail().len());
    println!();

    println!("  {:>8}  {:>12}  {:>10}", "omega", "max |θ - π|", "inverted");
    for omega in [5.0, 10.0, omega_c, 30.0, 60.0, 100.0] {
        ctl.set_frequency(omega);
        let traj = ctl.current_trajectory();
        let deviation = traj
            .thetas()
            .map(|theta| (theta - PI).abs())
            .fold(0.0_f64, f64::max);
        println!(
            "  {:8.2}  {:12.4}  {:>10}",
            ctl.current_frequency(),
            deviation,
            if deviation < PI / 2.0 { "yes" } else { "no" }
        );
    }

    Ok(())
}
