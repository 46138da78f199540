//! PID path tracking on the step track
//!
//! Simulates the drifting vehicle and prints the trajectory as CSV
//! (`tick,x,y,cte`) on stdout for an external plotter.
//!
//! Run with: cargo run --bin pid_path_tracking -- --kp 0.2 --seed 3

use std::io::{self, BufWriter, Write};

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pid_path_tracking::scenarios::{self, STEP_TRACK_LENGTH};
use pid_path_tracking::vehicle::DEFAULT_LENGTH;
use pid_path_tracking::{run_simulation, PidGains, SimulationConfig, SimulationResult, TrackingResult, Vehicle2D};

#[derive(Parser, Debug)]
#[command(name = "pid_path_tracking")]
#[command(about = "PID steering of a drifting bicycle-model vehicle along a step track")]
struct Args {
    /// Proportional gain
    #[arg(long, default_value_t = 0.1)]
    kp: f64,

    /// Derivative gain
    #[arg(long, default_value_t = 3.0)]
    kd: f64,

    /// Integral gain
    #[arg(long, default_value_t = 0.0001)]
    ki: f64,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = STEP_TRACK_LENGTH)]
    ticks: usize,

    /// Distance driven per tick [m]
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Vehicle wheelbase [m]
    #[arg(long, default_value_t = DEFAULT_LENGTH)]
    length: f64,

    /// Systematic steering drift [deg]
    #[arg(long, default_value_t = scenarios::STEP_DRIFT_DEG)]
    drift_deg: f64,

    /// Steering noise standard deviation [rad]
    #[arg(long, default_value_t = 0.0)]
    steering_noise: f64,

    /// Distance noise standard deviation [m]
    #[arg(long, default_value_t = 0.0)]
    distance_noise: f64,

    /// Seed of the noise generator
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn write_csv<W: Write>(out: W, result: &SimulationResult) -> TrackingResult<()> {
    let mut out = BufWriter::new(out);
    writeln!(out, "tick,x,y,cte")?;
    let rows = result.trajectory.points().iter().zip(&result.cross_track_errors);
    for (tick, (p, cte)) in rows.enumerate() {
        writeln!(out, "{},{},{},{}", tick, p.x, p.y, cte)?;
    }
    out.flush()?;
    Ok(())
}

fn run(args: &Args) -> TrackingResult<()> {
    let mut vehicle = Vehicle2D::seeded(args.length, args.seed)?;
    scenarios::configure_drifting(&mut vehicle);
    vehicle.set_steering_drift(args.drift_deg.to_radians());
    vehicle.set_noise(args.steering_noise, args.distance_noise)?;

    let track = scenarios::step_track();
    let config = SimulationConfig::with_params(
        PidGains::new(args.kp, args.kd, args.ki),
        args.ticks,
        args.speed,
    );

    info!("Starting PID path tracking from {}", vehicle);
    let result = run_simulation(&mut vehicle, &track, &config)?;
    info!(
        "Finished at {} (mean |cte| = {:.4}, max |cte| = {:.4})",
        vehicle,
        result.mean_abs_error(),
        result.max_abs_error()
    );

    write_csv(io::stdout().lock(), &result)
}

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
