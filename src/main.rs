/*
 * Boid School
 *
 * A school of boids steering by separation, cohesion, alignment and
 * edge avoidance, swimming through a field of rising bubbles.
 *
 * Parameters come from the defaults, an optional JSON file and a few
 * command line overrides, and can be tuned live from the UI panel.
 * Set RUST_LOG (e.g. RUST_LOG=boid_school=debug) for logging.
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use boid_school::{app, SimulationParams};
use clap::Parser;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "boid_school", about = "Boid schooling simulation with ambient bubbles")]
struct Args {
    /// JSON file with simulation parameters; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of boids at start-up
    #[arg(long)]
    boids: Option<usize>,

    /// Number of bubbles at start-up
    #[arg(long)]
    bubbles: Option<usize>,

    /// Simulation ticks per second
    #[arg(long)]
    fps: Option<f32>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut params = match &args.config {
        Some(path) => SimulationParams::load(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => SimulationParams::default(),
    };
    if let Some(boids) = args.boids {
        params.num_boids = boids;
    }
    if let Some(bubbles) = args.bubbles {
        params.num_bubbles = bubbles;
    }
    if let Some(fps) = args.fps {
        params.target_fps = fps;
    }
    params.validate().context("invalid command line parameters")?;

    info!(
        boids = params.num_boids,
        bubbles = params.num_bubbles,
        fps = params.target_fps,
        "starting boid school"
    );
    app::run(params);
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
