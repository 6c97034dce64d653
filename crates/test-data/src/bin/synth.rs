//! Writes a synthetic GPX track to disk.
//!
//! Run with:
//! ```
//! cargo run -p test-data --bin synth -- --output hike.gpx --distance 8000
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use test_data::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Terrain {
    Flat,
    Hilly,
    Alpine,
}

#[derive(Parser, Debug)]
#[command(about = "Generate a synthetic GPX track")]
struct Args {
    /// Output GPX path
    #[arg(short, long, default_value = "synthetic.gpx")]
    output: PathBuf,

    /// Track length in meters
    #[arg(long, default_value_t = 5000.0)]
    distance: f64,

    /// Seed for path and terrain
    #[arg(long, default_value_t = 12345)]
    seed: u32,

    #[arg(long, value_enum, default_value_t = Terrain::Hilly)]
    terrain: Terrain,

    /// Probability that a point is written without elevation
    #[arg(long, default_value_t = 0.0)]
    gaps: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    anyhow::ensure!(
        (0.0..=1.0).contains(&args.gaps),
        "--gaps must be between 0 and 1"
    );

    let (region, elevation) = match args.terrain {
        Terrain::Flat => (Region::EQUATOR, ElevationGenerator::flat(args.seed)),
        Terrain::Hilly => (Region::BOULDER, ElevationGenerator::new(args.seed)),
        Terrain::Alpine => (Region::OBERLAND, ElevationGenerator::alpine(args.seed)),
    };

    let mut rng = StdRng::seed_from_u64(u64::from(args.seed));
    let points = TrackGenerator::for_region(region, args.seed)
        .with_distance(args.distance)
        .with_elevation(elevation)
        .with_elevation_gaps(args.gaps)
        .generate(&mut rng);

    std::fs::write(&args.output, generate_gpx(&points, "Synthetic track"))?;

    tracing::info!("Wrote {} points to {}", points.len(), args.output.display());
    Ok(())
}
