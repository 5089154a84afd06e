//! Command-line point generator.
//!
//! Fills a rectangle with spaced points and prints them to stdout as JSON or
//! CSV. Logs go to stderr.

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use eventspacer::config::DEFAULT_MAX_POINTS;
use eventspacer::spacer::{generate, validate_request};
use eventspacer::{Coordinate, Rectangle};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "space")]
#[command(about = "Fill a rectangle with evenly spaced points")]
struct Args {
    /// North-west corner as "lat,lng"
    #[arg(long, allow_hyphen_values = true)]
    nw: Coordinate,

    /// South-east corner as "lat,lng"
    #[arg(long, allow_hyphen_values = true)]
    se: Coordinate,

    /// Distance between neighbouring points in meters
    #[arg(short, long)]
    spacing: f64,

    /// Maximum number of points, center included
    #[arg(long, default_value_t = DEFAULT_MAX_POINTS)]
    max_points: usize,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: Format,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let rectangle = Rectangle::new(args.nw, args.se);
    validate_request(&rectangle, args.spacing, args.max_points)?;

    info!(
        "Spacing {} to {} at {} m (cap {})",
        args.nw, args.se, args.spacing, args.max_points
    );

    let points = generate(args.nw, args.se, args.spacing, args.max_points);
    info!("Generated {} points", points.len());

    let stdout = io::stdout().lock();
    match args.format {
        Format::Json => {
            serde_json::to_writer_pretty(stdout, &points).context("Failed to write JSON")?;
            println!();
        }
        Format::Csv => {
            let mut writer = csv::Writer::from_writer(stdout);
            for point in &points {
                writer.serialize(point).context("Failed to write CSV row")?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}
