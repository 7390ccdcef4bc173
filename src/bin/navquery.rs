//! Facility route query CLI.
//!
//! Loads a facility description, builds the engine, resolves one
//! free-text query and prints the formatted response.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use campus_nav::{FacilityData, NavEngine, NavOptions};

#[derive(Parser)]
#[command(
    name = "navquery",
    about = "Resolve a free-text campus navigation query"
)]
struct Args {
    /// Facility description file (.json, .yaml or .yml)
    #[arg(long, default_value = "config/facility.json")]
    facility: PathBuf,

    /// Starting location hint (defaults to the facility's origin)
    #[arg(long)]
    from: Option<String>,

    /// Route without stair connectors (step-free paths only)
    #[arg(long)]
    accessible: bool,

    /// The free-text query, e.g. "how do I get to the library?"
    #[arg(required = true)]
    query: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let data = FacilityData::load(&args.facility)
        .with_context(|| format!("loading facility data from {}", args.facility.display()))?;

    let engine = NavEngine::new(
        data,
        NavOptions {
            accessibility_mode: args.accessible,
            ..NavOptions::default()
        },
    )
    .context("building navigation engine")?;

    let query = args.query.join(" ");
    let response = engine.handle_query(&query, args.from.as_deref());
    println!("{}", response.message);

    Ok(())
}
