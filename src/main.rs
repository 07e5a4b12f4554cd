//! Breeding Simulation - Entry Point
//!
//! Runs a seeded herd of one species through the breeding engine and prints
//! a JSON summary of courtships, pairings and offspring.

use std::path::PathBuf;

use breeding_engine::core::error::Result;
use breeding_engine::core::species::load_species_configs;
use breeding_engine::simulation::{run_herd, HerdParams};
use clap::Parser;

/// Headless breeding simulation
#[derive(Parser, Debug)]
#[command(name = "breeding_sim")]
#[command(about = "Simulate courtship, pairing and offspring for a species preset")]
struct Args {
    /// Species preset (wolf, parrot, deer, cow, or any file in --config-dir)
    #[arg(long, default_value = "wolf")]
    species: String,

    /// Number of organisms at start (alternating male/female)
    #[arg(long, default_value_t = 20)]
    population: usize,

    /// Ticks to simulate (24000 per day)
    #[arg(long, default_value_t = 48_000)]
    ticks: u64,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Directory of <species>.toml breeding configs
    #[arg(long, default_value = "data/breeding")]
    config_dir: PathBuf,

    /// Start at world time zero instead of the season opening
    #[arg(long)]
    from_year_start: bool,

    /// Pretty-print the JSON summary
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("breeding_engine=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let registry = load_species_configs(&args.config_dir)?;
    let config = registry.get_or_default(&args.species);
    config.validate()?;

    let params = HerdParams {
        species: args.species,
        population: args.population,
        ticks: args.ticks,
        seed,
        start_in_season: !args.from_year_start,
        ..HerdParams::default()
    };

    let summary = run_herd(config, &params);
    let json = if args.pretty {
        serde_json::to_string_pretty(&summary)
    } else {
        serde_json::to_string(&summary)
    };
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize summary: {}", e),
    }

    Ok(())
}
