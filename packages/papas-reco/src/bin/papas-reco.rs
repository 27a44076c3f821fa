//! papas-reco: reconstruct particles from serialized blocks
//!
//! Usage:
//!   papas-reco --input event.json
//!   papas-reco --input events.json --config reco.yaml --json
//!   RUST_LOG=papas_reco=debug papas-reco --input event.json

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use papas_reco::pipeline::{load_config, reconstruct_events, EventInput};

#[derive(Parser, Debug)]
#[command(name = "papas-reco", about = "Particle-flow reconstruction of detector blocks")]
struct Args {
    /// Event JSON file (a single event or an array of events)
    #[arg(short, long)]
    input: PathBuf,

    /// Reconstruction config (YAML, version 1)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Skip provenance recording
    #[arg(long)]
    no_history: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = load_config(args.config.as_deref()).context("Failed to load config")?;
    if args.no_history {
        config = config.with_history(false);
    }

    let inputs = EventInput::many_from_json_file(&args.input)
        .with_context(|| format!("Failed to read events from {}", args.input.display()))?;

    let results = reconstruct_events(inputs, &config).context("Reconstruction failed")?;

    if args.json {
        let outputs: Vec<_> = results.iter().map(|r| &r.output).collect();
        println!("{}", serde_json::to_string_pretty(&outputs)?);
    } else {
        for (i, result) in results.iter().enumerate() {
            println!("Event {i}");
            println!("{}", result.output);
            for unhandled in &result.output.unhandled {
                println!("Unhandled: {unhandled}");
            }
        }
    }
    Ok(())
}
