//! simevents main entry point.
//!
//! Runs the seeded demo scenario from [`simevents::scenario`] and reports
//! the events announced by the world and its bodies.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --steps 300 --json
//! RUST_LOG=debug cargo run -- --config ./simevents.ini
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::warn;

use simevents::resources::simconfig::SimConfig;
use simevents::scenario;

/// simevents
#[derive(Parser)]
#[command(
    version,
    about = "Runs a seeded rigid-body scenario and reports the events it emits."
)]
struct Cli {
    /// Path to the INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./simevents.ini")]
    config: PathBuf,

    /// Number of steps to run (overrides the config file).
    #[arg(long)]
    steps: Option<u32>,

    /// Random seed (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,

    /// Number of bodies (overrides the config file).
    #[arg(long)]
    bodies: Option<u32>,

    /// Print every event as a JSON line instead of a summary.
    #[arg(long)]
    json: bool,

    /// Write the effective configuration to PATH and exit.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = SimConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{e}; using defaults");
    }
    if let Some(steps) = cli.steps {
        config.steps = steps;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(bodies) = cli.bodies {
        config.bodies = bodies;
    }

    // Early-exit: write config and quit
    if let Some(path) = cli.write_config {
        config.config_path = path;
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Config written to {}", config.config_path.display());
        return;
    }

    let trace = scenario::run(&config);

    if cli.json {
        for record in &trace {
            match serde_json::to_string(record) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    eprintln!("Error serializing trace: {e}");
                    std::process::exit(1);
                }
            }
        }
    } else {
        for (event, count) in scenario::summarize(&trace) {
            println!("{:<18} {}", event.as_str(), count);
        }
    }
}
