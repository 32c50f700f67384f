mod cluster;
mod config;
mod coverage;
mod export;
mod map;
mod pipeline;
mod reading;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::export::LayerWriter;
use crate::pipeline::Pipeline;
use crate::reading::Summary;

#[derive(Parser)]
#[command(name = "lora-coverage")]
#[command(about = "Radio coverage maps from geotagged LoRaWAN uplink logs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an uplink log and summarise it
    Validate { log: PathBuf },
    /// Cluster readings and write the coverage maps
    Run {
        log: PathBuf,
        /// YAML configuration file
        #[arg(short, long)]
        config: Option<String>,
        /// Output directory (overrides the configuration)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Clustering radius in meters
        #[arg(long)]
        radius_m: Option<f64>,
        /// Readings within the radius needed to form a cluster
        #[arg(long)]
        min_points: Option<usize>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { log } => validate(&log),
        Commands::Run {
            log,
            config,
            out,
            radius_m,
            min_points,
        } => {
            let mut config = match config.as_deref().map(Config::from_file).transpose() {
                Ok(c) => c.unwrap_or_default(),
                Err(e) => {
                    eprintln!("Config error: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            if let Some(dir) = out {
                config.output.dir = dir;
            }
            if let Some(radius_m) = radius_m {
                config.clustering.radius_m = radius_m;
            }
            if let Some(min_points) = min_points {
                config.clustering.min_points = min_points;
            }
            run(&log, &config)
        }
    }
}

fn validate(path: &Path) -> ExitCode {
    let readings = match reading::load_log(path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let summary = Summary::of(&readings);
    println!(
        "Log is valid ({} readings from {} devices, {} gateways)",
        summary.readings, summary.devices, summary.gateways
    );
    for config in &summary.radio_configs {
        println!("  data rate: {}", config);
    }
    if let (Some(first), Some(last)) = (summary.first_seen, summary.last_seen) {
        println!("  from {} to {}", first, last);
    }
    ExitCode::SUCCESS
}

fn run(path: &Path, config: &Config) -> ExitCode {
    let readings = match reading::load_log(path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let pipeline = Pipeline {
        radius_m: config.clustering.radius_m,
        min_points: config.clustering.min_points,
    };
    let writer = LayerWriter::new(config.output.dir.clone());

    match pipeline.run(&readings).and_then(|layers| Ok(layers.write(&writer)?)) {
        Ok(written) => {
            println!(
                "Wrote {} layers to {}",
                written.len(),
                config.output.dir.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
