extern crate log;
pub mod config;
pub mod error;
pub mod export;
pub mod kml;
pub mod normalize;
pub mod pipeline;
use crate::config::Config;
use crate::normalize::ValidationRules;
use anyhow::anyhow;
use clap::Parser;
use std::{fs::read_to_string, path::Path};

/// Convert a municipal hydrant KML file to CSV and GeoJSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input config file.
    #[arg(short, long)]
    config_filepath: String,
}

fn try_main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }

    let args = Args::try_parse()?;
    if !Path::new(&args.config_filepath).exists() {
        return Err(anyhow!("Config file {} not found", &args.config_filepath));
    }
    let config_contents = read_to_string(args.config_filepath)?;
    let config: Config = serde_yaml::from_str(&config_contents)?;

    pipeline::run(&config, &ValidationRules::default())
}

fn main() {
    env_logger::init();
    if let Err(e) = try_main() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}
