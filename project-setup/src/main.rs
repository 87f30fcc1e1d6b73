use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use project_setup::{default_base_dir, make_folders};

#[derive(Parser, Debug)]
#[command(name = "project-setup", version = "0.1.0")]
struct Args {
    /// Base directory of the working environment (default: parent of the current directory)
    #[arg(long)]
    base_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .init();
    info!("=== project-setup start ===");

    let args = Args::parse();
    info!("Parsed command-line args: {:?}", args);

    let base_dir = match args.base_dir {
        Some(dir) => dir,
        None => default_base_dir()?,
    };
    info!("Setting up working environment under {:?}", base_dir);

    let paths = make_folders(&base_dir)
        .with_context(|| format!("setting up directory layout under {:?}", base_dir))?;

    println!("raw_data_dir       = {}", paths.raw_data_dir.display());
    println!("processed_data_dir = {}", paths.processed_data_dir.display());
    println!("output_dir         = {}", paths.output_dir.display());

    info!("=== Done. ===");
    Ok(())
}
