use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};

use gap_tile_generator::{
    export_batches, BatchSource, RasterDataset, RemainderPolicy, SampleType, TileBatchProvider, TilingConfig,
};

#[derive(Parser, Debug)]
#[command(name = "gap-tiles", version = "0.1.0")]
struct Args {
    /// Directory with red.npy, green.npy, blue.npy, nir.npy, ndsm.npy and gap_mask.npy
    #[arg(long)]
    data_dir: PathBuf,

    /// Output directory; one subfolder per sample type is created below it
    #[arg(long, default_value = "./gap_tiles_output")]
    output_dir: PathBuf,

    /// Tile edge length in pixels
    #[arg(long, default_value = "256")]
    tile_size: usize,

    /// Sample types to export (repeat the flag for several)
    #[arg(long = "sample-type", value_enum, default_values_t = SampleType::ALL)]
    sample_types: Vec<SampleType>,

    /// Handling of rows/columns that do not fill a whole tile
    #[arg(long, value_enum, default_value_t = RemainderPolicy::Truncate)]
    remainder: RemainderPolicy,

    /// Share of each row-band's tiles held out for validation
    #[arg(long, default_value = "0.2")]
    val_fraction: f64,

    /// Seed of the train/validation split
    #[arg(long, default_value = "11")]
    split_seed: u64,

    /// Seed of the shuffle applied to augmented training tiles
    #[arg(long, default_value = "7")]
    shuffle_seed: u64,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

impl Args {
    fn tiling_config(&self) -> TilingConfig {
        TilingConfig {
            remainder: self.remainder,
            val_fraction: self.val_fraction,
            split_seed: self.split_seed,
            shuffle_seed: self.shuffle_seed,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .init();
    info!("=== gap-tiles start ===");

    let args = Args::parse();
    info!("Parsed command-line args: {:?}", args);

    let ds = RasterDataset::from_npy_dir(&args.data_dir)
        .with_context(|| format!("loading raster stack from {:?}", args.data_dir))?;

    let cfg = args.tiling_config();
    let mut failed = 0;
    for &sample_type in &args.sample_types {
        let provider = TileBatchProvider::new(&ds, args.tile_size, sample_type, cfg)
            .with_context(|| format!("building {} provider", sample_type))?;
        if provider.is_empty() {
            warn!("{} provider has no batches => skip", sample_type);
            continue;
        }

        let out_dir = args.output_dir.join(sample_type.as_str());
        match export_batches(&provider, &out_dir, !args.no_progress) {
            Ok(summary) => info!(
                "[{}] => {} batches, {} tiles in {:?}",
                sample_type, summary.batches_written, summary.tiles_written, summary.output_dir
            ),
            Err(e) => {
                error!("[{}] export failed: {:#}", sample_type, anyhow::Error::from(e));
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} exports failed", failed, args.sample_types.len());
    }
    info!("=== Done. Check {:?} for tiles. ===", args.output_dir);
    Ok(())
}
