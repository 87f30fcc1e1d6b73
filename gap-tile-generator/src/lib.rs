//! Tiles co-registered RGBI + nDSM rasters and their canopy-gap mask into
//! fixed-size patches, grouped into one batch per row-band.
//!
//! ```no_run
//! use gap_tile_generator::{BatchSource, RasterDataset, SampleType, TileBatchProvider, TilingConfig};
//!
//! # fn main() -> Result<(), gap_tile_generator::TileError> {
//! let ds = RasterDataset::from_npy_dir(std::path::Path::new("data/processed_data/datasets/site_a"))?;
//! let train = TileBatchProvider::new(&ds, 256, SampleType::Training, TilingConfig::default())?;
//! for i in 0..train.len() {
//!     let batch = train.get(i)?;
//!     println!("batch {i}: images {:?}, masks {:?}", batch.images.dim(), batch.masks.dim());
//! }
//! # Ok(())
//! # }
//! ```

pub mod augment;
pub mod config;
pub mod error;
pub mod export;
pub mod provider;
pub mod raster;
pub mod split;
pub mod tiling;

pub use config::{RemainderPolicy, SampleType, TilingConfig};
pub use error::{Result, TileError};
pub use export::{export_batches, ExportSummary};
pub use provider::{Batch, BatchSource, TileBatchProvider};
pub use raster::RasterDataset;
pub use tiling::Tile;
