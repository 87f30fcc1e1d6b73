//! Row-band batch provider.
//!
//! Batch `i` holds the tiles of raster rows `[i*T, (i+1)*T)`. Depending on the
//! sample type the tiles are returned whole (test), as the held-out part of a
//! seeded split (validation), or as the training part of that split expanded
//! with rotations and reshuffled (training).

use log::{debug, info, warn};
use ndarray::{stack, Array3, Array4, ArrayView2, ArrayView3, Axis};

use crate::augment::augment_rotations;
use crate::config::{RemainderPolicy, SampleType, TilingConfig};
use crate::error::{Result, TileError};
use crate::raster::{RasterDataset, CHANNEL_NAMES};
use crate::split::{apply_permutation, permutation, split_counts, train_val_split};
use crate::tiling::{crop_row_band, partition_columns, Tile};

/// Length plus indexed fetch, the interface a training loop pulls batches
/// through.
pub trait BatchSource {
    /// Number of batches.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Result<Batch>;
}

/// Tiles stacked along a leading sample axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// shape=(n, T, T, 5)
    pub images: Array4<f32>,
    /// shape=(n, T, T)
    pub masks: Array3<u8>,
}

impl Batch {
    pub fn from_tiles(tiles: &[Tile], tile_size: usize) -> Result<Batch> {
        if tiles.is_empty() {
            return Ok(Batch {
                images: Array4::zeros((0, tile_size, tile_size, CHANNEL_NAMES.len())),
                masks: Array3::zeros((0, tile_size, tile_size)),
            });
        }
        let images: Vec<ArrayView3<f32>> = tiles.iter().map(|t| t.image.view()).collect();
        let masks: Vec<ArrayView2<u8>> = tiles.iter().map(|t| t.mask.view()).collect();
        Ok(Batch {
            images: stack(Axis(0), &images)?,
            masks: stack(Axis(0), &masks)?,
        })
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.images.len_of(Axis(0))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn tile(&self, i: usize) -> Option<Tile> {
        if i >= self.len() {
            return None;
        }
        Some(Tile {
            image: self.images.index_axis(Axis(0), i).to_owned(),
            mask: self.masks.index_axis(Axis(0), i).to_owned(),
        })
    }
}

pub struct TileBatchProvider<'a> {
    dataset: &'a RasterDataset,
    tile_size: usize,
    sample_type: SampleType,
    config: TilingConfig,
    /// Row-bands, i.e. batches.
    ylen: usize,
    /// Tiles per row-band before any split.
    xlen: usize,
}

impl<'a> TileBatchProvider<'a> {
    pub fn new(
        dataset: &'a RasterDataset,
        tile_size: usize,
        sample_type: SampleType,
        config: TilingConfig,
    ) -> Result<Self> {
        let (height, width) = (dataset.height(), dataset.width());

        if tile_size == 0 {
            return Err(TileError::InvalidTileSize);
        }
        if tile_size > height.min(width) {
            return Err(TileError::TileLargerThanRaster { tile_size, height, width });
        }
        if !(config.val_fraction > 0.0 && config.val_fraction < 1.0) {
            return Err(TileError::InvalidValFraction(config.val_fraction));
        }

        let (row_rem, col_rem) = (height % tile_size, width % tile_size);
        match config.remainder {
            RemainderPolicy::Reject if row_rem != 0 => {
                return Err(TileError::UnevenExtent { axis: "y", extent: height, tile_size });
            }
            RemainderPolicy::Reject if col_rem != 0 => {
                return Err(TileError::UnevenExtent { axis: "x", extent: width, tile_size });
            }
            _ => {}
        }
        if row_rem != 0 || col_rem != 0 {
            warn!(
                "tile_size={} does not divide {}x{} => dropping {} trailing rows and {} trailing columns",
                tile_size, height, width, row_rem, col_rem
            );
        }

        let ylen = height / tile_size;
        let xlen = width / tile_size;

        if sample_type.is_split() {
            let (n_train, n_val) = split_counts(xlen, config.val_fraction);
            if n_train == 0 || n_val == 0 {
                return Err(TileError::SplitTooSmall { tiles: xlen, val_fraction: config.val_fraction });
            }
        }

        info!(
            "{} provider: tile_size={}, {} batches x {} tiles per row-band",
            sample_type, tile_size, ylen, xlen
        );

        Ok(TileBatchProvider { dataset, tile_size, sample_type, config, ylen, xlen })
    }

    pub fn tile_size(&self) -> usize {
        self.tile_size
    }

    pub fn sample_type(&self) -> SampleType {
        self.sample_type
    }

    pub fn config(&self) -> &TilingConfig {
        &self.config
    }

    /// Tiles in one row-band before splitting (`x.size / T`).
    pub fn tiles_per_band(&self) -> usize {
        self.xlen
    }

    /// Tiles each call to [`BatchSource::get`] returns.
    pub fn tiles_per_batch(&self) -> usize {
        let (n_train, n_val) = split_counts(self.xlen, self.config.val_fraction);
        match self.sample_type {
            SampleType::Training => n_train * 4,
            SampleType::Validation => n_val,
            SampleType::Test => self.xlen,
        }
    }

    /// Every tile of row-band `index`, in column order, unsplit.
    pub fn band_tiles(&self, index: usize) -> Result<Vec<Tile>> {
        if index >= self.ylen {
            return Err(TileError::BatchIndexOutOfRange { index, len: self.ylen });
        }
        let (stacked, mask) = crop_row_band(self.dataset, index, self.tile_size, self.xlen)?;
        Ok(partition_columns(&stacked, &mask, self.tile_size, self.xlen))
    }

    fn select(&self, tiles: Vec<Tile>) -> Vec<Tile> {
        match self.sample_type {
            SampleType::Test => tiles,
            SampleType::Validation => {
                let (_, val) = train_val_split(tiles, self.config.val_fraction, self.config.split_seed);
                val
            }
            SampleType::Training => {
                let (train, _) = train_val_split(tiles, self.config.val_fraction, self.config.split_seed);
                let augmented = augment_rotations(train);
                let perm = permutation(augmented.len(), self.config.shuffle_seed);
                apply_permutation(augmented, &perm)
            }
        }
    }
}

impl BatchSource for TileBatchProvider<'_> {
    fn len(&self) -> usize {
        self.ylen
    }

    fn get(&self, index: usize) -> Result<Batch> {
        let tiles = self.band_tiles(index)?;
        let selected = self.select(tiles);
        debug!("{} batch #{} => {} tiles", self.sample_type, index, selected.len());
        Batch::from_tiles(&selected, self.tile_size)
    }
}
