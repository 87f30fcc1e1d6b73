use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading rasters, tiling them or writing batches.
#[derive(Debug, Error)]
pub enum TileError {
    #[error("unsupported sample type {0:?} (expected training, validation or test)")]
    UnsupportedSampleType(String),

    #[error("tile size must be at least 1 pixel")]
    InvalidTileSize,

    #[error("tile size {tile_size} exceeds raster extent {height}x{width}")]
    TileLargerThanRaster {
        tile_size: usize,
        height: usize,
        width: usize,
    },

    #[error("{axis} extent {extent} is not a multiple of tile size {tile_size}")]
    UnevenExtent {
        axis: &'static str,
        extent: usize,
        tile_size: usize,
    },

    #[error("band `{band}` has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        band: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("validation fraction must lie strictly between 0 and 1, got {0}")]
    InvalidValFraction(f64),

    #[error("splitting {tiles} tiles per row-band with validation fraction {val_fraction} leaves an empty subset")]
    SplitTooSmall { tiles: usize, val_fraction: f64 },

    #[error("batch index {index} out of range (batches={len})")]
    BatchIndexOutOfRange { index: usize, len: usize },

    #[error("failed to read {path:?}")]
    ReadNpy {
        path: PathBuf,
        #[source]
        source: ndarray_npy::ReadNpyError,
    },

    #[error("failed to write {path:?}")]
    WriteNpy {
        path: PathBuf,
        #[source]
        source: ndarray_npy::WriteNpyError,
    },

    #[error("I/O error at {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

pub type Result<T> = std::result::Result<T, TileError>;
