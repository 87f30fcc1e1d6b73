use ndarray::{s, stack, Array2, Array3, ArrayView2, Axis};

use crate::augment::rot90;
use crate::error::Result;
use crate::raster::RasterDataset;

/// One image window `(T, T, 5)` and the mask window `(T, T)` it is paired with.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub image: Array3<f32>,
    pub mask: Array2<u8>,
}

impl Tile {
    /// Rotates image and mask together by `k` quarter turns, counter-clockwise.
    pub fn rotated(&self, k: usize) -> Tile {
        Tile {
            image: rot90(self.image.view(), k),
            mask: rot90(self.mask.view(), k),
        }
    }

    pub fn size(&self) -> usize {
        self.mask.nrows()
    }
}

/// Crops row-band `band` to whole tiles and stacks the channels last.
///
/// Returns the `(T, xlen*T, 5)` channel stack and the `(T, xlen*T)` mask.
pub fn crop_row_band(
    ds: &RasterDataset,
    band: usize,
    tile_size: usize,
    xlen: usize,
) -> Result<(Array3<f32>, Array2<u8>)> {
    let row0 = band * tile_size;
    let row1 = row0 + tile_size;
    let cols = xlen * tile_size;

    let views: Vec<ArrayView2<f32>> = ds
        .channels()
        .into_iter()
        .map(|ch| ch.slice(s![row0..row1, ..cols]))
        .collect();
    let stacked = stack(Axis(2), &views)?;
    let mask = ds.gap_mask().slice(s![row0..row1, ..cols]).to_owned();

    Ok((stacked, mask))
}

/// Splits a row-band into `xlen` equal-width tiles along the column axis.
pub fn partition_columns(stacked: &Array3<f32>, mask: &Array2<u8>, tile_size: usize, xlen: usize) -> Vec<Tile> {
    (0..xlen)
        .map(|j| {
            let c0 = j * tile_size;
            let c1 = c0 + tile_size;
            Tile {
                image: stacked.slice(s![.., c0..c1, ..]).to_owned(),
                mask: mask.slice(s![.., c0..c1]).to_owned(),
            }
        })
        .collect()
}
