//! In-memory raster stack: four spectral bands, the nDSM height layer and the
//! binary gap mask, all sharing one pixel grid.

use std::path::Path;

use log::{debug, info};
use ndarray::Array2;
use ndarray_npy::{read_npy, ReadableElement};

use crate::error::{Result, TileError};

/// Channel order of every image tile.
pub const CHANNEL_NAMES: [&str; 5] = ["red", "green", "blue", "nir", "ndsm"];
pub const MASK_NAME: &str = "gap_mask";

#[derive(Debug, Clone)]
pub struct RasterDataset {
    red: Array2<f32>,
    green: Array2<f32>,
    blue: Array2<f32>,
    nir: Array2<f32>,
    ndsm: Array2<f32>,
    gap_mask: Array2<u8>,
}

impl RasterDataset {
    /// Checks that every layer shares the red band's extent and forces the
    /// mask to 0/1.
    pub fn new(
        red: Array2<f32>,
        green: Array2<f32>,
        blue: Array2<f32>,
        nir: Array2<f32>,
        ndsm: Array2<f32>,
        gap_mask: Array2<u8>,
    ) -> Result<Self> {
        let expected = red.dim();
        let others = [
            ("green", green.dim()),
            ("blue", blue.dim()),
            ("nir", nir.dim()),
            ("ndsm", ndsm.dim()),
            (MASK_NAME, gap_mask.dim()),
        ];
        for (band, found) in others {
            if found != expected {
                return Err(TileError::ShapeMismatch { band, expected, found });
            }
        }

        let gap_mask = gap_mask.mapv(|v| u8::from(v != 0));

        Ok(RasterDataset { red, green, blue, nir, ndsm, gap_mask })
    }

    /// Loads `red.npy`, `green.npy`, `blue.npy`, `nir.npy`, `ndsm.npy` (f32)
    /// and `gap_mask.npy` (u8) from `dir`.
    pub fn from_npy_dir(dir: &Path) -> Result<Self> {
        info!("Loading raster layers from {:?}", dir);
        let red = read_layer::<f32>(dir, "red")?;
        let green = read_layer::<f32>(dir, "green")?;
        let blue = read_layer::<f32>(dir, "blue")?;
        let nir = read_layer::<f32>(dir, "nir")?;
        let ndsm = read_layer::<f32>(dir, "ndsm")?;
        let gap_mask = read_layer::<u8>(dir, MASK_NAME)?;

        let ds = RasterDataset::new(red, green, blue, nir, ndsm, gap_mask)?;
        info!("Loaded raster stack, y.size={}, x.size={}", ds.height(), ds.width());
        Ok(ds)
    }

    /// Row count (`y.size`).
    pub fn height(&self) -> usize {
        self.red.nrows()
    }

    /// Column count (`x.size`).
    pub fn width(&self) -> usize {
        self.red.ncols()
    }

    /// Image channels in [`CHANNEL_NAMES`] order.
    pub fn channels(&self) -> [&Array2<f32>; 5] {
        [&self.red, &self.green, &self.blue, &self.nir, &self.ndsm]
    }

    pub fn gap_mask(&self) -> &Array2<u8> {
        &self.gap_mask
    }
}

fn read_layer<A: ReadableElement>(dir: &Path, name: &str) -> Result<Array2<A>> {
    let path = dir.join(format!("{}.npy", name));
    let arr: Array2<A> = read_npy(&path).map_err(|source| TileError::ReadNpy {
        path: path.clone(),
        source,
    })?;
    debug!("read {:?}, shape={:?}", path, arr.dim());
    Ok(arr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(h: usize, w: usize) -> Array2<f32> {
        Array2::zeros((h, w))
    }

    #[test]
    fn mismatched_band_is_named() {
        let err = RasterDataset::new(
            layer(4, 6),
            layer(4, 6),
            layer(4, 5),
            layer(4, 6),
            layer(4, 6),
            Array2::zeros((4, 6)),
        )
        .unwrap_err();
        match err {
            TileError::ShapeMismatch { band, expected, found } => {
                assert_eq!(band, "blue");
                assert_eq!(expected, (4, 6));
                assert_eq!(found, (4, 5));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn mask_is_binarized() {
        let mask = Array2::from_shape_vec((2, 2), vec![0u8, 3, 255, 1]).unwrap();
        let ds = RasterDataset::new(layer(2, 2), layer(2, 2), layer(2, 2), layer(2, 2), layer(2, 2), mask)
            .unwrap();
        assert_eq!(ds.gap_mask().iter().copied().collect::<Vec<_>>(), vec![0, 1, 1, 1]);
        assert_eq!((ds.height(), ds.width()), (2, 2));
    }
}
