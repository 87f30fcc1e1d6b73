use log::debug;
use ndarray::{Array, ArrayView, Axis, Dimension};

use crate::tiling::Tile;

/// Rotates the plane spanned by the first two axes by `k` quarter turns,
/// counter-clockwise. Trailing axes (channels) are carried along untouched.
///
/// `out[i, j] = a[j, W-1-i]` for one turn.
pub fn rot90<A: Clone, D: Dimension>(a: ArrayView<A, D>, k: usize) -> Array<A, D> {
    let mut v = a;
    match k % 4 {
        1 => {
            v.swap_axes(0, 1);
            v.invert_axis(Axis(0));
        }
        2 => {
            v.invert_axis(Axis(0));
            v.invert_axis(Axis(1));
        }
        3 => {
            v.swap_axes(0, 1);
            v.invert_axis(Axis(1));
        }
        _ => {}
    }
    v.as_standard_layout().into_owned()
}

/// Appends the 90, 180 and 270 degree rotations of `tiles`, in that order,
/// after the originals.
pub fn augment_rotations(tiles: Vec<Tile>) -> Vec<Tile> {
    let n = tiles.len();
    let rotated: Vec<Tile> = (1..4)
        .flat_map(|k| tiles.iter().map(move |t| t.rotated(k)))
        .collect();

    let mut out = tiles;
    out.extend(rotated);
    debug!("augmented {} tiles => {}", n, out.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2, Array3};

    #[test]
    fn quarter_turn_is_counter_clockwise() {
        let a = array![[1, 2, 3], [4, 5, 6]];
        assert_eq!(rot90(a.view(), 1), array![[3, 6], [2, 5], [1, 4]]);
        assert_eq!(rot90(a.view(), 2), array![[6, 5, 4], [3, 2, 1]]);
        assert_eq!(rot90(a.view(), 3), array![[4, 1], [5, 2], [6, 3]]);
        assert_eq!(rot90(a.view(), 4), a);
    }

    #[test]
    fn channels_follow_the_pixel() {
        let img = Array3::from_shape_fn((2, 2, 3), |(y, x, c)| (y * 100 + x * 10 + c) as f32);
        let r = rot90(img.view(), 1);
        for c in 0..3 {
            // top-left after a CCW turn comes from top-right
            assert_eq!(r[(0, 0, c)], img[(0, 1, c)]);
            assert_eq!(r[(1, 0, c)], img[(0, 0, c)]);
        }
        assert!(r.is_standard_layout());
    }

    #[test]
    fn augmentation_quadruples_in_rotation_order() {
        let tiles: Vec<Tile> = (0..3)
            .map(|i| Tile {
                image: Array3::from_shape_fn((2, 2, 5), |(y, x, c)| (i * 1000 + y * 100 + x * 10 + c) as f32),
                mask: Array2::from_shape_fn((2, 2), |(y, x)| u8::from(y == 0 && x == i % 2)),
            })
            .collect();
        let out = augment_rotations(tiles.clone());

        assert_eq!(out.len(), 12);
        for k in 0..4 {
            for (i, src) in tiles.iter().enumerate() {
                let got = &out[k * tiles.len() + i];
                assert_eq!(got, &src.rotated(k));
                assert_eq!(got.mask, rot90(src.mask.view(), k));
            }
        }
    }
}
