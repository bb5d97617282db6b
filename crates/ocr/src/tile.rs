use image::{imageops, RgbImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TileError {
    #[error("Tile counts must be at least 1×1 (got {horizontal}×{vertical})")]
    InvalidGrid { horizontal: u32, vertical: u32 },
    #[error("Tiled dimensions overflow: {0}")]
    DimensionOverflow(String),
}

/// How many copies of an image to lay out along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    pub horizontal: u32,
    pub vertical: u32,
}

impl TileGrid {
    pub fn new(horizontal: u32, vertical: u32) -> Self {
        Self { horizontal, vertical }
    }
}

/// 5×5: enough content for script detection on typical snippet-sized images;
/// callers tune it freely.
impl Default for TileGrid {
    fn default() -> Self {
        TileGrid::new(5, 5)
    }
}

/// Replicate `img` `count` times along the horizontal axis.
///
/// Panics if the resulting width overflows `u32`; [`tile`] is the checked
/// entry point.
pub fn hconcat(img: &RgbImage, count: u32) -> RgbImage {
    let (w, h) = img.dimensions();
    let tiled_w = w.checked_mul(count).expect("tiled width overflows u32");
    let mut out = RgbImage::new(tiled_w, h);
    for i in 0..count {
        imageops::replace(&mut out, img, i64::from(i * w), 0);
    }
    out
}

/// Replicate `img` `count` times along the vertical axis.
///
/// Panics if the resulting height overflows `u32`; [`tile`] is the checked
/// entry point.
pub fn vconcat(img: &RgbImage, count: u32) -> RgbImage {
    let (w, h) = img.dimensions();
    let tiled_h = h.checked_mul(count).expect("tiled height overflows u32");
    let mut out = RgbImage::new(w, tiled_h);
    for i in 0..count {
        imageops::replace(&mut out, img, 0, i64::from(i * h));
    }
    out
}

/// Replicate `img` across `grid`: copies are concatenated into a row strip,
/// then strips are stacked. Pure replication, so every output pixel equals
/// the source pixel at the modulo coordinate and the result is pixel-identical
/// to laying the copies out on the grid directly.
pub fn tile(img: &RgbImage, grid: TileGrid) -> Result<RgbImage, TileError> {
    if grid.horizontal == 0 || grid.vertical == 0 {
        return Err(TileError::InvalidGrid {
            horizontal: grid.horizontal,
            vertical: grid.vertical,
        });
    }

    let (w, h) = img.dimensions();
    if w.checked_mul(grid.horizontal).is_none() || h.checked_mul(grid.vertical).is_none() {
        return Err(TileError::DimensionOverflow(format!(
            "{w}×{h} image tiled {}×{} exceeds u32 dimensions",
            grid.horizontal, grid.vertical
        )));
    }

    let strip = hconcat(img, grid.horizontal);
    Ok(vconcat(&strip, grid.vertical))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    /// Every pixel carries its own coordinates, so misplaced copies show up.
    fn patterned(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([x as u8, y as u8, (x ^ y) as u8])
        })
    }

    #[test]
    fn tile_multiplies_dimensions() {
        let img = patterned(10, 10);
        let composite = tile(&img, TileGrid::new(5, 5)).unwrap();
        assert_eq!(composite.dimensions(), (50, 50));
    }

    #[test]
    fn tile_repeats_pixels_with_modulo() {
        let img = patterned(4, 3);
        let composite = tile(&img, TileGrid::new(3, 2)).unwrap();
        assert_eq!(composite.dimensions(), (12, 6));
        for y in 0..6 {
            for x in 0..12 {
                assert_eq!(
                    composite.get_pixel(x, y),
                    img.get_pixel(x % 4, y % 3),
                    "mismatch at ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn two_pass_construction_equals_direct_grid() {
        let img = patterned(7, 5);
        let composite = tile(&img, TileGrid::new(2, 4)).unwrap();
        let direct =
            RgbImage::from_fn(14, 20, |x, y| *img.get_pixel(x % 7, y % 5));
        assert_eq!(composite.as_raw(), direct.as_raw());
    }

    #[test]
    fn identity_grid_is_pixel_identical() {
        let img = patterned(9, 6);
        let composite = tile(&img, TileGrid::new(1, 1)).unwrap();
        assert_eq!(composite.as_raw(), img.as_raw());
    }

    #[test]
    fn hconcat_grows_width_only() {
        let img = patterned(3, 8);
        let strip = hconcat(&img, 4);
        assert_eq!(strip.dimensions(), (12, 8));
        assert_eq!(strip.get_pixel(5, 7), img.get_pixel(2, 7));
    }

    #[test]
    fn vconcat_grows_height_only() {
        let img = patterned(8, 3);
        let stack = vconcat(&img, 4);
        assert_eq!(stack.dimensions(), (8, 12));
        assert_eq!(stack.get_pixel(7, 5), img.get_pixel(7, 2));
    }

    #[test]
    fn zero_horizontal_count_is_rejected() {
        let img = patterned(10, 10);
        let err = tile(&img, TileGrid::new(0, 3)).unwrap_err();
        assert!(matches!(
            err,
            TileError::InvalidGrid { horizontal: 0, vertical: 3 }
        ));
    }

    #[test]
    fn zero_vertical_count_is_rejected() {
        let img = patterned(10, 10);
        assert!(matches!(
            tile(&img, TileGrid::new(2, 0)),
            Err(TileError::InvalidGrid { .. })
        ));
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let img = patterned(2, 2);
        assert!(matches!(
            tile(&img, TileGrid::new(u32::MAX, 1)),
            Err(TileError::DimensionOverflow(_))
        ));
    }

    #[test]
    fn default_grid_is_five_by_five() {
        assert_eq!(TileGrid::default(), TileGrid::new(5, 5));
    }
}
