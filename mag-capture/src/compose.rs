//! Virtual-desktop composition.

use crate::RgbaFrame;
use image::{imageops, Rgba, RgbaImage};
use mag_common::{Point, Size};
use tracing::trace;

/// Paste monitor images into a canvas covering `size` pixels at `origin`.
///
/// Each tile is placed at its virtual-desktop position relative to `origin` and clipped to
/// the canvas. Tiles are applied in order, so later tiles win where monitors overlap
/// (mirrored displays). Uncovered pixels are opaque black.
pub fn compose(origin: Point, size: Size, tiles: &[(Point, RgbaImage)]) -> RgbaFrame {
    let mut canvas = RgbaImage::from_pixel(size.width, size.height, Rgba([0, 0, 0, 255]));

    for (position, image) in tiles {
        let x = i64::from(position.x) - i64::from(origin.x);
        let y = i64::from(position.y) - i64::from(origin.y);
        trace!(
            "Placing {}x{} tile at canvas ({}, {})",
            image.width(),
            image.height(),
            x,
            y
        );
        imageops::replace(&mut canvas, image, x, y);
    }

    RgbaFrame::from(canvas)
}
