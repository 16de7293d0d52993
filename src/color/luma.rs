//! Fixed-point BT.601 luma.
use crate::image::{ChannelPlane, RasterView};
use crate::parallel;

/// 8-bit luma of an RGBA pixel. Samples are widened to 16 bits and weighted
/// with `19595/38470/7471` (sum 65536), rounding to nearest.
#[inline]
pub fn luma_u8(rgba: [u8; 4]) -> u8 {
    let widen = |v: u8| v as u32 * 257;
    let y = 19595 * widen(rgba[0]) + 38470 * widen(rgba[1]) + 7471 * widen(rgba[2]) + (1 << 15);
    (y >> 24) as u8
}

/// Luma plane of `raster`, one task per row.
pub fn grayscale_plane(raster: RasterView<'_>) -> ChannelPlane {
    let mut plane = ChannelPlane::new(raster.w, raster.h);
    parallel::for_each_row(&mut plane.data, raster.w, |y, row| {
        let src = raster.row_bytes(y);
        for (dst, px) in row.iter_mut().zip(src.chunks_exact(4)) {
            *dst = luma_u8([px[0], px[1], px[2], px[3]]) as f64;
        }
    });
    plane
}
