//! Interior-only Sobel magnitude with mutex-guarded moment accumulation.
//!
//! Complexity: O(W·H) per pass; memory: one f64 luma plane and one byte per
//! pixel for the gradient map.
use crate::color::grayscale_plane;
use crate::config::MetricsConfig;
use crate::diagnostics::{StageClock, TimingBreakdown};
use crate::error::Result;
use crate::image::{ChannelPlane, GrayImageU8, ImageView, RasterView};
use crate::parallel;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

type Kernel3 = [[i32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_KERNEL_Y: Kernel3 = [[1, 2, 1], [0, 0, 0], [-1, -2, -1]];

/// Half the kernel size; rows and columns closer than this to the border are
/// not processed.
const HALF_KERNEL: usize = 1;

/// Running first and second moments of the integer gradient magnitude.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientStats {
    pub sum: i64,
    pub sum_squares: i64,
}

impl GradientStats {
    #[inline]
    fn add(&mut self, magnitude: i64) {
        self.sum += magnitude;
        self.sum_squares += magnitude * magnitude;
    }

    fn merge(&mut self, other: &GradientStats) {
        self.sum += other.sum;
        self.sum_squares += other.sum_squares;
    }

    /// `sum / pixel_count`.
    pub fn mean(&self, pixel_count: usize) -> f64 {
        self.sum as f64 / pixel_count as f64
    }

    /// `sqrt(sum_squares / pixel_count)`.
    pub fn rms(&self, pixel_count: usize) -> f64 {
        (self.sum_squares as f64 / pixel_count as f64).sqrt()
    }
}

/// How magnitudes above 255 are stored in the 8-bit gradient map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Clamp to 255.
    #[default]
    Saturate,
    /// Keep the low byte (modulo 256).
    Wrap,
}

impl OverflowPolicy {
    #[inline]
    pub fn to_u8(self, magnitude: i64) -> u8 {
        match self {
            OverflowPolicy::Saturate => magnitude.clamp(0, 255) as u8,
            OverflowPolicy::Wrap => magnitude as u8,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GradientOptions {
    pub overflow: OverflowPolicy,
}

/// Outcome of one SI run.
#[derive(Clone, Debug)]
pub struct SpatialInfo {
    pub width: usize,
    pub height: usize,
    pub stats: GradientStats,
    /// `stats.sum / (W·H)`
    pub mean: f64,
    /// `sqrt(stats.sum_squares / (W·H))`
    pub rms: f64,
    /// Per-pixel magnitude, zero on the one-pixel border.
    pub gradient_map: GrayImageU8,
    /// Stage timings, collected in verbose mode only.
    pub timings: Option<TimingBreakdown>,
}

/// Sobel magnitude at an interior pixel, truncated toward zero.
///
/// Callers guarantee `1 <= x < w - 1` and `1 <= y < h - 1`.
#[inline]
pub fn sobel_magnitude_at(gray: &ChannelPlane, x: usize, y: usize) -> i64 {
    let rows = [gray.row(y - 1), gray.row(y), gray.row(y + 1)];
    let mut sum_x = 0.0f64;
    let mut sum_y = 0.0f64;
    for (ky, row) in rows.iter().enumerate() {
        let kx_row = &SOBEL_KERNEL_X[ky];
        let ky_row = &SOBEL_KERNEL_Y[ky];
        for k in 0..3 {
            let sample = row[x + k - HALF_KERNEL];
            sum_x += sample * kx_row[k] as f64;
            sum_y += sample * ky_row[k] as f64;
        }
    }
    (sum_x * sum_x + sum_y * sum_y).sqrt() as i64
}

/// Gradient map and moments over the interior of `gray`, one task per row.
///
/// Each row accumulates locally and merges into the shared totals inside a
/// single critical section.
pub fn gradient_magnitude(
    gray: &ChannelPlane,
    overflow: OverflowPolicy,
) -> (GrayImageU8, GradientStats) {
    let (w, h) = (gray.w, gray.h);
    let mut map = GrayImageU8::new(w, h);
    if w <= 2 * HALF_KERNEL || h <= 2 * HALF_KERNEL {
        return (map, GradientStats::default());
    }

    let totals = Mutex::new(GradientStats::default());
    parallel::for_each_row(map.data_mut(), w, |y, out| {
        if y < HALF_KERNEL || y >= h - HALF_KERNEL {
            return;
        }
        let mut row_stats = GradientStats::default();
        for x in HALF_KERNEL..w - HALF_KERNEL {
            let magnitude = sobel_magnitude_at(gray, x, y);
            row_stats.add(magnitude);
            out[x] = overflow.to_u8(magnitude);
        }
        totals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .merge(&row_stats);
    });

    let stats = totals.into_inner().unwrap_or_else(PoisonError::into_inner);
    (map, stats)
}

/// Spatial Information of `raster`: mean Sobel magnitude over all `W·H`
/// pixels, plus RMS and the gradient map.
pub fn spatial_information(raster: RasterView<'_>, config: &MetricsConfig) -> Result<SpatialInfo> {
    raster.ensure_not_empty()?;
    let mut clock = StageClock::new(config.verbose);

    let gray = clock.time("to gray", || grayscale_plane(raster));
    let (gradient_map, stats) = clock.time("si calc", || {
        gradient_magnitude(&gray, config.gradient.overflow)
    });

    let pixel_count = raster.pixel_count();
    let mean = stats.mean(pixel_count);
    let rms = stats.rms(pixel_count);
    log::debug!(
        "si {}x{}: sum={} sum_squares={} mean={mean:.6} rms={rms:.6}",
        raster.w,
        raster.h,
        stats.sum,
        stats.sum_squares
    );

    Ok(SpatialInfo {
        width: raster.w,
        height: raster.h,
        stats,
        mean,
        rms,
        gradient_map,
        timings: clock.finish(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::RgbaRaster;

    fn split_plane(w: usize, h: usize, split_x: usize, hi: f64) -> ChannelPlane {
        let mut plane = ChannelPlane::new(w, h);
        for y in 0..h {
            for x in split_x..w {
                plane.set(x, y, hi);
            }
        }
        plane
    }

    #[test]
    fn uniform_plane_has_no_gradient() {
        let plane = ChannelPlane::filled(6, 5, 128.0);
        let (map, stats) = gradient_magnitude(&plane, OverflowPolicy::Saturate);
        assert_eq!(stats, GradientStats::default());
        assert!(map.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn vertical_step_responds_only_at_the_boundary() {
        let (w, h) = (8, 6);
        let plane = split_plane(w, h, 4, 255.0);
        let (map, stats) = gradient_magnitude(&plane, OverflowPolicy::Saturate);
        for y in 0..h {
            for x in 0..w {
                let on_band = (1..h - 1).contains(&y) && (x == 3 || x == 4);
                let expected = if on_band { 255 } else { 0 };
                assert_eq!(map.get(x, y), expected, "pixel ({x},{y})");
            }
        }
        // Two columns of |Gx| = 4 * 255 over the interior rows.
        let rows = (h - 2) as i64;
        assert_eq!(stats.sum, 2 * 1020 * rows);
        assert_eq!(stats.sum_squares, 2 * 1020 * 1020 * rows);
    }

    #[test]
    fn horizontal_step_is_detected_by_y_kernel() {
        let mut plane = ChannelPlane::new(5, 5);
        for x in 0..5 {
            for y in 3..5 {
                plane.set(x, y, 10.0);
            }
        }
        assert_eq!(sobel_magnitude_at(&plane, 2, 2), 40);
        assert_eq!(sobel_magnitude_at(&plane, 2, 1), 0);
    }

    #[test]
    fn diagonal_magnitude_is_truncated() {
        // Single bright corner pixel: Gx = Gy = 1 * 10 -> sqrt(200) = 14.14.
        let mut plane = ChannelPlane::new(3, 3);
        plane.set(2, 0, 10.0);
        assert_eq!(sobel_magnitude_at(&plane, 1, 1), 14);
    }

    #[test]
    fn overflow_policy_saturates_or_wraps() {
        assert_eq!(OverflowPolicy::Saturate.to_u8(1020), 255);
        assert_eq!(OverflowPolicy::Wrap.to_u8(1020), (1020 % 256) as u8);
        assert_eq!(OverflowPolicy::Saturate.to_u8(17), 17);
    }

    #[test]
    fn tiny_images_have_no_interior() {
        let plane = ChannelPlane::filled(2, 9, 3.0);
        let (map, stats) = gradient_magnitude(&plane, OverflowPolicy::Saturate);
        assert_eq!(stats.sum, 0);
        assert_eq!(map.data().len(), 18);
    }

    #[test]
    fn mean_divides_by_full_pixel_count() {
        let (w, h) = (8usize, 6usize);
        let mut data = Vec::with_capacity(w * h * 4);
        for _y in 0..h {
            for x in 0..w {
                let v = if x < w / 2 { 0 } else { 255 };
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        let raster = RgbaRaster::new(w, h, data).unwrap();
        let si = spatial_information(raster.as_view(), &MetricsConfig::default()).unwrap();
        assert_eq!(si.mean, 2.0 * 1020.0 * 4.0 / 48.0);
        assert_eq!(si.rms, (2.0 * 1020.0 * 1020.0 * 4.0 / 48.0f64).sqrt());
        assert!(si.timings.is_none());
    }
}
