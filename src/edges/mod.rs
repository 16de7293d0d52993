//! Spatial Information: Sobel gradient magnitude and its running moments.
//!
//! - Converts the raster to an 8-bit luma plane (row-parallel).
//! - Convolves the interior with the fixed 3×3 Sobel pair; the one-pixel
//!   border is left at zero rather than clamped or reflected.
//! - Accumulates the truncated integer magnitudes (`sum`, `sum_squares`)
//!   under a single lock shared by the row tasks.
//! - SI mean and RMS divide by the full pixel count `W·H`, so border pixels
//!   count as zero-gradient samples.

pub mod grad;

pub use grad::{
    gradient_magnitude, sobel_magnitude_at, spatial_information, GradientOptions, GradientStats,
    OverflowPolicy, SpatialInfo,
};
