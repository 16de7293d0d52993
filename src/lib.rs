#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod image;

// Pipeline building blocks, public for tools and tests.
pub mod color;
pub mod edges;
pub mod filters;
pub mod integral;
pub mod parallel;
pub mod saliency;

// --- High-level re-exports -------------------------------------------------

// Main entry points: the two metric pipelines and their results.
pub use crate::edges::{spatial_information, SpatialInfo};
pub use crate::saliency::{maximum_symmetric_surround, SaliencyResult};

pub use crate::config::MetricsConfig;
pub use crate::error::{MetricsError, Result};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use perceptual_metrics::prelude::*;
///
/// # fn main() -> perceptual_metrics::Result<()> {
/// let (w, h) = (64usize, 48usize);
/// let rgba = vec![128u8; w * h * 4];
/// let raster = RasterView::new(w, h, &rgba)?;
///
/// let si = spatial_information(raster, &MetricsConfig::default())?;
/// println!("SI mean={:.6}", si.mean);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ChannelPlane, GrayImageU8, RasterView, RgbaRaster};
    pub use crate::{maximum_symmetric_surround, spatial_information};
    pub use crate::{MetricsConfig, MetricsError, SaliencyResult, SpatialInfo};
}
