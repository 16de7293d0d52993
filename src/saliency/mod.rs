//! Maximum Symmetric Surround saliency.
//!
//! Pipeline (see [`maximum_symmetric_surround`]):
//!
//! 1. Convert the raster to L*a*b* (row-parallel).
//! 2. In parallel, smooth each Lab plane with the `[1,2,1]` kernel and build
//!    one integral image per plane (six independent branches, joined before
//!    the next stage).
//! 3. For every pixel, compare the smoothed Lab value with the average over
//!    the largest in-bounds window symmetric about the pixel; the score is
//!    the squared Euclidean distance.
//! 4. Min-max stretch the scores to `[0, 255]`. A flat map is an error.
//!
//! Reference: R. Achanta and S. Süsstrunk, "Saliency Detection using Maximum
//! Symmetric Surround", ICIP 2010.

mod msss;
pub mod normalize;
pub mod surround;

pub use msss::{maximum_symmetric_surround, surround_inputs, SaliencyOptions, SaliencyResult};
pub use normalize::{normalize_in_place, ValueRange};
pub use surround::{raw_saliency, symmetric_surround, LabIntegrals, SaliencyMap, SurroundWindow};

#[cfg(test)]
mod tests;
