//! Color conversions feeding the two metric pipelines.
//!
//! - [`lab`]: sRGB → linear RGB → XYZ (D65) → CIE L*a*b*, per pixel and per
//!   raster (row-parallel), producing the three planes used by the saliency
//!   stage.
//! - [`luma`]: 8-bit fixed-point BT.601 luma used by the gradient stage.

pub mod lab;
pub mod luma;

pub use lab::{Lab, LabConverter, LabImage};
pub use luma::{grayscale_plane, luma_u8};
