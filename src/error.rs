//! Error taxonomy shared by the metric pipelines and the I/O helpers.
//!
//! Every failure is fatal for the current run: there is no retry and no
//! partial-result mode. Callers propagate the error to the binary boundary
//! where it is printed once.
use std::path::PathBuf;

/// Errors produced while loading inputs or computing a metric.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Input file is neither PNG nor JPEG.
    #[error("unsupported image type for {}: must be PNG or JPEG", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// All saliency scores are equal; min-max stretching is undefined.
    #[error("degenerate saliency range: min={min} max={max}")]
    DegenerateRange { min: f64, max: f64 },

    /// Raster without pixels.
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: usize, height: usize },

    /// Raster buffer does not match its declared dimensions.
    #[error("raster buffer holds {actual} samples, expected {expected}")]
    RasterSize { expected: usize, actual: usize },

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, MetricsError>;
