//! I/O helpers at the edge of the crate.
//!
//! - `load_raster`: read a PNG or JPEG file into an owned RGBA raster.
//! - `save_gray_png`: write an 8-bit gray buffer as PNG.
//! - `write_json_file`: pretty-print a serializable report to disk.
//!
//! The metric pipelines never call into this module; only the binaries do.
use super::{GrayImageU8, ImageView, RgbaRaster};
use crate::error::{MetricsError, Result};
use image::{ImageFormat, ImageReader};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Resolve the input format from the file content, falling back to the
/// extension. Only PNG and JPEG are accepted.
fn detect_format(path: &Path, sniffed: Option<ImageFormat>) -> Result<ImageFormat> {
    let format = sniffed.or_else(|| ImageFormat::from_path(path).ok());
    match format {
        Some(ImageFormat::Png) => Ok(ImageFormat::Png),
        Some(ImageFormat::Jpeg) => Ok(ImageFormat::Jpeg),
        _ => Err(MetricsError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Load a PNG/JPEG image and expand it to 8-bit RGBA.
pub fn load_raster(path: &Path) -> Result<RgbaRaster> {
    let io_err = |source| MetricsError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ImageReader::open(path)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)?;
    let format = detect_format(path, reader.format())?;
    reader.set_format(format);

    let img = reader
        .decode()
        .map_err(|source| MetricsError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgba8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    log::debug!(
        "decoded {} as {format:?} ({width}x{height})",
        path.display()
    );
    RgbaRaster::new(width, height, img.into_raw())
}

/// Save an 8-bit grayscale buffer to a PNG.
pub fn save_gray_png(buffer: &GrayImageU8, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        buffer.data(),
        buffer.width() as u32,
        buffer.height() as u32,
        image::ColorType::L8,
        ImageFormat::Png,
    )
    .map_err(|source| MetricsError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| MetricsError::Config {
        path: path.to_path_buf(),
        message: format!("failed to serialize report: {e}"),
    })?;
    fs::write(path, json).map_err(|source| MetricsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| MetricsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
