//! Decoded input rasters (RGBA, 8 bits per sample) and 8-bit gray outputs.
use super::traits::ImageView;
use crate::error::{MetricsError, Result};

const RGBA_CHANNELS: usize = 4;

/// Borrowed RGBA raster, 8 bits per sample, rows `stride` pixels apart.
#[derive(Clone, Copy, Debug)]
pub struct RasterView<'a> {
    pub w: usize,
    pub h: usize,
    /// Pixels between rows
    pub stride: usize,
    pub data: &'a [u8],
}

impl<'a> RasterView<'a> {
    /// Wrap a tightly packed RGBA buffer, checking its length.
    pub fn new(w: usize, h: usize, data: &'a [u8]) -> Result<Self> {
        let expected = w * h * RGBA_CHANNELS;
        if data.len() != expected {
            return Err(MetricsError::RasterSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.w * self.h
    }

    /// Fails with [`MetricsError::EmptyImage`] when either dimension is zero.
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.w == 0 || self.h == 0 {
            return Err(MetricsError::EmptyImage {
                width: self.w,
                height: self.h,
            });
        }
        Ok(())
    }

    /// Interleaved RGBA samples of row `y`.
    #[inline]
    pub fn row_bytes(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride * RGBA_CHANNELS;
        &self.data[start..start + self.w * RGBA_CHANNELS]
    }

    #[inline]
    pub fn rgba(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.stride + x) * RGBA_CHANNELS;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

/// Owned RGBA raster as produced by the decoder.
#[derive(Clone, Debug)]
pub struct RgbaRaster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbaRaster {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        RasterView::new(width, height, &data)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Raster where every pixel is `rgba`.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Self {
        let data = rgba
            .iter()
            .copied()
            .cycle()
            .take(width * height * RGBA_CHANNELS)
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_view(&self) -> RasterView<'_> {
        RasterView {
            w: self.width,
            h: self.height,
            stride: self.width,
            data: &self.data,
        }
    }
}

/// Owned 8-bit grayscale buffer (gradient maps, saliency previews).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Zero-initialized buffer of size `width × height`.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Wrap raw row-major bytes. Returns `None` on a length mismatch.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == width * height).then_some(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl ImageView for GrayImageU8 {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
}
