//! Owned single-channel f64 plane in row-major layout (stride == width).
//!
//! Holds L, a, b, luma, and saliency values. The invariant
//! `data.len() == w * h` holds for every constructed plane.
use super::traits::ImageView;

#[derive(Clone, Debug, PartialEq)]
pub struct ChannelPlane {
    /// Plane width in pixels
    pub w: usize,
    /// Plane height in pixels
    pub h: usize,
    /// Number of elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f64>,
}

impl ChannelPlane {
    /// Construct a zero-initialized plane of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, 0.0)
    }

    /// Construct a plane where every sample equals `value`.
    pub fn filled(w: usize, h: usize, value: f64) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![value; w * h],
        }
    }

    /// Wrap an existing row-major buffer. Returns `None` when the length does
    /// not match `w * h`.
    pub fn from_vec(w: usize, h: usize, data: Vec<f64>) -> Option<Self> {
        (data.len() == w * h).then_some(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f64) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Arithmetic mean over all samples; `0.0` for an empty plane.
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }
}

impl ImageView for ChannelPlane {
    type Pixel = f64;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[f64] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}
