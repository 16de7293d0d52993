//! Symmetric surround windows and raw per-pixel saliency scores.
use super::normalize::{normalize_in_place, ValueRange};
use crate::color::LabImage;
use crate::error::Result;
use crate::image::{ChannelPlane, GrayImageU8};
use crate::integral::IntegralImage;
use crate::parallel;

/// Inclusive pixel box `[x1..=x2] × [y1..=y2]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurroundWindow {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
}

impl SurroundWindow {
    #[inline]
    pub fn area(&self) -> usize {
        (self.x2 - self.x1 + 1) * (self.y2 - self.y1 + 1)
    }
}

/// Largest window centred on `(x, y)` that stays inside a `w × h` image.
///
/// The half-extent on each axis is the distance to the nearer border, so the
/// window collapses to a line (or the pixel itself) on the image edges.
#[inline]
pub fn symmetric_surround(x: usize, y: usize, w: usize, h: usize) -> SurroundWindow {
    let xoff = x.min(w - 1 - x);
    let yoff = y.min(h - 1 - y);
    SurroundWindow {
        x1: x - xoff,
        y1: y - yoff,
        x2: (x + xoff).min(w - 1),
        y2: (y + yoff).min(h - 1),
    }
}

/// Integral images of the three Lab planes.
#[derive(Clone, Debug)]
pub struct LabIntegrals {
    pub l: IntegralImage,
    pub a: IntegralImage,
    pub b: IntegralImage,
}

impl LabIntegrals {
    /// Mean Lab value inside `win`.
    #[inline]
    fn mean(&self, win: &SurroundWindow) -> [f64; 3] {
        let area = win.area() as f64;
        let SurroundWindow { x1, y1, x2, y2 } = *win;
        [
            self.l.sum(x1, y1, x2, y2) / area,
            self.a.sum(x1, y1, x2, y2) / area,
            self.b.sum(x1, y1, x2, y2) / area,
        ]
    }
}

/// Per-pixel saliency scores. Raw scores are squared Lab distances; after
/// [`SaliencyMap::normalize`] they lie in `[0, 255]`.
#[derive(Clone, Debug)]
pub struct SaliencyMap {
    plane: ChannelPlane,
}

impl SaliencyMap {
    pub fn from_plane(plane: ChannelPlane) -> Self {
        Self { plane }
    }

    pub fn plane(&self) -> &ChannelPlane {
        &self.plane
    }

    pub fn width(&self) -> usize {
        self.plane.w
    }

    pub fn height(&self) -> usize {
        self.plane.h
    }

    /// Stretch the scores to `[0, 255]` in place.
    pub fn normalize(&mut self) -> Result<ValueRange> {
        normalize_in_place(&mut self.plane)
    }

    pub fn mean(&self) -> f64 {
        self.plane.mean()
    }

    /// 8-bit preview: each score times `gain`, saturated to `[0, 255]` and
    /// truncated.
    pub fn to_gray(&self, gain: f64) -> GrayImageU8 {
        let data = self
            .plane
            .data
            .iter()
            .map(|&v| (v * gain).clamp(0.0, 255.0) as u8)
            .collect();
        GrayImageU8::from_raw(self.plane.w, self.plane.h, data)
            .unwrap_or_else(|| GrayImageU8::new(self.plane.w, self.plane.h))
    }
}

/// Score every pixel of `smoothed` against its symmetric surround, one task
/// per row.
pub fn raw_saliency(smoothed: &LabImage, integrals: &LabIntegrals) -> SaliencyMap {
    let (w, h) = (smoothed.width(), smoothed.height());
    let mut plane = ChannelPlane::new(w, h);
    parallel::for_each_row(&mut plane.data, w, |y, row| {
        for (x, score) in row.iter_mut().enumerate() {
            let win = symmetric_surround(x, y, w, h);
            let [l, a, b] = integrals.mean(&win);
            let dl = l - smoothed.l.get(x, y);
            let da = a - smoothed.a.get(x, y);
            let db = b - smoothed.b.get(x, y);
            *score = dl * dl + da * da + db * db;
        }
    });
    SaliencyMap { plane }
}
