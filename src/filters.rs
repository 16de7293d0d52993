//! Separable smoothing with boundary renormalization.
//!
//! A 1-D kernel is applied horizontally, then vertically on the intermediate
//! result. Taps that fall outside the image are dropped and the remaining
//! weights are renormalized, so constant planes stay constant and edge pixels
//! are not darkened. Each pass is row-parallel with disjoint output rows.
use crate::image::{ChannelPlane, ImageView};
use crate::parallel;

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The centre tap sits at
    /// index `taps().len() / 2`.
    fn taps(&self) -> &[f64];
}

/// Simple wrapper around a static filter kernel.
#[derive(Clone, Copy, Debug)]
pub struct StaticSeparableFilter {
    taps: &'static [f64],
}

impl Default for StaticSeparableFilter {
    fn default() -> Self {
        SMOOTH_3TAP
    }
}

impl StaticSeparableFilter {
    pub const fn new(taps: &'static [f64]) -> Self {
        Self { taps }
    }
}

impl SeparableFilter for StaticSeparableFilter {
    #[inline]
    fn taps(&self) -> &[f64] {
        self.taps
    }
}

/// Unnormalized binomial kernel `[1, 2, 1]`.
pub const SMOOTH_3TAP: StaticSeparableFilter = StaticSeparableFilter::new(&[1.0, 2.0, 1.0]);

/// Convolve `len` samples read through `sample(i)` at position `pos`,
/// renormalizing by the in-bounds weights.
///
/// Taps weight deviations from the centre sample, so a constant run returns
/// the constant bit for bit.
#[inline]
fn renormalized_tap_sum(taps: &[f64], pos: usize, len: usize, sample: impl Fn(usize) -> f64) -> f64 {
    let center = taps.len() / 2;
    let origin = sample(pos);
    let mut sum = 0.0;
    let mut weight = 0.0;
    for (k, &tap) in taps.iter().enumerate() {
        let Some(i) = (pos + k).checked_sub(center) else {
            continue;
        };
        if i >= len {
            continue;
        }
        sum += (sample(i) - origin) * tap;
        weight += tap;
    }
    origin + sum / weight
}

/// Smooth `src` with `filter` along x then y.
pub fn smooth<F: SeparableFilter + Sync>(src: &ChannelPlane, filter: &F) -> ChannelPlane {
    let (w, h) = (src.w, src.h);
    let taps = filter.taps();
    assert!(!taps.is_empty(), "filter must provide at least one tap");

    let mut tmp = ChannelPlane::new(w, h);
    parallel::for_each_row(&mut tmp.data, w, |y, out| {
        let row = src.row(y);
        for (x, px) in out.iter_mut().enumerate() {
            *px = renormalized_tap_sum(taps, x, w, |i| row[i]);
        }
    });

    let mut out = ChannelPlane::new(w, h);
    let tmp = &tmp;
    parallel::for_each_row(&mut out.data, w, |y, dst| {
        for (x, px) in dst.iter_mut().enumerate() {
            *px = renormalized_tap_sum(taps, y, h, |i| tmp.get(x, i));
        }
    });
    out
}
