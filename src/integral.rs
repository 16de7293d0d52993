//! Summed-area table over a single channel plane.
//!
//! `table[y][x]` holds the sum of all samples in `[0..=x] × [0..=y]`. Range
//! queries use four-corner inclusion-exclusion, so they are exact up to
//! floating-point rounding for any input, including the signed a/b planes
//! where the table is not monotonic.
//!
//! Complexity: O(W·H) build, O(1) query; memory one f64 per pixel.
use crate::image::{ChannelPlane, ImageView};

#[derive(Clone, Debug)]
pub struct IntegralImage {
    pub w: usize,
    pub h: usize,
    table: Vec<f64>,
}

impl IntegralImage {
    /// Build the table with running row sums accumulated down the columns.
    pub fn build(plane: &ChannelPlane) -> Self {
        let (w, h) = (plane.w, plane.h);
        let mut table = vec![0.0f64; w * h];
        for y in 0..h {
            let src = plane.row(y);
            let mut row_sum = 0.0;
            for x in 0..w {
                row_sum += src[x];
                let above = if y == 0 { 0.0 } else { table[(y - 1) * w + x] };
                table[y * w + x] = above + row_sum;
            }
        }
        Self { w, h, table }
    }

    #[inline]
    fn at(&self, x: usize, y: usize) -> f64 {
        self.table[y * self.w + x]
    }

    /// Sum over the inclusive box `[x1..=x2] × [y1..=y2]`.
    ///
    /// Callers guarantee `x1 <= x2 < w` and `y1 <= y2 < h`.
    #[inline]
    pub fn sum(&self, x1: usize, y1: usize, x2: usize, y2: usize) -> f64 {
        debug_assert!(x1 <= x2 && x2 < self.w, "x range {x1}..={x2} outside {}", self.w);
        debug_assert!(y1 <= y2 && y2 < self.h, "y range {y1}..={y2} outside {}", self.h);
        match (x1, y1) {
            (0, 0) => self.at(x2, y2),
            (0, _) => self.at(x2, y2) - self.at(x2, y1 - 1),
            (_, 0) => self.at(x2, y2) - self.at(x1 - 1, y2),
            _ => {
                self.at(x2, y2) + self.at(x1 - 1, y1 - 1)
                    - self.at(x2, y1 - 1)
                    - self.at(x1 - 1, y2)
            }
        }
    }

    /// Sum over the whole plane; `0.0` when the plane is empty.
    pub fn total(&self) -> f64 {
        if self.w == 0 || self.h == 0 {
            return 0.0;
        }
        self.at(self.w - 1, self.h - 1)
    }
}
