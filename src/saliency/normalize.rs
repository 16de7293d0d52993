//! Min-max stretch of a score plane to `[0, 255]`.
use crate::error::{MetricsError, Result};
use crate::image::ChannelPlane;
use serde::Serialize;

/// Minimum and maximum observed before stretching.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Global min/max of `plane`; `None` for an empty plane.
pub fn value_range(plane: &ChannelPlane) -> Option<ValueRange> {
    let (&first, rest) = plane.data.split_first()?;
    let (min, max) = rest
        .iter()
        .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    Some(ValueRange { min, max })
}

/// Rescale every sample to `255 * (v - min) / (max - min)`.
///
/// Fails with [`MetricsError::DegenerateRange`] when the plane is flat (or
/// empty); the plane is left untouched in that case.
pub fn normalize_in_place(plane: &mut ChannelPlane) -> Result<ValueRange> {
    let range = value_range(plane).unwrap_or(ValueRange { min: 0.0, max: 0.0 });
    let span = range.span();
    if span.is_nan() || span <= 0.0 {
        return Err(MetricsError::DegenerateRange {
            min: range.min,
            max: range.max,
        });
    }
    for v in plane.data.iter_mut() {
        *v = 255.0 * (*v - range.min) / span;
    }
    Ok(range)
}
