use super::normalize::ValueRange;
use super::surround::{raw_saliency, LabIntegrals, SaliencyMap};
use crate::color::{LabConverter, LabImage};
use crate::config::MetricsConfig;
use crate::diagnostics::{StageClock, TimingBreakdown};
use crate::error::Result;
use crate::filters::{smooth, SMOOTH_3TAP};
use crate::image::{GrayImageU8, RasterView};
use crate::integral::IntegralImage;
use crate::parallel;
use serde::{Deserialize, Serialize};

/// Knobs for the saliency preview image.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SaliencyOptions {
    /// Gain applied to the normalized map when rendering the 8-bit preview.
    pub preview_gain: f64,
}

impl Default for SaliencyOptions {
    fn default() -> Self {
        Self { preview_gain: 1.1 }
    }
}

/// Outcome of one saliency run.
#[derive(Clone, Debug)]
pub struct SaliencyResult {
    pub width: usize,
    pub height: usize,
    /// Mean of the normalized map, in `[0, 255]`.
    pub mean: f64,
    /// Raw score range before normalization.
    pub range: ValueRange,
    /// Normalized map.
    pub map: SaliencyMap,
    pub preview_gain: f64,
    /// Stage timings, collected in verbose mode only.
    pub timings: Option<TimingBreakdown>,
}

impl SaliencyResult {
    /// 8-bit preview using the configured gain.
    pub fn preview(&self) -> GrayImageU8 {
        self.map.to_gray(self.preview_gain)
    }
}

/// Smoothed Lab planes and their integral images, computed as six
/// independent branches that all finish before this returns.
///
/// Planes are shifted by their top-left sample first. Surround scores are
/// differences of two unit-weight averages and do not change under the
/// shift, while flat regions now cancel exactly and the integral sums stay
/// small.
pub fn surround_inputs(lab: &LabImage) -> (LabImage, LabIntegrals) {
    let lab = &lab.shifted_to_origin();
    parallel::join(
        || {
            let (l, a, b) = parallel::join3(
                || smooth(&lab.l, &SMOOTH_3TAP),
                || smooth(&lab.a, &SMOOTH_3TAP),
                || smooth(&lab.b, &SMOOTH_3TAP),
            );
            LabImage { l, a, b }
        },
        || {
            let (l, a, b) = parallel::join3(
                || IntegralImage::build(&lab.l),
                || IntegralImage::build(&lab.a),
                || IntegralImage::build(&lab.b),
            );
            LabIntegrals { l, a, b }
        },
    )
}

/// Compute the MSSS saliency map of `raster` and its mean.
///
/// Fails on an empty raster and when every raw score is equal (for example a
/// flat-color image).
pub fn maximum_symmetric_surround(
    raster: RasterView<'_>,
    config: &MetricsConfig,
) -> Result<SaliencyResult> {
    raster.ensure_not_empty()?;
    let mut clock = StageClock::new(config.verbose);

    let converter = LabConverter::default();
    let lab = clock.time("to lab", || LabImage::from_raster(raster, &converter));
    let (smoothed, integrals) = clock.time("smooth+integral", || surround_inputs(&lab));
    let mut map = clock.time("surround", || raw_saliency(&smoothed, &integrals));
    let range = clock.time("normalize", || map.normalize())?;
    let mean = map.mean();
    log::debug!(
        "msss {}x{}: raw range [{:.6}, {:.6}], mean {mean:.6}",
        raster.w,
        raster.h,
        range.min,
        range.max
    );

    Ok(SaliencyResult {
        width: raster.w,
        height: raster.h,
        mean,
        range,
        map,
        preview_gain: config.saliency.preview_gain,
        timings: clock.finish(),
    })
}
