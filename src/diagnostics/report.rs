use super::TimingBreakdown;
use crate::edges::{GradientStats, SpatialInfo};
use crate::saliency::{SaliencyResult, ValueRange};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub width: usize,
    pub height: usize,
    pub pixel_count: usize,
}

impl InputDescriptor {
    pub fn new(path: Option<&Path>, width: usize, height: usize) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
            width,
            height,
            pixel_count: width * height,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialInfoReport {
    pub input: InputDescriptor,
    pub stats: GradientStats,
    pub si_mean: f64,
    pub si_rms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timings: Option<TimingBreakdown>,
}

impl SpatialInfoReport {
    pub fn from_result(path: Option<&Path>, si: &SpatialInfo) -> Self {
        Self {
            input: InputDescriptor::new(path, si.width, si.height),
            stats: si.stats,
            si_mean: si.mean,
            si_rms: si.rms,
            timings: si.timings.clone(),
        }
    }

    /// `key=value` lines for the diagnostic stream.
    pub fn diagnostic_lines(&self) -> Vec<String> {
        vec![
            format!("width={}", self.input.width),
            format!("height={}", self.input.height),
            format!("pixel={}", self.input.pixel_count),
            format!("SIsum={}", self.stats.sum),
            format!("SIrm={}", self.stats.sum_squares),
            format!("SIrms={:.6}", self.si_rms),
        ]
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaliencyReport {
    pub input: InputDescriptor,
    pub raw_range: ValueRange,
    pub saliency_mean: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timings: Option<TimingBreakdown>,
}

impl SaliencyReport {
    pub fn from_result(path: Option<&Path>, result: &SaliencyResult) -> Self {
        Self {
            input: InputDescriptor::new(path, result.width, result.height),
            raw_range: result.range,
            saliency_mean: result.mean,
            timings: result.timings.clone(),
        }
    }

    pub fn diagnostic_lines(&self) -> Vec<String> {
        vec![
            format!("width={}", self.input.width),
            format!("height={}", self.input.height),
            format!("pixel={}", self.input.pixel_count),
            format!("min={:.6}", self.raw_range.min),
            format!("max={:.6}", self.raw_range.max),
        ]
    }
}
