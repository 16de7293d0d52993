use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Timing entry describing a single stage of a metric pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for one pipeline run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    pub fn stage(&self, label: &str) -> Option<&StageTiming> {
        self.stages.iter().find(|s| s.label == label)
    }
}

/// Stage clock that only records when verbose mode is on.
#[derive(Debug)]
pub struct StageClock {
    start: Instant,
    breakdown: Option<TimingBreakdown>,
}

impl StageClock {
    pub fn new(enabled: bool) -> Self {
        Self {
            start: Instant::now(),
            breakdown: enabled.then(TimingBreakdown::default),
        }
    }

    /// Run `f`, recording its duration under `label` when enabled.
    pub fn time<R>(&mut self, label: &str, f: impl FnOnce() -> R) -> R {
        let Some(breakdown) = self.breakdown.as_mut() else {
            return f();
        };
        let t0 = Instant::now();
        let out = f();
        let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;
        log::debug!("{label}: {elapsed_ms:.3} ms");
        breakdown.push(label, elapsed_ms);
        out
    }

    pub fn finish(self) -> Option<TimingBreakdown> {
        let total_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        self.breakdown.map(|mut b| {
            b.total_ms = total_ms;
            b
        })
    }
}
