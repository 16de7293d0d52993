//! Run configuration threaded explicitly into every pipeline entry point.
//!
//! A config file is optional JSON; every field has a default so partial
//! files are accepted:
//!
//! ```json
//! { "verbose": true, "saliency": { "preview_gain": 1.0 }, "gradient": { "overflow": "wrap" } }
//! ```
pub mod cli;

use crate::edges::GradientOptions;
use crate::error::{MetricsError, Result};
use crate::saliency::SaliencyOptions;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Collect stage timings and emit diagnostic output.
    pub verbose: bool,
    pub saliency: SaliencyOptions,
    pub gradient: GradientOptions,
}

impl MetricsConfig {
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

pub fn parse_config(path: &Path, contents: &str) -> Result<MetricsConfig> {
    serde_json::from_str(contents).map_err(|e| MetricsError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

pub fn load_config(path: &Path) -> Result<MetricsConfig> {
    let data = fs::read_to_string(path).map_err(|source| MetricsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(path, &data)
}
