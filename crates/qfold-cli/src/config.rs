//! Analysis configuration: optional TOML file merged with CLI overrides.
//!
//! Precedence is CLI flag > config file > built-in default.

use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};
use qfold::workflows::analyze::AnalyzeConfig;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct AnalyzeFileConfig {
    pub cutoff_distance: Option<f64>,
    pub max_frames: Option<usize>,
    pub window_size: Option<usize>,
    pub binary_cutoff: Option<f64>,
    pub smoothing_window: Option<usize>,
}

impl AnalyzeFileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        debug!(?config, "Loaded analysis configuration file.");
        Ok(config)
    }
}

pub fn build_analyze_config(args: &AnalyzeArgs) -> Result<AnalyzeConfig> {
    let file = match &args.config {
        Some(path) => AnalyzeFileConfig::from_file(path)?,
        None => AnalyzeFileConfig::default(),
    };

    let mut config = AnalyzeConfig::new(args.trajectory.clone(), args.contacts.clone());
    config.cutoff_distance = args
        .cutoff_distance
        .or(file.cutoff_distance)
        .unwrap_or(config.cutoff_distance);
    config.max_frames = args.max_frames.or(file.max_frames);
    config.window_size = args
        .window_size
        .or(file.window_size)
        .unwrap_or(config.window_size);
    config.binary_cutoff = args
        .binary_cutoff
        .or(file.binary_cutoff)
        .unwrap_or(config.binary_cutoff);
    config.smoothing_window = args.smooth.or(file.smoothing_window);

    Ok(config)
}
