//! Search configuration
//!
//! Matching tolerance and field weights are tunable. Values come from a JSON
//! file when one is present, otherwise the built-in defaults apply.

use crate::error::AppError;
use crate::search::FieldWeights;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_DIR_NAME: &str = "proposal-search";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Fraction of pattern characters that may be edited in a fuzzy match
    pub threshold: f64,
    /// Shortest query or matched fragment accepted by the fuzzy index
    pub min_match_char_length: usize,
    pub weights: FieldWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            min_match_char_length: 2,
            weights: FieldWeights::default(),
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(AppError::InvalidInput(format!(
                "threshold must be in range [0.0, 1.0], got {}",
                self.threshold
            )));
        }
        if self.min_match_char_length == 0 {
            return Err(AppError::InvalidInput(
                "min_match_char_length must be at least 1".to_string(),
            ));
        }
        if let Some(field) = self.weights.invalid_field() {
            return Err(AppError::InvalidInput(format!(
                "weight for {} must be a positive finite number",
                field
            )));
        }
        Ok(())
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Default location of the configuration file
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration.
///
/// An explicit path must exist. Without one, the default location is used if
/// it holds a file; otherwise the defaults apply.
pub fn load_config(explicit: Option<&Path>) -> Result<SearchConfig, AppError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match config_path() {
            Some(path) if path.is_file() => path,
            _ => {
                debug!("No configuration file, using defaults");
                return Ok(SearchConfig::default());
            }
        },
    };

    let data = fs::read_to_string(&path).map_err(|e| {
        AppError::Config(format!("failed to read {}: {}", path.display(), e))
    })?;
    let config: SearchConfig = serde_json::from_str(&data).map_err(|e| {
        AppError::Config(format!("failed to parse {}: {}", path.display(), e))
    })?;
    config.validate()?;

    debug!("Loaded configuration from {}", path.display());
    Ok(config)
}
