use std::{env, ffi::OsString, fs, num::NonZeroUsize, path::Path};

use serde::{Deserialize, Serialize};

use crate::{MlErr, Result};

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "PIPELINE_CONFIG";

const DEFAULT_REPETITIONS: NonZeroUsize = NonZeroUsize::new(10).unwrap();
const DEFAULT_SEQ_LEN: NonZeroUsize = NonZeroUsize::new(5).unwrap();

/// How the linear regression coefficients are solved for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SolverConfig {
    NormalEquations,
    GradientDescent {
        learning_rate: f64,
        epochs: NonZeroUsize,
    },
}

/// Immutable settings for a single pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Times the fixed command list is repeated.
    pub repetitions: NonZeroUsize,
    /// Length every input sequence is padded to.
    pub seq_len: NonZeroUsize,
    pub pad_token: String,
    /// Fraction of the samples held out for testing.
    pub test_size: f64,
    pub seed: u64,
    pub fit_intercept: bool,
    pub solver: SolverConfig,
    /// Words fed to the predictor after training.
    pub example: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            repetitions: DEFAULT_REPETITIONS,
            seq_len: DEFAULT_SEQ_LEN,
            pad_token: "PAD".to_string(),
            test_size: 0.2,
            seed: 42,
            fit_intercept: true,
            solver: SolverConfig::NormalEquations,
            example: vec!["ls".to_string(), "-h".to_string()],
        }
    }
}

impl PipelineConfig {
    /// Loads the config named by `PIPELINE_CONFIG`, falling back to the defaults when the
    /// variable is unset.
    ///
    /// # Errors
    /// Returns an `MlErr` if the file cannot be read, parsed or validated.
    pub fn from_env() -> Result<Self> {
        Self::from_optional_file(env::var_os(CONFIG_ENV))
    }

    fn from_optional_file(path: Option<OsString>) -> Result<Self> {
        match path {
            Some(path) => Self::from_json_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Loads a config from a JSON file.
    ///
    /// # Errors
    /// Returns an `MlErr` if the file cannot be read, parsed or validated.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parses a config from a JSON string, missing fields take their default values.
    ///
    /// # Errors
    /// Returns an `MlErr` if the string cannot be parsed or the config is invalid.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants serde cannot express.
    ///
    /// # Errors
    /// Returns `MlErr::InvalidConfig` describing the first violated invariant.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(MlErr::InvalidConfig(format!(
                "test_size must be in (0, 1), got {}",
                self.test_size
            )));
        }

        if self.pad_token.trim().is_empty() {
            return Err(MlErr::InvalidConfig("pad_token must not be blank".into()));
        }

        if let SolverConfig::GradientDescent { learning_rate, .. } = self.solver {
            if !(learning_rate.is_finite() && learning_rate > 0.0) {
                return Err(MlErr::InvalidConfig(format!(
                    "learning_rate must be positive, got {learning_rate}"
                )));
            }
        }

        Ok(())
    }
}
