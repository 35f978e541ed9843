//! Run configuration, with defaults and optional TOML overrides.
//!
//! ```toml
//! [training]
//! dataset_path = "datasets/and_gate.csv"
//! std_dev = 1.2
//! max_iterations = 5000
//!
//! [log]
//! path = "data.csv"
//! rows = 10
//! ```
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub training: TrainingConfig,
    pub log: LogConfig,
}

/// Parameters of a perceptron training run.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingConfig {
    pub dataset_path: PathBuf,
    /// Mean of the normal distribution the initial weights are drawn from.
    pub mean: f64,
    pub std_dev: f64,
    pub learning_rate: f64,
    pub max_iterations: usize,
    /// Fixed RNG seed; fresh entropy when absent.
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("./datasets/and_gate.csv"),
            mean: 0.0,
            std_dev: 1.2,
            learning_rate: 1.0,
            max_iterations: 5000,
            seed: None,
        }
    }
}

/// Parameters of the synthetic training-log generator.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub path: PathBuf,
    pub rows: usize,
    pub seed: Option<u64>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data.csv"),
            rows: 10,
            seed: None,
        }
    }
}

impl Config {
    /// Load a TOML file. Relative paths inside it are taken relative to the
    /// file's own directory.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut config = Self::from_toml(&contents)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.training.dataset_path = base.join(&config.training.dataset_path);
            config.log.path = base.join(&config.log.path);
        }
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.training.validate()?;
        Ok(config)
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.std_dev.is_finite() || self.std_dev <= 0.0 || !self.mean.is_finite() {
            bail!("Invalid weight distribution: gauss({}, {})", self.mean, self.std_dev);
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            bail!("learning_rate must be positive, got {}", self.learning_rate);
        }
        if self.max_iterations == 0 {
            bail!("max_iterations must be at least 1");
        }
        Ok(())
    }
}
