// Configuration file loading

use clap::ValueEnum;
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, debug};

const APP_NAME: &str = "tasktrack";
const CONFIG_FILE: &str = "tasktrack.yml";

/// How task listings are written to the terminal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable line per task
    #[default]
    Text,
    /// One JSON object per task (JSONL)
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Colorize text output
    pub color: bool,
    pub output: OutputFormat,
    /// Maximum tracing level: error, warn, info, debug or trace
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: true,
            output: OutputFormat::Text,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Default config location: `<config dir>/tasktrack/tasktrack.yml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Load configuration
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// tried and built-in defaults are used when nothing is there.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.log_level()?;

        debug!(path = %path.display(), ?config, "Loaded config");
        Ok(config)
    }

    pub fn log_level(&self) -> Result<Level> {
        self.log_level
            .trim()
            .parse::<Level>()
            .map_err(|_| eyre!("Invalid log level: {}", self.log_level))
    }
}
