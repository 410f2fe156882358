//! Configuration loading and config file resolution
//!
//! The TOML file is optional bootstrap input, never written back.
//!
//! # Settings Sources Priority
//!
//! 1. Command-line arguments (applied by the binary on top of the loaded config)
//! 2. `SORTVIS_CONFIG` environment variable (path to a TOML file)
//! 3. `<config_dir>/sortvis/config.toml`
//! 4. Built-in defaults (code constants in [`crate::params`])
//!
//! A missing config file is not an error: a warning is logged and defaults are
//! used. A file that exists but does not parse is an error.
//!
//! ```toml
//! [visualizer]
//! bar_count = 80
//! delay_ms = 10
//! algorithm = "merge"
//! orientation = "horizontal"
//! pause_poll_interval_ms = 20
//!
//! [logging]
//! level = "debug"
//! ```

use crate::events::{Algorithm, Orientation};
use crate::params::{self, PaceLimits};
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "SORTVIS_CONFIG";

/// Top-level TOML configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Visualizer startup settings (optional section)
    #[serde(default)]
    pub visualizer: VisualizerConfig,

    /// Logging configuration (optional section)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Startup values for the driver's controls
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VisualizerConfig {
    /// Initial bar count (clamped to [10, 200])
    #[serde(default = "default_bar_count")]
    pub bar_count: usize,

    /// Initial step delay in ms (clamped to [1, 50])
    #[serde(default = "default_delay_ms")]
    pub delay_ms: f64,

    /// Preselected algorithm
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Initial bar orientation
    #[serde(default)]
    pub orientation: Orientation,

    /// How often a paused run re-checks pause and cancel (clamped to [1, 1000])
    #[serde(default = "default_pause_poll_interval_ms")]
    pub pause_poll_interval_ms: u64,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            bar_count: default_bar_count(),
            delay_ms: default_delay_ms(),
            algorithm: Algorithm::default(),
            orientation: Orientation::default(),
            pause_poll_interval_ms: default_pause_poll_interval_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_bar_count() -> usize {
    params::BAR_COUNT_DEFAULT
}

fn default_delay_ms() -> f64 {
    params::DELAY_MS_DEFAULT
}

fn default_pause_poll_interval_ms() -> u64 {
    params::PAUSE_POLL_INTERVAL_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Read and parse a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        let config = Self::from_toml_str(&text)?;
        info!("Loaded TOML configuration from {:?}", path);
        Ok(config)
    }

    /// Resolve, load and clamp the configuration
    ///
    /// `cli_path` is the `--config` argument, if any. Missing files fall back
    /// to defaults with a warning; malformed files are errors.
    pub fn load_or_default(cli_path: Option<&Path>) -> Result<Self> {
        let config = match resolve_config_path(cli_path) {
            Some(path) if path.exists() => Self::load(&path)?,
            Some(path) => {
                warn!("Config file {:?} not found, using built-in defaults", path);
                Self::default()
            }
            None => {
                info!("No config file found, using built-in defaults");
                Self::default()
            }
        };
        Ok(config.clamped())
    }

    /// Bring every numeric setting into its configured range
    pub fn clamped(mut self) -> Self {
        self.visualizer.bar_count = params::clamp_bar_count(self.visualizer.bar_count);
        self.visualizer.delay_ms = PaceLimits::default().clamp_delay(self.visualizer.delay_ms);
        self.visualizer.pause_poll_interval_ms =
            params::clamp_poll_interval_ms(self.visualizer.pause_poll_interval_ms);
        self
    }
}

/// Config file resolution following the documented priority order
///
/// Returns `None` only when no explicit path was given and the platform
/// default file does not exist.
pub fn resolve_config_path(cli_path: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_path {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Platform config directory (only if the file exists)
    default_config_path().filter(|path| path.exists())
}

/// `<config_dir>/sortvis/config.toml` for the current platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sortvis").join("config.toml"))
}
