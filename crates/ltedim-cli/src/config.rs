//! # Configuration System
//!
//! YAML scenario configuration for the `ltedim` command.
//!
//! ## Configuration Search Path
//!
//! Configuration is loaded from the first file found:
//! 1. Path specified via `LTEDIM_CONFIG` environment variable
//! 2. `./ltedim.yaml` (current directory)
//! 3. `~/.config/ltedim/config.yaml` (user config)
//! 4. `/etc/ltedim/config.yaml` (system config)
//!
//! ## Example Configuration
//!
//! ```yaml
//! parameters:
//!   frequency: 800
//!   txPower: 46
//!   environment: suburban
//!   targetArea: 350
//!
//! sweep:
//!   max_distance_km: 15
//!
//! logging:
//!   level: debug
//!
//! profiles:
//!   rural_700:
//!     frequency: 700
//!     environment: rural
//!     txAntennaHeight: 45
//! ```
//!
//! Parameter keys use the same camelCase names as the JSON output.

use ltedim_core::planner::CHART_SWEEP_DISTANCE_KM;
use ltedim_core::{Environment, LteParameters};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "LTEDIM_CONFIG";

/// Longest accepted sweep (km); the sweep is collected in memory.
pub const MAX_SWEEP_DISTANCE_KM: f64 = 1000.0;

/// Error type for configuration operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("config not found: {0}")]
    NotFound(String),

    #[error("failed to read config: {0}")]
    ReadError(String),

    #[error("failed to parse config: {0}")]
    ParseError(String),

    #[error("invalid config: {0}")]
    ValidationError(String),
}

/// Distance sweep settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Last sweep distance in km
    pub max_distance_km: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            max_distance_km: CHART_SWEEP_DISTANCE_KM,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl Default for LogFormat {
    fn default() -> Self {
        Self::Text
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Complete ltedim configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Configuration version
    pub version: String,
    /// Scenario evaluated when no profile is selected
    pub parameters: LteParameters,
    pub sweep: SweepConfig,
    pub logging: LogConfig,
    /// Named scenarios (name -> parameters)
    pub profiles: HashMap<String, LteParameters>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            parameters: LteParameters::default(),
            sweep: SweepConfig::default(),
            logging: LogConfig::default(),
            profiles: HashMap::new(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from the default search path.
    ///
    /// Returns the default config if no file is found.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if Path::new(&path).exists() {
                return Self::load_from(Path::new(&path));
            }
        }

        for path in Self::config_search_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;

        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Replace the scenario with a named profile.
    pub fn with_profile(&self, name: &str) -> Result<Self, ConfigError> {
        let profile = self
            .profiles
            .get(name)
            .ok_or_else(|| ConfigError::NotFound(format!("profile '{}' not found", name)))?;

        let mut config = self.clone();
        config.parameters = *profile;
        Ok(config)
    }

    /// Get configuration search paths.
    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./ltedim.yaml")];

        if let Some(dirs) = directories::ProjectDirs::from("", "", "ltedim") {
            paths.push(dirs.config_dir().join("config.yaml"));
        }

        paths.push(PathBuf::from("/etc/ltedim/config.yaml"));

        paths
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parameters
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        for (name, profile) in &self.profiles {
            profile
                .validate()
                .map_err(|e| ConfigError::ValidationError(format!("profile '{}': {}", name, e)))?;
        }

        let max_km = self.sweep.max_distance_km;
        if !(max_km > 0.0 && max_km <= MAX_SWEEP_DISTANCE_KM) {
            return Err(ConfigError::ValidationError(format!(
                "sweep.max_distance_km must be in (0, {}], got {}",
                MAX_SWEEP_DISTANCE_KM, max_km
            )));
        }

        Ok(())
    }

    /// Generate example configuration YAML.
    pub fn example_yaml() -> String {
        let config = Self {
            profiles: {
                let mut profiles = HashMap::new();
                profiles.insert(
                    "rural_700".to_string(),
                    LteParameters::builder()
                        .frequency(700.0)
                        .environment(Environment::Rural)
                        .tx_antenna_height(45.0)
                        .target_area(1500.0)
                        .build(),
                );
                profiles.insert(
                    "suburban_2600".to_string(),
                    LteParameters::builder()
                        .frequency(2600.0)
                        .environment(Environment::Suburban)
                        .build(),
                );
                profiles
            },
            ..Default::default()
        };

        serde_yaml::to_string(&config).unwrap_or_default()
    }
}
