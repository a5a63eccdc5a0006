// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::batch::ExportOptions;
use crate::imaging::QualitySettings;
use crate::watermark::{
    AssetError, ConfigResolver, LogoAssets, WatermarkConfig, MAX_OPACITY_PCT, MAX_SCALE_PCT,
    MIN_SCALE_PCT,
};

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Environment variable '{0}' is referenced but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Settings for images without an override
    #[serde(default)]
    pub defaults: WatermarkConfig,

    /// Per-identifier settings
    #[serde(default)]
    pub overrides: HashMap<String, WatermarkConfig>,

    #[serde(default)]
    pub export: ExportOptions,

    #[serde(default)]
    pub quality: QualitySettings,
}

/// Locations of the two logo variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetsConfig {
    #[serde(default = "default_light_logo")]
    pub light: PathBuf,

    #[serde(default = "default_dark_logo")]
    pub dark: PathBuf,
}

fn default_light_logo() -> PathBuf {
    PathBuf::from("logo_light.png")
}

fn default_dark_logo() -> PathBuf {
    PathBuf::from("logo_dark.png")
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            light: default_light_logo(),
            dark: default_dark_logo(),
        }
    }
}

impl AppConfig {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, ConfigError> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        let mut values = HashMap::new();
        for caps in re.captures_iter(yaml) {
            let var_name = caps[1].to_string();
            let value = std::env::var(&var_name)
                .map_err(|_| ConfigError::MissingEnvVar(var_name.clone()))?;
            values.insert(var_name, value);
        }

        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            values.get(&caps[1]).cloned().unwrap_or_default()
        });

        serde_yaml::from_str(&substituted).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.assets.light.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("assets.light cannot be empty".to_string()));
        }
        if self.assets.dark.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("assets.dark cannot be empty".to_string()));
        }

        validate_watermark("defaults", &self.defaults)?;
        for (identifier, config) in &self.overrides {
            validate_watermark(&format!("overrides.{}", identifier), config)?;
        }

        self.export.validate().map_err(ConfigError::Invalid)?;
        self.quality.validate().map_err(ConfigError::Invalid)?;

        Ok(())
    }

    /// Resolver seeded with the configured defaults and overrides
    pub fn resolver(&self) -> ConfigResolver {
        ConfigResolver::with_overrides(self.defaults, self.overrides.clone())
    }

    pub fn load_assets(&self) -> Result<LogoAssets, AssetError> {
        LogoAssets::load(&self.assets.light, &self.assets.dark)
    }
}

fn validate_watermark(section: &str, config: &WatermarkConfig) -> Result<(), ConfigError> {
    if config.opacity > MAX_OPACITY_PCT {
        return Err(ConfigError::Invalid(format!(
            "{}.opacity must be between 0 and {}, got {}",
            section, MAX_OPACITY_PCT, config.opacity
        )));
    }
    if !(MIN_SCALE_PCT..=MAX_SCALE_PCT).contains(&config.scale) {
        return Err(ConfigError::Invalid(format!(
            "{}.scale must be between {} and {}, got {}",
            section, MIN_SCALE_PCT, MAX_SCALE_PCT, config.scale
        )));
    }
    Ok(())
}
