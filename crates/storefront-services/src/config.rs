//! # Rules Config Loading
//!
//! Locates, reads and persists `rules.toml`.
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌──────────────┐   ┌───────────────────────┐   ┌───────────────────┐   ┌──────────┐
//! │  Defaults    │ → │  rules.toml           │ → │  STOREFRONT_* env │ → │ validate │
//! │  (core)      │   │  (explicit or         │   │  overrides        │   │          │
//! │              │   │   ProjectDirs path)   │   │                   │   │          │
//! └──────────────┘   └───────────────────────┘   └───────────────────┘   └──────────┘
//! ```
//!
//! ## Environment Variables
//! | Variable                       | Field                         |
//! |--------------------------------|-------------------------------|
//! | `STOREFRONT_HOLIDAY_DISCOUNT`  | `promotion.discount`          |
//! | `STOREFRONT_OPEN_HOUR`         | `hours.open_hour`             |
//! | `STOREFRONT_CLOSE_HOUR`        | `hours.close_hour`            |

use std::path::{Path, PathBuf};

use storefront_core::RulesConfig;
use tracing::{debug, info, warn};

use crate::error::{ServiceError, ServiceResult};

pub const ENV_HOLIDAY_DISCOUNT: &str = "STOREFRONT_HOLIDAY_DISCOUNT";
pub const ENV_OPEN_HOUR: &str = "STOREFRONT_OPEN_HOUR";
pub const ENV_CLOSE_HOUR: &str = "STOREFRONT_CLOSE_HOUR";

/// Loads the rules config from file, environment and defaults.
///
/// A missing file is not an error; the defaults are used instead.
pub fn load(config_path: Option<PathBuf>) -> ServiceResult<RulesConfig> {
    load_with(config_path, |key| std::env::var(key).ok())
}

/// Same as [`load`] but reads overrides through `lookup`.
pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> ServiceResult<RulesConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = RulesConfig::default();

    if let Some(path) = config_path.or_else(default_config_path) {
        if path.exists() {
            info!(?path, "Loading rules config from file");
            config = read_file(&path)?;
        } else {
            debug!(?path, "Rules config not found, using defaults");
        }
    }

    apply_env_overrides(&mut config, lookup);

    config.validate()?;

    Ok(config)
}

/// Loads the config, falling back to defaults on any failure.
pub fn load_or_default(config_path: Option<PathBuf>) -> RulesConfig {
    load(config_path).unwrap_or_else(|e| {
        warn!("Failed to load rules config: {}. Using defaults.", e);
        RulesConfig::default()
    })
}

/// Writes the config as pretty TOML, creating parent directories.
pub fn save(config: &RulesConfig, config_path: Option<PathBuf>) -> ServiceResult<()> {
    let path = config_path
        .or_else(default_config_path)
        .ok_or_else(|| ServiceError::ConfigLoadFailed("No config path available".into()))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(&path, config.to_toml_string()?)?;

    info!(?path, "Rules config saved");
    Ok(())
}

/// Platform config path for `rules.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "storefront", "rules")
        .map(|dirs| dirs.config_dir().join("rules.toml"))
}

/// Applies `STOREFRONT_*` overrides. Unparseable values are ignored.
pub fn apply_env_overrides<F>(config: &mut RulesConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(ENV_HOLIDAY_DISCOUNT) {
        match value.parse::<f64>() {
            Ok(discount) => {
                debug!(discount, "Overriding holiday discount from environment");
                config.promotion.discount = discount;
            }
            Err(_) => warn!(value = %value, "Ignoring unparseable {}", ENV_HOLIDAY_DISCOUNT),
        }
    }

    if let Some(value) = lookup(ENV_OPEN_HOUR) {
        match value.parse::<u32>() {
            Ok(hour) => {
                debug!(hour, "Overriding opening hour from environment");
                config.hours.open_hour = hour;
            }
            Err(_) => warn!(value = %value, "Ignoring unparseable {}", ENV_OPEN_HOUR),
        }
    }

    if let Some(value) = lookup(ENV_CLOSE_HOUR) {
        match value.parse::<u32>() {
            Ok(hour) => {
                debug!(hour, "Overriding closing hour from environment");
                config.hours.close_hour = hour;
            }
            Err(_) => warn!(value = %value, "Ignoring unparseable {}", ENV_CLOSE_HOUR),
        }
    }
}

fn read_file(path: &Path) -> ServiceResult<RulesConfig> {
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents).map_err(storefront_core::ConfigError::from)?)
}
