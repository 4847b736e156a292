//! Curtis configuration system.
//!
//! TOML-based configuration for the inference backend connection, chat
//! memory, image generation and logging. All sections use defaults so a
//! partial (or missing) config file works out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use curtis_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("memory length: {}", config.chat.memory_length);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{CurtisConfig, CONFIG_SCHEMA_VERSION};

use curtis_common::ConfigError;
use std::path::Path;

/// Load config from `path`, or from the platform default path when `None`,
/// then apply environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<CurtisConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };
    toml_loader::apply_env_overrides(&mut config);
    Ok(config)
}

/// Serialize a config to TOML with the API key masked.
pub fn config_to_toml(config: &CurtisConfig) -> String {
    let mut shown = config.clone();
    if !shown.api.api_key.is_empty() {
        shown.api.api_key = "[REDACTED]".into();
    }
    toml::to_string_pretty(&shown)
        .unwrap_or_else(|e| format!("# failed to serialize config: {e}\n"))
}
