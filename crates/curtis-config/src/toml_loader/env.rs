//! Environment variable overrides for connection settings.

use crate::schema::CurtisConfig;
use tracing::debug;

pub const ENV_API_ADDRESS: &str = "CURTIS_API_ADDRESS";
pub const ENV_API_KEY: &str = "CURTIS_API_KEY";

/// Apply `CURTIS_API_ADDRESS` / `CURTIS_API_KEY` from the process environment.
pub fn apply_env_overrides(config: &mut CurtisConfig) {
    apply_env_overrides_from(config, |key| std::env::var(key).ok());
}

/// Apply overrides using an arbitrary variable lookup. Empty values are ignored.
pub fn apply_env_overrides_from(
    config: &mut CurtisConfig,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(address) = lookup(ENV_API_ADDRESS).filter(|v| !v.trim().is_empty()) {
        debug!("api.address overridden by {ENV_API_ADDRESS}");
        config.api.address = address;
    }
    if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
        debug!("api.api_key overridden by {ENV_API_KEY}");
        config.api.api_key = key;
    }
}
