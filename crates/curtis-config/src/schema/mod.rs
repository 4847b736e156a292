//! Configuration schema types for Curtis.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod api;
mod chat;
mod image;
mod system;

pub use api::*;
pub use chat::*;
pub use image::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Curtis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct CurtisConfig {
    pub api: ApiConfig,
    pub chat: ChatConfig,
    pub image: ImageConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_address() {
        let config = CurtisConfig::default();
        assert!(config.api.address.is_empty());
        assert!(!config.api.has_address());
        assert_eq!(config.api.api_key(), None);
    }

    #[test]
    fn default_config_has_correct_timeouts() {
        let config = CurtisConfig::default();
        assert_eq!(config.api.connect_timeout, 10);
        assert_eq!(config.api.generate_timeout, 30);
        assert_eq!(config.api.stream_timeout, 120);
    }

    #[test]
    fn default_config_has_correct_chat() {
        let config = CurtisConfig::default();
        assert_eq!(config.chat.memory_length, 50);
        assert_eq!(config.chat.max_response_tokens, 275);
        assert!(config.chat.streaming);
    }

    #[test]
    fn default_config_has_correct_image() {
        let config = CurtisConfig::default();
        assert_eq!(config.image.seed, 2);
        assert_eq!(config.image.num_inference_steps, 2);
        assert_eq!(config.image.timeout, 120);
    }

    #[test]
    fn default_log_level_is_info() {
        let config = CurtisConfig::default();
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.logging.level.as_filter(), "info");
    }

    #[test]
    fn blank_api_key_is_treated_as_absent() {
        let api = ApiConfig {
            api_key: "   ".into(),
            ..ApiConfig::default()
        };
        assert_eq!(api.api_key(), None);

        let api = ApiConfig {
            api_key: "secret".into(),
            ..ApiConfig::default()
        };
        assert_eq!(api.api_key(), Some("secret"));
    }

    #[test]
    fn api_key_is_redacted_in_debug() {
        let api = ApiConfig {
            api_key: "super-secret".into(),
            ..ApiConfig::default()
        };
        let debug = format!("{api:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn clamps_chat_ranges() {
        assert_eq!(clamp_memory_length(150), 99);
        assert_eq!(clamp_memory_length(0), 0);
        assert_eq!(clamp_max_response_tokens(10), 50);
        assert_eq!(clamp_max_response_tokens(9000), 500);
        assert_eq!(clamp_max_response_tokens(300), 300);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: CurtisConfig = toml::from_str(
            r#"
[chat]
streaming = false
"#,
        )
        .unwrap();
        assert!(!config.chat.streaming);
        assert_eq!(config.chat.memory_length, 50);
        assert_eq!(config.api.generate_timeout, 30);
    }

    #[test]
    fn log_level_parses_uppercase() {
        let config: CurtisConfig = toml::from_str(
            r#"
[logging]
level = "WARNING"
"#,
        )
        .unwrap();
        assert_eq!(config.logging.level, LogLevel::Warning);
        assert_eq!(config.logging.level.as_filter(), "warn");
    }
}
