//! Full configuration validation.
//!
//! Checks numeric ranges and the shape of the API address, collecting
//! every problem into a single `ConfigError`.

mod helpers;


use crate::schema::{
    CurtisConfig, MAX_RESPONSE_TOKENS_MAX, MAX_RESPONSE_TOKENS_MIN, MEMORY_LENGTH_MAX,
    MEMORY_LENGTH_MIN,
};
use curtis_common::ConfigError;

use helpers::validate_range;

/// Run all validations on a config, collecting all errors.
///
/// A missing API address is not an error here: it is reported when a
/// request is attempted, so the rest of the config stays usable.
pub fn validate(config: &CurtisConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_api(&mut errors, config);
    validate_chat(&mut errors, config);
    validate_image(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_api(errors: &mut Vec<String>, config: &CurtisConfig) {
    let address = config.api.address.trim();
    if !address.is_empty() && !(address.starts_with("http://") || address.starts_with("https://"))
    {
        errors.push(format!(
            "api.address = {address:?} must start with http:// or https://"
        ));
    }
    validate_range(errors, "api.connect_timeout", config.api.connect_timeout, 1, 300);
    validate_range(errors, "api.generate_timeout", config.api.generate_timeout, 1, 3600);
    validate_range(errors, "api.stream_timeout", config.api.stream_timeout, 1, 3600);
}

fn validate_chat(errors: &mut Vec<String>, config: &CurtisConfig) {
    validate_range(
        errors,
        "chat.memory_length",
        config.chat.memory_length,
        MEMORY_LENGTH_MIN,
        MEMORY_LENGTH_MAX,
    );
    validate_range(
        errors,
        "chat.max_response_tokens",
        config.chat.max_response_tokens,
        MAX_RESPONSE_TOKENS_MIN,
        MAX_RESPONSE_TOKENS_MAX,
    );
}

fn validate_image(errors: &mut Vec<String>, config: &CurtisConfig) {
    validate_range(
        errors,
        "image.num_inference_steps",
        config.image.num_inference_steps,
        1,
        50,
    );
    validate_range(errors, "image.timeout", config.image.timeout, 1, 3600);
}
