//! Chat session settings.

use serde::{Deserialize, Serialize};

pub const MEMORY_LENGTH_MIN: u32 = 0;
pub const MEMORY_LENGTH_MAX: u32 = 99;
pub const MAX_RESPONSE_TOKENS_MIN: u32 = 50;
pub const MAX_RESPONSE_TOKENS_MAX: u32 = 500;

/// Chat configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Number of rendered message lines kept in the prompt (valid range: 0-99).
    pub memory_length: u32,
    /// Upper bound on generated tokens per reply (valid range: 50-500).
    pub max_response_tokens: u32,
    /// Stream replies chunk by chunk instead of waiting for the full text.
    pub streaming: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            memory_length: 50,
            max_response_tokens: 275,
            streaming: true,
        }
    }
}

/// Clamp a memory length into the accepted range.
pub fn clamp_memory_length(value: u32) -> u32 {
    value.clamp(MEMORY_LENGTH_MIN, MEMORY_LENGTH_MAX)
}

/// Clamp a token limit into the accepted range.
pub fn clamp_max_response_tokens(value: u32) -> u32 {
    value.clamp(MAX_RESPONSE_TOKENS_MIN, MAX_RESPONSE_TOKENS_MAX)
}
