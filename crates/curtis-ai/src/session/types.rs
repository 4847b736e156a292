//! Per-session settings.

use crate::memory::DEFAULT_MEMORY_LENGTH;

/// Per-session knobs supplied by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatSettings {
    /// Bound on rendered message lines kept in memory.
    pub memory_length: usize,
    /// Sent to the backend as `max_new_tokens`.
    pub max_response_tokens: u32,
    /// Use `/stream` instead of `/generate`.
    pub streaming: bool,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            memory_length: DEFAULT_MEMORY_LENGTH,
            max_response_tokens: 275,
            streaming: true,
        }
    }
}
