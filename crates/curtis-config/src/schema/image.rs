//! Image generation settings.

use serde::{Deserialize, Serialize};

/// Text-to-image configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Seed tag prepended to every prompt so repeated prompts match.
    pub seed: u32,
    /// Diffusion steps requested from the backend (valid range: 1-50).
    pub num_inference_steps: u32,
    /// Seconds allowed for the backend to return an image.
    pub timeout: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            seed: 2,
            num_inference_steps: 2,
            timeout: 120,
        }
    }
}
