//! Text-to-image client.
//!
//! `POST /text-to-image` with `{"prompt": ..., "num_inference_steps": ...}`
//! returns a JSON string holding a base64-encoded image. The decoded bytes
//! are handed back untouched; Curtis never decodes the image itself.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use serde::Serialize;
use tracing::debug;

use crate::covalent::{send_checked, CovalentClient, CovalentConfig, TEXT_TO_IMAGE_PATH};
use crate::AiError;

/// Seed tag the image backend keys its randomness on.
pub const DEFAULT_SEED: u32 = 2;
pub const DEFAULT_INFERENCE_STEPS: u32 = 2;

/// Prefix `prompt` with a seed tag so identical prompts give identical images.
pub fn seeded_prompt(seed: u32, prompt: &str) -> String {
    format!("<random seed {seed}> {prompt}")
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    prompt: &'a str,
    num_inference_steps: u32,
}

/// Client for the text-to-image endpoint.
pub struct ImageClient {
    inner: CovalentClient,
    num_inference_steps: u32,
}

impl ImageClient {
    pub fn new(config: CovalentConfig) -> Result<Self, AiError> {
        Ok(Self {
            inner: CovalentClient::new(config)?,
            num_inference_steps: DEFAULT_INFERENCE_STEPS,
        })
    }

    pub fn with_inference_steps(mut self, steps: u32) -> Self {
        self.num_inference_steps = steps;
        self
    }

    pub fn address(&self) -> &str {
        &self.inner.config().address
    }

    /// Generate an image for `prompt` and return the decoded bytes.
    pub async fn text_to_image(&self, prompt: &str) -> Result<Vec<u8>, AiError> {
        let builder = self
            .inner
            .post(TEXT_TO_IMAGE_PATH, Some(self.inner.config().image_timeout))?
            .json(&ImageRequest {
                prompt,
                num_inference_steps: self.num_inference_steps,
            });

        debug!(
            address = %self.address().trim(),
            steps = self.num_inference_steps,
            "text-to-image request"
        );

        let response = send_checked(builder).await?;
        let payload: String = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        B64.decode(payload.trim())
            .map_err(|e| AiError::ParseError(format!("invalid base64 image: {e}")))
    }
}

/// An image returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// The prompt as the user typed it, without the seed tag.
    pub caption: String,
    pub bytes: Vec<u8>,
}

impl GeneratedImage {
    /// File extension guessed from the leading magic bytes.
    pub fn extension(&self) -> &'static str {
        match self.bytes.as_slice() {
            [0x89, b'P', b'N', b'G', ..] => "png",
            [0xFF, 0xD8, 0xFF, ..] => "jpg",
            [b'G', b'I', b'F', b'8', ..] => "gif",
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "webp",
            _ => "bin",
        }
    }
}

/// Remembers the last prompt so re-submitting it does not regenerate.
#[derive(Debug, Clone)]
pub struct ImageSession {
    seed: u32,
    last_prompt: Option<String>,
}

impl ImageSession {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            last_prompt: None,
        }
    }

    pub fn last_prompt(&self) -> Option<&str> {
        self.last_prompt.as_deref()
    }

    /// Generate an image unless `prompt` is blank or repeats the last
    /// successful one, in which case `Ok(None)` is returned. A failed request
    /// does not update the last prompt, so it can be retried.
    pub async fn generate(
        &mut self,
        client: &ImageClient,
        prompt: &str,
    ) -> Result<Option<GeneratedImage>, AiError> {
        let prompt = prompt.trim();
        if prompt.is_empty() || self.last_prompt.as_deref() == Some(prompt) {
            debug!("prompt unchanged, skipping image generation");
            return Ok(None);
        }

        let bytes = client
            .text_to_image(&seeded_prompt(self.seed, prompt))
            .await?;
        self.last_prompt = Some(prompt.to_string());

        Ok(Some(GeneratedImage {
            caption: prompt.to_string(),
            bytes,
        }))
    }
}

impl Default for ImageSession {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
