//! Conversation engine for Curtis.
//!
//! Provides:
//! - A bounded conversation memory and the Llama-style prompt template
//! - Cleanup of batch completions and streamed chunks
//! - `ConversationSession`, which drives one turn at a time
//! - HTTP clients for the Covalent text and text-to-image backends

pub mod covalent;
pub mod image;
pub mod memory;
pub mod normalize;
pub mod prompt;
pub mod session;

use async_trait::async_trait;
use futures_util::stream::BoxStream;

pub use covalent::{CovalentClient, CovalentConfig};
pub use image::{seeded_prompt, GeneratedImage, ImageClient, ImageSession};
pub use memory::MemoryBuffer;
pub use normalize::{normalize_batch_response, normalize_stream, normalize_stream_chunk};
pub use prompt::{PromptTemplate, TemplateError};
pub use session::{ChatSettings, ConversationSession};

/// Raw byte chunks of a streamed completion, in arrival order.
pub type ChunkStream = BoxStream<'static, Result<Vec<u8>, AiError>>;

/// Backend that turns a prompt into generated text.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Wait for the whole completion. The result still contains the echoed prompt.
    async fn generate(&self, request: &GenerateRequest) -> Result<String, AiError>;

    /// Start a streamed completion. Errors before the first byte are returned
    /// here; later transport errors arrive as items of the stream.
    async fn stream(&self, request: &GenerateRequest) -> Result<ChunkStream, AiError>;
}

/// Body of a `/generate` or `/stream` request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub max_new_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            content: content.into(),
        }
    }

    /// The line stored in conversation memory, e.g. `User: hi`.
    pub fn render(&self) -> String {
        format!("{}: {}", self.role.label(), self.content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Bot => "Bot",
        }
    }
}

/// Which request a failure came from, for picking the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Generate,
    Stream,
    Image,
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API address not configured")]
    MissingAddress,
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
}

impl AiError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AiError::Timeout
        } else if err.is_decode() {
            AiError::ParseError(err.to_string())
        } else {
            AiError::NetworkError(err.to_string())
        }
    }

    /// The single line shown to the user when a turn fails.
    pub fn user_message(&self, kind: RequestKind, address: &str) -> String {
        match self {
            AiError::MissingAddress => "Please provide an API address".to_string(),
            _ => match kind {
                RequestKind::Generate => "Failed to get response. Invalid address?".to_string(),
                RequestKind::Stream => "Failed to stream response. Invalid address?".to_string(),
                RequestKind::Image => format!("Failed to get image from '{}'", address.trim()),
            },
        }
    }
}
