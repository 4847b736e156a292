//! Async turn methods for ConversationSession (batch + streaming).

use futures_util::StreamExt;
use tracing::{debug, warn};

use crate::normalize::{normalize_batch_response, normalize_stream};
use crate::{AiError, InferenceClient};

use super::manager::ConversationSession;

impl ConversationSession {
    /// Send `user_text` and wait for the whole reply.
    ///
    /// On failure, or if the future is dropped, nothing is recorded.
    pub async fn chat(
        &mut self,
        client: &dyn InferenceClient,
        user_text: &str,
    ) -> Result<String, AiError> {
        let request = self.build_request(user_text);
        debug!(
            session = %self.id,
            prompt_len = request.prompt.len(),
            max_new_tokens = request.max_new_tokens,
            "batch turn"
        );

        let raw = client.generate(&request).await?;
        let reply = normalize_batch_response(&raw, self.template.closing_marker());

        self.complete_turn(user_text, &reply);
        Ok(reply)
    }

    /// Send `user_text` and forward each cleaned chunk to `on_chunk` as soon
    /// as it arrives. Returns the concatenated reply.
    ///
    /// If the stream breaks after some text was forwarded, that text stands
    /// and is recorded as the reply. A stream that fails before producing
    /// anything is reported as an error.
    pub async fn chat_streaming(
        &mut self,
        client: &dyn InferenceClient,
        user_text: &str,
        mut on_chunk: impl FnMut(&str) + Send,
    ) -> Result<String, AiError> {
        let request = self.build_request(user_text);
        debug!(
            session = %self.id,
            prompt_len = request.prompt.len(),
            max_new_tokens = request.max_new_tokens,
            "streaming turn"
        );

        let mut chunks = normalize_stream(client.stream(&request).await?);

        let mut reply = String::new();
        while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(text) => {
                    on_chunk(&text);
                    reply.push_str(&text);
                }
                Err(e) if reply.is_empty() => return Err(e),
                Err(e) => {
                    warn!(session = %self.id, "stream ended early: {e}");
                    break;
                }
            }
        }

        self.complete_turn(user_text, &reply);
        Ok(reply)
    }

    /// Run one turn in the configured mode. In batch mode the finished reply
    /// is passed to `on_chunk` once, so callers can render both modes alike.
    pub async fn respond(
        &mut self,
        client: &dyn InferenceClient,
        user_text: &str,
        mut on_chunk: impl FnMut(&str) + Send,
    ) -> Result<String, AiError> {
        if self.settings.streaming {
            self.chat_streaming(client, user_text, on_chunk).await
        } else {
            let reply = self.chat(client, user_text).await?;
            if !reply.is_empty() {
                on_chunk(&reply);
            }
            Ok(reply)
        }
    }
}
