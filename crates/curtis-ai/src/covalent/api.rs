//! InferenceClient implementation for CovalentClient (generate + stream).

use async_trait::async_trait;
use futures_util::{future, StreamExt};
use tracing::debug;

use crate::{AiError, ChunkStream, GenerateRequest, InferenceClient};

use super::client::{send_checked, CovalentClient, GENERATE_PATH, STREAM_PATH};

#[async_trait]
impl InferenceClient for CovalentClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, AiError> {
        let builder = self
            .post(GENERATE_PATH, Some(self.config.generate_timeout))?
            .json(request);

        debug!(
            address = %self.config.address.trim(),
            max_new_tokens = request.max_new_tokens,
            "Covalent generate request"
        );

        let response = send_checked(builder).await?;

        // The body is a bare JSON string holding the raw completion.
        response
            .json::<String>()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))
    }

    async fn stream(&self, request: &GenerateRequest) -> Result<ChunkStream, AiError> {
        let builder = self
            .post(STREAM_PATH, None)?
            .json(request);

        debug!(
            address = %self.config.address.trim(),
            max_new_tokens = request.max_new_tokens,
            "Covalent streaming request"
        );

        let response = send_checked(builder).await?;

        // The body is dead after a read error; end the stream there.
        Ok(response
            .bytes_stream()
            .scan(false, |failed, chunk| {
                if *failed {
                    return future::ready(None);
                }
                let item = chunk
                    .map(|bytes| bytes.to_vec())
                    .map_err(AiError::from_reqwest);
                *failed = item.is_err();
                future::ready(Some(item))
            })
            .boxed())
    }
}
