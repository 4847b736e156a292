//! Covalent HTTP client: endpoint resolution, auth header, status checks.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};

use crate::AiError;

use super::config::CovalentConfig;

pub(crate) const GENERATE_PATH: &str = "/generate";
pub(crate) const STREAM_PATH: &str = "/stream";
pub(crate) const TEXT_TO_IMAGE_PATH: &str = "/text-to-image";

const API_KEY_HEADER: &str = "x-api-key";

/// Client for a Covalent-served text-generation backend.
pub struct CovalentClient {
    pub(crate) config: CovalentConfig,
    pub(crate) http: reqwest::Client,
}

impl CovalentClient {
    /// `stream_timeout` becomes the client's read timeout: a streamed reply
    /// may run as long as it likes but must not go silent for longer.
    pub fn new(config: CovalentConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.stream_timeout)
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &CovalentConfig {
        &self.config
    }

    /// Full URL for `path`, or `MissingAddress` if no address is set.
    pub(crate) fn endpoint(&self, path: &str) -> Result<String, AiError> {
        let address = self.config.address.trim();
        if address.is_empty() {
            return Err(AiError::MissingAddress);
        }
        Ok(format!("{}{path}", address.trim_end_matches('/')))
    }

    pub(crate) fn headers(&self) -> Result<HeaderMap, AiError> {
        let mut headers = HeaderMap::new();
        if let Some(ref key) = self.config.api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|_| AiError::ApiError("API key is not a valid header value".into()))?;
            headers.insert(API_KEY_HEADER, value);
        }
        Ok(headers)
    }

    /// Start a POST to `path` with auth headers. `total` caps the whole
    /// request, body included; without it only the idle limits apply.
    pub(crate) fn post(
        &self,
        path: &str,
        total: Option<Duration>,
    ) -> Result<reqwest::RequestBuilder, AiError> {
        let builder = self
            .http
            .post(self.endpoint(path)?)
            .headers(self.headers()?);
        Ok(match total {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        })
    }
}

/// Send a request and turn transport failures and non-2xx statuses into errors.
pub(crate) async fn send_checked(
    request: reqwest::RequestBuilder,
) -> Result<reqwest::Response, AiError> {
    let response = request.send().await.map_err(AiError::from_reqwest)?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let text = text.chars().take(200).collect::<String>();
        return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
    }
    Ok(response)
}
