//! Inference backend connection settings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the backend lives and how to authenticate with it.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the backend, e.g. `https://host:port`. Empty until set.
    pub address: String,
    /// Sent as `x-api-key` when non-empty.
    pub api_key: String,
    /// Seconds allowed to establish a connection.
    pub connect_timeout: u32,
    /// Seconds allowed for a full `/generate` round trip.
    pub generate_timeout: u32,
    /// Seconds a response may go without sending data. A streamed reply
    /// can run longer than this as long as tokens keep arriving.
    pub stream_timeout: u32,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("address", &self.address)
            .field("api_key", &"[REDACTED]")
            .field("connect_timeout", &self.connect_timeout)
            .field("generate_timeout", &self.generate_timeout)
            .field("stream_timeout", &self.stream_timeout)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            api_key: String::new(),
            connect_timeout: 10,
            generate_timeout: 30,
            stream_timeout: 120,
        }
    }
}

impl ApiConfig {
    /// The API key, if one is configured.
    pub fn api_key(&self) -> Option<&str> {
        let key = self.api_key.trim();
        (!key.is_empty()).then_some(key)
    }

    pub fn has_address(&self) -> bool {
        !self.address.trim().is_empty()
    }
}
