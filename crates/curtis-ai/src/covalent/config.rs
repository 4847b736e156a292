//! Covalent backend client configuration.

use std::fmt;
use std::time::Duration;

/// Connection settings shared by the text and image clients.
#[derive(Clone)]
pub struct CovalentConfig {
    /// Base URL of the deployed service. May be empty until the user sets it.
    pub address: String,
    pub api_key: Option<String>,
    pub connect_timeout: Duration,
    pub generate_timeout: Duration,
    pub stream_timeout: Duration,
    pub image_timeout: Duration,
}

impl fmt::Debug for CovalentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CovalentConfig")
            .field("address", &self.address)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("connect_timeout", &self.connect_timeout)
            .field("generate_timeout", &self.generate_timeout)
            .field("stream_timeout", &self.stream_timeout)
            .field("image_timeout", &self.image_timeout)
            .finish()
    }
}

impl CovalentConfig {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            api_key: None,
            connect_timeout: Duration::from_secs(10),
            generate_timeout: Duration::from_secs(30),
            stream_timeout: Duration::from_secs(120),
            image_timeout: Duration::from_secs(120),
        }
    }

    /// Set the `x-api-key` value. Blank keys are ignored.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.api_key = (!key.trim().is_empty()).then(|| key.trim().to_string());
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_generate_timeout(mut self, timeout: Duration) -> Self {
        self.generate_timeout = timeout;
        self
    }

    pub fn with_stream_timeout(mut self, timeout: Duration) -> Self {
        self.stream_timeout = timeout;
        self
    }

    pub fn with_image_timeout(mut self, timeout: Duration) -> Self {
        self.image_timeout = timeout;
        self
    }
}
