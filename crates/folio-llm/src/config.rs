// Configuration layer for the Gemini client

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for the hosted generative-content API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Base URL up to and including the API version segment
    pub base_url: String,
    pub connect_timeout_secs: u64,
    /// Longest tolerated gap between two streamed chunks
    pub idle_timeout_secs: u64,
    /// Wait for the first chunk of a request with a thinking budget; the
    /// model streams nothing while it reasons
    pub first_chunk_timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: 10,
            idle_timeout_secs: 60,
            first_chunk_timeout_secs: 600,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_idle_timeout(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }

    pub fn with_first_chunk_timeout(mut self, secs: u64) -> Self {
        self.first_chunk_timeout_secs = secs;
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Never shorter than the idle timeout
    pub fn first_chunk_timeout(&self) -> Duration {
        Duration::from_secs(self.first_chunk_timeout_secs.max(self.idle_timeout_secs))
    }
}

/// Factory for creating content clients from configuration
pub struct ClientFactory;

impl ClientFactory {
    pub fn create_client(config: GeminiConfig) -> Result<Arc<dyn crate::traits::ContentClient>> {
        let client = crate::gemini::GeminiClient::with_config(config)?;
        Ok(Arc::new(client))
    }
}
