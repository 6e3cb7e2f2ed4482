// Gemini-specific client implementation

use crate::config::GeminiConfig;
use crate::streaming::{parse_gemini_stream, with_chunk_timeouts};
use crate::traits::{ContentClient, ContentStream, GenerateRequest};
use crate::types::GenerateContentBody;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::time::Duration;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini client (HTTP direct, no SDK)
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http_client: reqwest::Client,
    base_url: String,
    idle_timeout: Duration,
    first_chunk_timeout: Duration,
}

impl GeminiClient {
    /// Client against the public endpoint with default timeouts
    pub fn new() -> Result<Self> {
        Self::with_config(GeminiConfig::default())
    }

    pub fn with_config(config: GeminiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            idle_timeout: config.idle_timeout(),
            first_chunk_timeout: config.first_chunk_timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn stream_url(&self, model: &str) -> String {
        format!("{}/models/{}:streamGenerateContent", self.base_url, model)
    }

    /// Thinking requests stay silent until reasoning ends
    fn first_chunk_timeout(&self, request: &GenerateRequest) -> Duration {
        match request.options.thinking_budget {
            Some(_) => self.first_chunk_timeout,
            None => self.idle_timeout,
        }
    }
}

#[async_trait]
impl ContentClient for GeminiClient {
    async fn stream_generate(&self, api_key: &str, request: GenerateRequest) -> Result<ContentStream> {
        let body = GenerateContentBody::from(&request);
        let api_key = HeaderValue::from_str(api_key).context("Invalid API key format")?;

        tracing::debug!(
            model = %request.model,
            google_search = request.options.google_search,
            thinking_budget = ?request.options.thinking_budget,
            "Opening generation stream"
        );

        let response = self
            .http_client
            .post(self.stream_url(&request.model))
            .query(&[("alt", "sse")])
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error ({}): {}", status, error_text);
        }

        let first_chunk_timeout = self.first_chunk_timeout(&request);
        let chunks = parse_gemini_stream(response.bytes_stream());
        Ok(with_chunk_timeouts(chunks, first_chunk_timeout, self.idle_timeout))
    }
}
