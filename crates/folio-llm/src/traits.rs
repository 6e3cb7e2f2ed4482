use crate::types::GenerateChunk;
use anyhow::Result;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// Incremental chunks of one `streamGenerateContent` call.
pub type ContentStream = Pin<Box<dyn Stream<Item = Result<GenerateChunk>> + Send>>;

/// Trait for streaming content generation against a hosted model
///
/// The credential is passed per call so callers can resolve it lazily
/// (and react to it being absent) without rebuilding the client.
#[async_trait]
pub trait ContentClient: Send + Sync {
    /// Open one streaming generation call
    ///
    /// Errors raised before the first chunk (connection refused, non-2xx
    /// status) are returned directly; errors after that arrive as `Err`
    /// items inside the stream.
    async fn stream_generate(&self, api_key: &str, request: GenerateRequest) -> Result<ContentStream>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub system_instruction: Option<String>,
    pub prompt: String,
    pub options: GenerateOptions,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_instruction: None,
            prompt: prompt.into(),
            options: GenerateOptions::default(),
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOptions {
    /// Internal reasoning allowance in tokens (`thinkingConfig.thinkingBudget`)
    pub thinking_budget: Option<u32>,
    /// Attach the `googleSearch` grounding tool
    pub google_search: bool,
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thinking_budget(mut self, budget: u32) -> Self {
        self.thinking_budget = Some(budget);
        self
    }

    pub fn google_search(mut self, enabled: bool) -> Self {
        self.google_search = enabled;
        self
    }
}
