use folio_llm::{ContentClient, GenerateOptions, GenerateRequest};
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use std::sync::Arc;

use crate::credentials::{CredentialSource, EnvCredentials};
use crate::error::{ConfigError, Result};
use crate::persona::Persona;
use crate::sources::SourceCollector;
use crate::types::{ChatMode, ChatRequest, ResponseChunk};

pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "The API key is missing. Please configure it to use the AI chat feature.";

pub const GENERIC_ERROR_MESSAGE: &str = "Sorry, I encountered an error. Please try again later.";

/// Lazy, finite answer sequence for one request
pub type ResponseStream = Pin<Box<dyn Stream<Item = ResponseChunk> + Send>>;

/// Model selection per mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelTiers {
    pub fast_model: String,
    pub deep_model: String,
    /// Reasoning allowance granted in deep-thought mode
    pub thinking_budget: u32,
}

impl Default for ModelTiers {
    fn default() -> Self {
        Self {
            fast_model: "gemini-2.5-flash".to_string(),
            deep_model: "gemini-2.5-pro".to_string(),
            thinking_budget: 32768,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Readiness {
    Ready,
    MissingCredential { source: String },
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

/// Turns a prompt into a stream of text fragments followed by at most one
/// deduplicated source batch
///
/// Cheap to clone; every invocation is independent and holds no shared
/// mutable state.
#[derive(Clone)]
pub struct ChatResponder {
    client: Arc<dyn ContentClient>,
    credentials: Arc<dyn CredentialSource>,
    system_instruction: Arc<str>,
    tiers: ModelTiers,
}

impl ChatResponder {
    pub fn builder() -> ChatResponderBuilder {
        ChatResponderBuilder::default()
    }

    pub fn tiers(&self) -> &ModelTiers {
        &self.tiers
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Whether a request made now would reach the provider
    pub fn readiness(&self) -> Readiness {
        match resolve_api_key(self.credentials.as_ref()) {
            Some(_) => Readiness::Ready,
            None => Readiness::MissingCredential {
                source: self.credentials.describe(),
            },
        }
    }

    pub fn generate(&self, prompt: impl Into<String>, is_deep_thought: bool) -> ResponseStream {
        self.respond(ChatRequest::new(prompt, ChatMode::from(is_deep_thought)))
    }

    /// Upstream call for a request: deep thought gets the higher tier and a
    /// thinking budget, fast gets web search. Never both.
    pub fn upstream_request(&self, request: &ChatRequest) -> GenerateRequest {
        let (model, options) = match request.mode {
            ChatMode::DeepThought => (
                self.tiers.deep_model.as_str(),
                GenerateOptions::new().thinking_budget(self.tiers.thinking_budget),
            ),
            ChatMode::Fast => (
                self.tiers.fast_model.as_str(),
                GenerateOptions::new().google_search(true),
            ),
        };

        GenerateRequest::new(model, request.prompt.clone())
            .with_system_instruction(self.system_instruction.to_string())
            .with_options(options)
    }

    /// Stream the answer to `request`
    ///
    /// Nothing happens until the stream is polled. Upstream failures are
    /// turned into a final apology fragment; the stream itself never errors.
    /// Dropping the stream early closes the upstream connection.
    pub fn respond(&self, request: ChatRequest) -> ResponseStream {
        let client = Arc::clone(&self.client);
        let credentials = Arc::clone(&self.credentials);
        let upstream_request = self.upstream_request(&request);
        let mode = request.mode;

        Box::pin(async_stream::stream! {
            let Some(api_key) = resolve_api_key(credentials.as_ref()) else {
                tracing::warn!(source = %credentials.describe(), "API key not configured, skipping request");
                yield ResponseChunk::text(MISSING_CREDENTIAL_MESSAGE);
                return;
            };

            tracing::debug!(
                mode = %mode,
                model = %upstream_request.model,
                prompt_len = upstream_request.prompt.len(),
                "Generating chat response"
            );

            let mut upstream = match client.stream_generate(&api_key, upstream_request).await {
                Ok(upstream) => upstream,
                Err(e) => {
                    tracing::error!("Error generating chat response: {:#}", e);
                    yield ResponseChunk::text(GENERIC_ERROR_MESSAGE);
                    return;
                }
            };

            let mut sources = SourceCollector::new();
            let mut fragments = 0usize;

            while let Some(item) = upstream.next().await {
                match item {
                    Ok(chunk) => {
                        if let Some(text) = chunk.text().filter(|t| !t.is_empty()) {
                            fragments += 1;
                            yield ResponseChunk::Text(text);
                        }
                        sources.extend(chunk.grounding_sources());
                    }
                    Err(e) => {
                        tracing::error!(fragments, "Error generating chat response: {:#}", e);
                        yield ResponseChunk::text(GENERIC_ERROR_MESSAGE);
                        return;
                    }
                }
            }

            tracing::debug!(fragments, sources = sources.len(), "Chat response complete");

            if let Some(batch) = sources.finish() {
                yield ResponseChunk::Sources(batch);
            }
        })
    }
}

fn resolve_api_key(credentials: &dyn CredentialSource) -> Option<String> {
    credentials.api_key().filter(|key| !key.trim().is_empty())
}

#[derive(Default)]
pub struct ChatResponderBuilder {
    client: Option<Arc<dyn ContentClient>>,
    credentials: Option<Arc<dyn CredentialSource>>,
    persona: Option<Persona>,
    tiers: Option<ModelTiers>,
}

impl ChatResponderBuilder {
    pub fn client(mut self, client: Arc<dyn ContentClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn credentials(mut self, credentials: impl CredentialSource + 'static) -> Self {
        self.credentials = Some(Arc::new(credentials));
        self
    }

    pub fn persona(mut self, persona: Persona) -> Self {
        self.persona = Some(persona);
        self
    }

    pub fn tiers(mut self, tiers: ModelTiers) -> Self {
        self.tiers = Some(tiers);
        self
    }

    /// Credentials default to the `API_KEY` environment variable, the persona
    /// and tiers to their built-ins
    pub fn build(self) -> Result<ChatResponder> {
        let client = self.client.ok_or(ConfigError::MissingField("client"))?;
        let persona = self.persona.unwrap_or_default();

        Ok(ChatResponder {
            client,
            credentials: self
                .credentials
                .unwrap_or_else(|| Arc::new(EnvCredentials::default()) as Arc<dyn CredentialSource>),
            system_instruction: Arc::from(persona.system_instruction()),
            tiers: self.tiers.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::StaticCredentials;
    use async_trait::async_trait;
    use folio_llm::ContentStream;

    struct UnreachableClient;

    #[async_trait]
    impl ContentClient for UnreachableClient {
        async fn stream_generate(&self, _: &str, _: GenerateRequest) -> anyhow::Result<ContentStream> {
            anyhow::bail!("unreachable")
        }
    }

    fn responder(credentials: StaticCredentials) -> ChatResponder {
        ChatResponder::builder()
            .client(Arc::new(UnreachableClient))
            .credentials(credentials)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_client() {
        let err = ChatResponder::builder().build().err().unwrap();
        assert!(matches!(err, ConfigError::MissingField("client")));
    }

    #[test]
    fn test_readiness() {
        assert_eq!(responder(StaticCredentials::new("k")).readiness(), Readiness::Ready);

        let readiness = responder(StaticCredentials::new("   ")).readiness();
        assert!(!readiness.is_ready());
        assert_eq!(
            readiness,
            Readiness::MissingCredential {
                source: "static credential".to_string()
            }
        );
    }

    #[test]
    fn test_upstream_request_modes() {
        let responder = responder(StaticCredentials::new("k"));

        let deep = responder.upstream_request(&ChatRequest::deep_thought("why?"));
        assert_eq!(deep.model, "gemini-2.5-pro");
        assert_eq!(deep.options.thinking_budget, Some(32768));
        assert!(!deep.options.google_search);

        let fast = responder.upstream_request(&ChatRequest::fast("what?"));
        assert_eq!(fast.model, "gemini-2.5-flash");
        assert_eq!(fast.options.thinking_budget, None);
        assert!(fast.options.google_search);
        assert_eq!(fast.system_instruction.as_deref(), Some(responder.system_instruction()));
    }

    #[test]
    fn test_readiness_serialization() {
        let json = serde_json::to_value(Readiness::MissingCredential {
            source: "environment variable API_KEY".into(),
        })
        .unwrap();

        assert_eq!(json["status"], "missing_credential");
        assert_eq!(json["source"], "environment variable API_KEY");
    }
}
