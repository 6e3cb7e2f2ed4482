use chrono::{DateTime, Utc};
use folio_llm::WebSource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which model tier answers a request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    /// Faster tier with live web-search grounding
    #[default]
    Fast,
    /// Higher tier with an extended reasoning budget and no web search
    DeepThought,
}

impl ChatMode {
    pub fn is_deep_thought(self) -> bool {
        matches!(self, ChatMode::DeepThought)
    }
}

impl From<bool> for ChatMode {
    fn from(is_deep_thought: bool) -> Self {
        if is_deep_thought {
            ChatMode::DeepThought
        } else {
            ChatMode::Fast
        }
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatMode::Fast => write!(f, "fast"),
            ChatMode::DeepThought => write!(f, "deep thought"),
        }
    }
}

/// One user-submitted question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub prompt: String,
    pub mode: ChatMode,
}

impl ChatRequest {
    pub fn new(prompt: impl Into<String>, mode: ChatMode) -> Self {
        Self {
            prompt: prompt.into(),
            mode,
        }
    }

    pub fn fast(prompt: impl Into<String>) -> Self {
        Self::new(prompt, ChatMode::Fast)
    }

    pub fn deep_thought(prompt: impl Into<String>) -> Self {
        Self::new(prompt, ChatMode::DeepThought)
    }
}

/// A citation backing a grounded answer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroundingSource {
    pub uri: String,
    pub title: String,
}

impl GroundingSource {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
        }
    }

    /// Accept a provider citation only when both uri and title are present
    pub fn from_candidate(candidate: WebSource) -> Option<Self> {
        match (candidate.uri, candidate.title) {
            (Some(uri), Some(title)) if !uri.is_empty() && !title.is_empty() => {
                Some(Self { uri, title })
            }
            _ => None,
        }
    }
}

/// One increment of a streamed answer
///
/// Serializes as `{"text": "..."}` or `{"sources": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseChunk {
    Text(String),
    Sources(Vec<GroundingSource>),
}

impl ResponseChunk {
    pub fn text(text: impl Into<String>) -> Self {
        ResponseChunk::Text(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseChunk::Text(text) => Some(text),
            ResponseChunk::Sources(_) => None,
        }
    }

    pub fn as_sources(&self) -> Option<&[GroundingSource]> {
        match self {
            ResponseChunk::Sources(sources) => Some(sources),
            ResponseChunk::Text(_) => None,
        }
    }

    pub fn is_sources(&self) -> bool {
        matches!(self, ResponseChunk::Sources(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One rendered turn of a transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: uuid::Uuid,
    pub sender: Sender,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<GroundingSource>>,
    pub created_at: DateTime<Utc>,
}

impl ConversationMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            sender,
            text: text.into(),
            sources: None,
            created_at: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(ChatMode::from(true), ChatMode::DeepThought);
        assert_eq!(ChatMode::from(false), ChatMode::Fast);
        assert!(ChatMode::DeepThought.is_deep_thought());
        assert_eq!(ChatMode::default(), ChatMode::Fast);
    }

    #[test]
    fn test_chunk_wire_shape() {
        let text = serde_json::to_value(ResponseChunk::text("Hi")).unwrap();
        assert_eq!(text, serde_json::json!({"text": "Hi"}));

        let sources = serde_json::to_value(ResponseChunk::Sources(vec![GroundingSource::new(
            "https://a.example",
            "A",
        )]))
        .unwrap();
        assert_eq!(
            sources,
            serde_json::json!({"sources": [{"uri": "https://a.example", "title": "A"}]})
        );
    }

    #[test]
    fn test_candidate_requires_uri_and_title() {
        assert!(GroundingSource::from_candidate(WebSource::new("https://a.example", "A")).is_some());
        assert!(GroundingSource::from_candidate(WebSource::new("", "A")).is_none());
        assert!(GroundingSource::from_candidate(WebSource::new("https://a.example", "")).is_none());
        assert!(GroundingSource::from_candidate(WebSource {
            uri: Some("https://a.example".into()),
            title: None,
        })
        .is_none());
    }
}
