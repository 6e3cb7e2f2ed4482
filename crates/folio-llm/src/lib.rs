pub mod types;
pub mod traits;
pub mod config;
pub mod streaming;
pub mod buffer_utils;
pub mod gemini;

pub use traits::{ContentClient, ContentStream, GenerateOptions, GenerateRequest};

pub use config::{ClientFactory, GeminiConfig};
pub use streaming::{with_chunk_timeouts, with_idle_timeout, GeminiChunkParser};
pub use buffer_utils::CircularLineBuffer;
pub use gemini::GeminiClient;
pub use types::{
    ApiErrorBody, Candidate, GenerateChunk, GenerateContentBody, GroundingChunk,
    GroundingMetadata, UsageMetadata, WebSource,
};
