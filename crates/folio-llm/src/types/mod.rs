pub mod grounding;
pub mod request;
pub mod response;

pub use grounding::{GroundingChunk, GroundingMetadata, GroundingSupport, TextSegment, WebSource};
pub use request::{
    ContentBody, GenerateContentBody, GenerationConfig, PartBody, ThinkingConfig, ToolBody,
};
pub use response::{ApiErrorBody, Candidate, Content, GenerateChunk, Part, StreamPayload, UsageMetadata};
