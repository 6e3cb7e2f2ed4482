pub mod credentials;
pub mod error;
pub mod persona;
pub mod profile;
pub mod responder;
pub mod sources;
pub mod transcript;
pub mod types;

pub use credentials::{CredentialSource, EnvCredentials, StaticCredentials};
pub use error::{ConfigError, Result};
pub use persona::Persona;
pub use profile::{Experience, Profile, Project};
pub use responder::{
    ChatResponder, ChatResponderBuilder, ModelTiers, Readiness, ResponseStream,
    GENERIC_ERROR_MESSAGE, MISSING_CREDENTIAL_MESSAGE,
};
pub use sources::SourceCollector;
pub use transcript::Transcript;
pub use types::{ChatMode, ChatRequest, ConversationMessage, GroundingSource, ResponseChunk, Sender};
