use config::{Config as ConfigLoader, ConfigError, Environment, File};
use folio_chat::ModelTiers;
use folio_llm::GeminiConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub persona: PersonaConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    /// Variable holding the API key; read on every request, never stored
    pub api_key_env: String,
    pub fast_model: String,
    pub deep_model: String,
    pub thinking_budget: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    /// First-chunk wait for deep-thought requests
    pub first_chunk_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        let gemini = GeminiConfig::default();
        let tiers = ModelTiers::default();

        Self {
            base_url: gemini.base_url,
            api_key_env: folio_chat::credentials::DEFAULT_API_KEY_VARIABLE.to_string(),
            fast_model: tiers.fast_model,
            deep_model: tiers.deep_model,
            thinking_budget: tiers.thinking_budget,
            connect_timeout_secs: gemini.connect_timeout_secs,
            idle_timeout_secs: gemini.idle_timeout_secs,
            first_chunk_timeout_secs: gemini.first_chunk_timeout_secs,
        }
    }
}

impl LlmConfig {
    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig::new()
            .with_base_url(&self.base_url)
            .with_connect_timeout(self.connect_timeout_secs)
            .with_idle_timeout(self.idle_timeout_secs)
            .with_first_chunk_timeout(self.first_chunk_timeout_secs)
    }

    pub fn tiers(&self) -> ModelTiers {
        ModelTiers {
            fast_model: self.fast_model.clone(),
            deep_model: self.deep_model.clone(),
            thinking_budget: self.thinking_budget,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    /// Template with a `{knowledge_base}` placeholder; built-in when unset
    pub system_instruction_path: Option<PathBuf>,
    /// Portfolio TOML; built-in when unset
    pub profile_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml, or `explicit` when given
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. FOLIO_<SECTION>__<KEY> environment variables
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let base = match explicit {
            Some(path) => File::from(path).required(true),
            None => File::with_name("config/default").required(false),
        };

        let builder = ConfigLoader::builder()
            .add_source(base)
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("FOLIO")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Load config from a specific path only (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        ConfigLoader::builder()
            .add_source(File::from(path.as_ref()))
            .build()?
            .try_deserialize()
    }
}
