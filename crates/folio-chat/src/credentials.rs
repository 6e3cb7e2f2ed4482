/// Where the service credential comes from
///
/// Consulted on every request, never cached, so a key added or removed at
/// runtime is picked up by the next call.
pub trait CredentialSource: Send + Sync {
    fn api_key(&self) -> Option<String>;

    /// Human-readable origin, used in readiness reports
    fn describe(&self) -> String;
}

pub const DEFAULT_API_KEY_VARIABLE: &str = "API_KEY";

/// Reads the key from a process environment variable
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    variable: String,
}

impl EnvCredentials {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_API_KEY_VARIABLE)
    }
}

impl CredentialSource for EnvCredentials {
    fn api_key(&self) -> Option<String> {
        std::env::var(&self.variable).ok()
    }

    fn describe(&self) -> String {
        format!("environment variable {}", self.variable)
    }
}

/// A fixed key (or none), for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(Option<String>);

impl StaticCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self(Some(api_key.into()))
    }

    pub fn missing() -> Self {
        Self(None)
    }
}

impl CredentialSource for StaticCredentials {
    fn api_key(&self) -> Option<String> {
        self.0.clone()
    }

    fn describe(&self) -> String {
        "static credential".to_string()
    }
}
