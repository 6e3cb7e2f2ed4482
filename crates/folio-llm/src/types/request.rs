use serde::Serialize;

use crate::traits::GenerateRequest;

/// JSON body of `models/{model}:streamGenerateContent`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentBody {
    pub contents: Vec<ContentBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<ContentBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolBody>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<PartBody>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PartBody {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolBody {
    GoogleSearch(EmptyObject),
}

/// Serializes as `{}`
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmptyObject {}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    pub thinking_budget: u32,
}

impl ContentBody {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![PartBody { text: text.to_string() }],
        }
    }
}

impl From<&GenerateRequest> for GenerateContentBody {
    fn from(request: &GenerateRequest) -> Self {
        let options = &request.options;

        let tools = options
            .google_search
            .then(|| vec![ToolBody::GoogleSearch(EmptyObject::default())]);

        let generation_config = options.thinking_budget.map(|thinking_budget| GenerationConfig {
            thinking_config: Some(ThinkingConfig { thinking_budget }),
        });

        Self {
            contents: vec![ContentBody::text(Some("user"), &request.prompt)],
            system_instruction: request
                .system_instruction
                .as_deref()
                .map(|instruction| ContentBody::text(None, instruction)),
            tools,
            generation_config,
        }
    }
}
