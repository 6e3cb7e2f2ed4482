use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::profile::Profile;

pub const KNOWLEDGE_BASE_PLACEHOLDER: &str = "{knowledge_base}";

const DEFAULT_TEMPLATE: &str = include_str!("../assets/system_instruction.txt");

/// System instruction for the assistant: persona rules plus the knowledge base
#[derive(Debug, Clone, PartialEq)]
pub struct Persona {
    template: String,
    knowledge_base: String,
}

impl Persona {
    /// The template must contain the `{knowledge_base}` placeholder
    pub fn new(template: impl Into<String>, knowledge_base: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(KNOWLEDGE_BASE_PLACEHOLDER) {
            return Err(ConfigError::MissingPlaceholder(KNOWLEDGE_BASE_PLACEHOLDER));
        }

        Ok(Self {
            template,
            knowledge_base: knowledge_base.into(),
        })
    }

    pub fn from_profile(template: impl Into<String>, profile: &Profile) -> Result<Self> {
        Self::new(template, profile.knowledge_base())
    }

    /// Load overrides from disk; either path may be omitted to keep the built-in
    pub fn load(template_path: Option<&Path>, profile_path: Option<&Path>) -> Result<Self> {
        let template = match template_path {
            Some(path) => std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?,
            None => DEFAULT_TEMPLATE.to_string(),
        };

        let profile = match profile_path {
            Some(path) => Profile::from_file(path)?,
            None => Profile::default(),
        };

        Self::from_profile(template, &profile)
    }

    pub fn knowledge_base(&self) -> &str {
        &self.knowledge_base
    }

    pub fn system_instruction(&self) -> String {
        self.template
            .replace(KNOWLEDGE_BASE_PLACEHOLDER, self.knowledge_base.trim_end())
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            knowledge_base: Profile::default().knowledge_base(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_instruction_embeds_resume() {
        let instruction = Persona::default().system_instruction();

        assert!(instruction.starts_with("You are 'Anmol's Assistant'"));
        assert!(instruction.contains("**Resume Data for Context:**\nName: Jb Anmol"));
        assert!(instruction.contains("Please drop your details and I will update Anmol with your info."));
        assert!(instruction.contains(
            "He's described as a \"breath engineer\"\u{2014}intentional and grounded in his practice."
        ));
        assert!(!instruction.contains(KNOWLEDGE_BASE_PLACEHOLDER));
    }

    #[test]
    fn test_custom_template() {
        let persona = Persona::new("Context:\n{knowledge_base}\nEnd.", "Name: Ada\n").unwrap();
        assert_eq!(persona.system_instruction(), "Context:\nName: Ada\nEnd.");
    }

    #[test]
    fn test_template_without_placeholder_rejected() {
        let err = Persona::new("No context here", "Name: Ada").unwrap_err();
        assert!(matches!(err, ConfigError::MissingPlaceholder(_)));
    }

    #[test]
    fn test_load_template_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Speak for them.\n{{knowledge_base}}").unwrap();

        let persona = Persona::load(Some(file.path()), None).unwrap();

        assert!(persona.system_instruction().starts_with("Speak for them.\nName: Jb Anmol"));
    }
}
