use anyhow::{Context, Result};
use folio_chat::{ChatResponder, EnvCredentials, Persona, Readiness};
use folio_llm::ClientFactory;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands};
use crate::commands;
use crate::config::Config;

/// Dispatch one parsed command; only `profile` runs without a responder
pub async fn run(cli: Cli, config: &Config) -> Result<()> {
    let persona = load_persona(config)?;
    tracing::debug!(
        knowledge_base_len = persona.knowledge_base().len(),
        "Persona loaded"
    );

    match cli.command {
        Commands::Profile => commands::profile::run(&persona, cli.format),
        Commands::Ask(args) => {
            let responder = build_responder(config, persona)?;
            warn_if_not_ready(&responder);
            commands::ask::run(&responder, args, cli.format).await
        }
        Commands::Chat(args) => {
            let responder = build_responder(config, persona)?;
            warn_if_not_ready(&responder);
            commands::chat::run(&responder, args, cli.format).await
        }
        Commands::Status => {
            let responder = build_responder(config, persona)?;
            commands::status::run(&responder, config, cli.format)
        }
    }
}

fn warn_if_not_ready(responder: &ChatResponder) {
    if let Readiness::MissingCredential { source } = responder.readiness() {
        tracing::warn!("API key is not set in {}. The AI chat feature will not work.", source);
    }
}

/// Install the global subscriber; logs go to stderr so stdout carries answers
pub fn init_logging(config: &Config, verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.logging.level))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}

pub fn load_persona(config: &Config) -> Result<Persona> {
    Persona::load(
        config.persona.system_instruction_path.as_deref(),
        config.persona.profile_path.as_deref(),
    )
    .context("Failed to load persona")
}

pub fn build_responder(config: &Config, persona: Persona) -> Result<ChatResponder> {
    let client = ClientFactory::create_client(config.llm.gemini())?;

    let responder = ChatResponder::builder()
        .client(client)
        .credentials(EnvCredentials::new(&config.llm.api_key_env))
        .persona(persona)
        .tiers(config.llm.tiers())
        .build()?;

    Ok(responder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_responder_from_config() {
        let mut config = Config::default();
        config.llm.api_key_env = "FOLIO_APP_TEST_UNSET_KEY".to_string();
        config.llm.deep_model = "custom-pro".to_string();

        let persona = load_persona(&config).unwrap();
        let responder = build_responder(&config, persona).unwrap();

        assert_eq!(responder.tiers().deep_model, "custom-pro");
        assert!(!responder.readiness().is_ready());
        assert!(responder.system_instruction().contains("Anmol"));
    }

    fn parse(args: &[&str]) -> Cli {
        use clap::Parser;
        Cli::try_parse_from(args).unwrap()
    }

    #[tokio::test]
    async fn test_run_profile_and_status() {
        let mut config = Config::default();
        config.llm.api_key_env = "FOLIO_APP_TEST_UNSET_KEY".to_string();

        assert!(run(parse(&["folio", "profile"]), &config).await.is_ok());
        assert!(run(parse(&["folio", "status", "--format", "json"]), &config).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_ask_without_key_answers_locally() {
        let mut config = Config::default();
        config.llm.api_key_env = "FOLIO_APP_TEST_UNSET_KEY".to_string();
        config.llm.base_url = "http://127.0.0.1:9/v1beta".to_string();

        assert!(run(parse(&["folio", "ask", "hello"]), &config).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_reports_bad_persona_for_every_command() {
        let mut config = Config::default();
        config.persona.profile_path = Some("does/not/exist.toml".into());

        assert!(run(parse(&["folio", "profile"]), &config).await.is_err());
        assert!(run(parse(&["folio", "status"]), &config).await.is_err());
    }

    #[test]
    fn test_missing_profile_file_fails() {
        let mut config = Config::default();
        config.persona.profile_path = Some("does/not/exist.toml".into());

        assert!(load_persona(&config).is_err());
    }
}
