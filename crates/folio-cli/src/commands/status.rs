use anyhow::Result;
use folio_chat::{ChatResponder, Readiness};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::config::Config;

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub readiness: Readiness,
    pub base_url: String,
    pub fast_model: String,
    pub deep_model: String,
    pub thinking_budget: u32,
}

impl StatusReport {
    pub fn new(responder: &ChatResponder, config: &Config) -> Self {
        let tiers = responder.tiers();
        Self {
            readiness: responder.readiness(),
            base_url: config.llm.base_url.clone(),
            fast_model: tiers.fast_model.clone(),
            deep_model: tiers.deep_model.clone(),
            thinking_budget: tiers.thinking_budget,
        }
    }
}

pub fn run(responder: &ChatResponder, config: &Config, format: OutputFormat) -> Result<()> {
    let report = StatusReport::new(responder, config);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            match &report.readiness {
                Readiness::Ready => println!("Status:   ready"),
                Readiness::MissingCredential { source } => {
                    println!("Status:   not configured (no API key in {})", source)
                }
            }
            println!("Endpoint: {}", report.base_url);
            println!("Fast:     {} (web search)", report.fast_model);
            println!(
                "Deep:     {} (thinking budget {})",
                report.deep_model, report.thinking_budget
            );
        }
    }

    Ok(())
}
