use anyhow::Result;
use folio_chat::Persona;

use crate::cli::OutputFormat;

pub fn run(persona: &Persona, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "knowledge_base": persona.knowledge_base() })
        ),
        OutputFormat::Text => print!("{}", persona.knowledge_base()),
    }
    Ok(())
}
