use anyhow::Result;
use folio_llm::{ContentClient, GeminiClient, GenerateOptions, GenerateRequest};
use futures::StreamExt;

#[tokio::main]
async fn main() -> Result<()> {
    let api_key = std::env::var("API_KEY")?;
    let client = GeminiClient::new()?;

    let request = GenerateRequest::new("gemini-2.5-flash", "What changed in the latest Rust release?")
        .with_system_instruction("Answer in three sentences.")
        .with_options(GenerateOptions::new().google_search(true));

    let mut stream = client.stream_generate(&api_key, request).await?;
    let mut sources = Vec::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if let Some(text) = chunk.text() {
            print!("{}", text);
            std::io::Write::flush(&mut std::io::stdout())?;
        }
        sources.extend(chunk.grounding_sources());
    }

    println!("\n\nSources:");
    for source in sources {
        println!(
            "  {} <{}>",
            source.title.unwrap_or_default(),
            source.uri.unwrap_or_default()
        );
    }

    Ok(())
}
