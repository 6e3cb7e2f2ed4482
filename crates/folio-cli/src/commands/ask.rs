use anyhow::Result;
use folio_chat::{ChatMode, ChatRequest, ChatResponder};
use futures::StreamExt;

use crate::cli::{AskArgs, OutputFormat};
use crate::render::ChunkRenderer;

pub async fn run(responder: &ChatResponder, args: AskArgs, format: OutputFormat) -> Result<()> {
    let prompt = args.prompt();
    if prompt.trim().is_empty() {
        anyhow::bail!("Prompt must not be empty");
    }

    let request = ChatRequest::new(prompt, ChatMode::from(args.deep));
    let mut stream = responder.respond(request);
    let mut renderer = ChunkRenderer::new(std::io::stdout(), format);

    while let Some(chunk) = stream.next().await {
        renderer.render(&chunk)?;
    }
    renderer.finish()?;

    Ok(())
}
