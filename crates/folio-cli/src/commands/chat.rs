use anyhow::Result;
use folio_chat::{ChatMode, ChatRequest, ChatResponder, Transcript};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::{ChatArgs, OutputFormat};
use crate::render::ChunkRenderer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    Empty,
    Quit,
    Clear,
    SwitchMode(ChatMode),
    Unknown(String),
    Prompt(String),
}

pub fn parse_input(line: &str) -> ChatInput {
    let line = line.trim();
    if line.is_empty() {
        return ChatInput::Empty;
    }

    match line {
        "/quit" | "/exit" => ChatInput::Quit,
        "/clear" => ChatInput::Clear,
        "/deep" => ChatInput::SwitchMode(ChatMode::DeepThought),
        "/fast" => ChatInput::SwitchMode(ChatMode::Fast),
        cmd if cmd.starts_with('/') => ChatInput::Unknown(cmd.to_string()),
        prompt => ChatInput::Prompt(prompt.to_string()),
    }
}

fn show_prompt(mode: ChatMode) -> Result<()> {
    let mut err = std::io::stderr();
    write!(err, "[{}] > ", mode)?;
    err.flush()?;
    Ok(())
}

pub async fn run(responder: &ChatResponder, args: ChatArgs, format: OutputFormat) -> Result<()> {
    let mut mode = ChatMode::from(args.deep);
    let mut transcript = Transcript::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    eprintln!("Ask about the portfolio. /deep and /fast switch modes, /clear resets, /quit exits.");
    show_prompt(mode)?;

    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            ChatInput::Empty => {}
            ChatInput::Quit => break,
            ChatInput::Clear => {
                transcript.clear();
                eprintln!("Transcript cleared.");
            }
            ChatInput::SwitchMode(next) => {
                mode = next;
                eprintln!("Switched to {} mode.", mode);
            }
            ChatInput::Unknown(cmd) => eprintln!("Unknown command: {}", cmd),
            ChatInput::Prompt(prompt) => {
                transcript.push_user(prompt.clone());

                let mut renderer = ChunkRenderer::new(std::io::stdout(), format);
                let mut render_error = None;
                let stream = responder.respond(ChatRequest::new(prompt, mode));

                transcript
                    .record(stream, |chunk| {
                        if let Err(e) = renderer.render(chunk) {
                            render_error.get_or_insert(e);
                        }
                    })
                    .await;

                if let Some(e) = render_error {
                    return Err(e.into());
                }
                renderer.finish()?;

                tracing::debug!(turns = transcript.len(), "Turn complete");
            }
        }

        show_prompt(mode)?;
    }

    Ok(())
}
