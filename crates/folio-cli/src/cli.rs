use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for CLI commands
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version, about = "Ask the portfolio assistant from your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to config/default.toml)
    #[arg(long, global = true, env = "FOLIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask one question and stream the answer
    Ask(AskArgs),

    /// Interactive chat session
    Chat(ChatArgs),

    /// Show whether requests would reach the provider
    Status,

    /// Print the knowledge base the assistant is grounded on
    Profile,
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question; multiple words are joined with spaces
    #[arg(required = true, trailing_var_arg = true)]
    pub prompt: Vec<String>,

    /// Use the deep-thought tier (no web search)
    #[arg(long)]
    pub deep: bool,
}

impl AskArgs {
    pub fn prompt(&self) -> String {
        self.prompt.join(" ")
    }
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Start in deep-thought mode
    #[arg(long)]
    pub deep: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask() {
        let cli = Cli::try_parse_from(["folio", "ask", "--deep", "What", "does", "Anmol", "do?"]).unwrap();

        match cli.command {
            Commands::Ask(args) => {
                assert!(args.deep);
                assert_eq!(args.prompt(), "What does Anmol do?");
            }
            other => panic!("Expected Ask, got {:?}", other),
        }
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from(["folio", "status", "--format", "json", "-v"]).unwrap();

        assert!(matches!(cli.command, Commands::Status));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
    }

    #[test]
    fn test_ask_requires_prompt() {
        assert!(Cli::try_parse_from(["folio", "ask"]).is_err());
    }
}
