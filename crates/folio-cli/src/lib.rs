pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod render;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
