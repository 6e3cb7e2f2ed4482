use anyhow::Result;
use clap::Parser;

use folio_cli::{
    app::{init_logging, run},
    Cli, Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config, cli.verbose);

    run(cli, &config).await
}
