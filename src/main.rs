use anyhow::Context;
use clap::Parser;
use hooprag::cli::handle_ask;
use hooprag::cli::handle_batch;
use hooprag::cli::handle_config_command;
use hooprag::cli::handle_embed;
use hooprag::cli::handle_init;
use hooprag::cli::handle_serve_api;
use hooprag::cli::Cli;
use hooprag::cli::Commands;
use hooprag::AppConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::load().context("failed to load configuration")?,
    };

    // Initialize logging
    if cli.verbose {
        hooprag::logging::init_logging_with_level("debug")?;
    } else {
        hooprag::logging::init_logging_with_config(&config)?;
    }
    info!("Configuration loaded successfully");

    match cli.command {
        Commands::Init => handle_init(&config).await?,
        Commands::Embed => handle_embed(&config).await?,
        Commands::Batch { questions, answers } => {
            handle_batch(&config, questions, answers).await?;
        }
        Commands::Ask { question } => handle_ask(&config, &question).await?,
        Commands::Serve { host, port } => handle_serve_api(&config, host, port).await?,
        Commands::Config => handle_config_command(&config)?,
    }

    Ok(())
}
