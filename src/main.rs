//! Scorepoint - Main Entry Point
//!
//! A model scoring service with CLI and server modes.

use clap::Parser;
use scorepoint::cli::{cmd_models, cmd_register, cmd_score, cmd_serve, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scorepoint=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            registry,
            model,
        } => {
            cmd_serve(&host, port, &registry, &model).await?;
        }
        Commands::Score {
            registry,
            model,
            input,
            output,
        } => {
            cmd_score(&registry, &model, &input, output.as_deref())?;
        }
        Commands::Register {
            registry,
            name,
            artifact,
        } => {
            cmd_register(&registry, &name, &artifact)?;
        }
        Commands::Models { registry } => {
            cmd_models(&registry)?;
        }
    }

    Ok(())
}
