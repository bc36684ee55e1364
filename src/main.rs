use anyhow::Context;
use clap::Parser;

use founder_compass::config::AppConfig;
use founder_compass::telemetry;

mod cli;
mod commands;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("founder-compass error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    telemetry::init(&config.logging)?;

    let ctx = commands::AppContext::new(config, cli.offline)?;

    match cli.command {
        cli::Commands::Start {
            name,
            email,
            company_size,
        } => commands::start(&ctx, name, email, company_size).await,
        cli::Commands::Diagnose => commands::diagnose(&ctx).await,
        cli::Commands::Results { output, format } => commands::results(&ctx, output, format).await,
        cli::Commands::Email => commands::email(&ctx).await,
        cli::Commands::Admin { action } => commands::admin(&ctx, action).await,
        cli::Commands::Reset => commands::reset(&ctx).await,
    }
}
