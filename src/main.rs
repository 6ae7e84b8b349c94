mod app;
mod cli;
mod code_embed;
mod config;
mod github;
mod resource;
mod snippets;
mod state;
mod task;
mod typewriter;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::github::GitHubClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "ollama4j_home=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = cli::Cli::parse();
    if let Some(command) = cli.command {
        return cli::run(command, &cli.output).await;
    }

    tracing::info!("Starting ollama4j homepage");

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration, using defaults: {}", e);
            Config::default()
        }
    };

    let github_client = GitHubClient::with_api_base(&config.release.api_base)
        .context("Failed to create GitHub client")?;

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([960.0, 800.0])
        .with_min_inner_size([640.0, 480.0])
        .with_title(format!("{} - {}", config.site.title, config.site.tagline));

    let native_options = eframe::NativeOptions {
        viewport,
        persist_window: true, // Save/restore window size and position
        ..Default::default()
    };

    eframe::run_native(
        "ollama4j-home",
        native_options,
        Box::new(|cc| Ok(Box::new(app::HomeApp::new(cc, config, github_client)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}
