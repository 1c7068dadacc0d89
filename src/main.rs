//! chatsweep - multi-select and batch actions for chat-history sidebars.
//!
//! Main entry point for the chatsweep CLI.

mod adapters;
mod attach;
mod categorizer;
mod cli;
mod cmd_browser;
mod cmd_config;
mod cmd_watch;

use anyhow::Context;
use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use chatsweep_config::{Config, ConfigLoader};
use chatsweep_core::{BatchAction, PlatformRegistry};

use adapters::chatsweep_dir;
use cli::{Cli, Commands};

fn init_tracing(level: &str, to_file: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = if to_file {
        let log_dir = chatsweep_dir().join("logs");
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create {}", log_dir.display()))?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("chatsweep")
            .filename_suffix("log")
            .max_log_files(14)
            .build(&log_dir)
            .context("Failed to create log file appender")?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // Keep the worker alive for the whole process.
        static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
            std::sync::OnceLock::new();
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false).boxed())
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(())
}

/// Apply command-line overrides to the loaded configuration.
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(endpoint) = &cli.endpoint {
        config.browser.endpoint = endpoint.clone();
    }
    if let Some(page) = &cli.page {
        config.browser.page_match = Some(page.clone());
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        ConfigLoader::load_or_default(cli.config.as_deref()).context("Failed to load config")?;
    apply_overrides(&mut config, &cli);
    init_tracing(&config.logging.level, config.logging.file)?;

    let registry = PlatformRegistry::from_config(&config);

    match cli.command {
        Commands::Pages => cmd_browser::pages(&config, &registry).await,
        Commands::Platforms => {
            cmd_config::platforms(&registry);
            Ok(())
        }
        Commands::Items => cmd_browser::items(&config, &registry).await,
        Commands::Delete { target, dry_run } => {
            cmd_browser::batch(&config, &registry, BatchAction::Delete, &target, dry_run).await
        }
        Commands::Move {
            destination,
            target,
        } => {
            let action = BatchAction::Move { destination };
            cmd_browser::batch(&config, &registry, action, &target, false).await
        }
        Commands::Watch => cmd_watch::watch(&config, &registry).await,
        Commands::CheckConfig => cmd_config::check_config(&config),
    }
}
