//! editor-bridge - cross-frame annotation bridge
//!
//! Command-line driver for the bridge: replays scripted host events against
//! JSON document fixtures, prints locators and validates configuration.

mod cli;
mod cmd_config;
mod cmd_locate;
mod cmd_replay;
mod script;

use std::path::Path;

use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::cmd_config::{handle_check_config, load_config};
use crate::cmd_locate::handle_locate;
use crate::cmd_replay::handle_replay;

/// Logs go to stderr; stdout carries command output. With `log_dir`, a
/// daily-rotated file copy is written as well.
fn init_tracing(log_dir: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console = fmt::layer().with_target(true).with_writer(std::io::stderr);

    let file = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("editor-bridge")
                .filename_suffix("log")
                .max_log_files(30)
                .build(dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // The worker flushes until the guard drops.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_dir.as_deref())?;

    match cli.command {
        Commands::Replay {
            document,
            script,
            render,
            realtime,
        } => {
            let config = load_config(cli.config.as_deref())?;
            handle_replay(&config, &document, &script, render, realtime).await
        }
        Commands::Locate { document, element } => {
            let config = load_config(cli.config.as_deref())?;
            handle_locate(&config, &document, element).await
        }
        Commands::CheckConfig => handle_check_config(cli.config),
    }
}
