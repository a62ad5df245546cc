//! CLI definitions for editor-bridge.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// editor-bridge CLI.
#[derive(Parser)]
#[command(name = "editor-bridge")]
#[command(about = "Drive the cross-frame annotation bridge against in-memory documents")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.editor-bridge/config.toml)
    #[arg(short, long, global = true, env = "EDITOR_BRIDGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Also write logs to daily-rotated files in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Mount a bridge on a document fixture and play a script of events,
    /// printing every outbound message as a JSON line
    Replay {
        /// Document fixture (JSON)
        #[arg(short, long)]
        document: PathBuf,

        /// Event script (one JSON object per line)
        #[arg(short, long)]
        script: PathBuf,

        /// Print the overlay after every step
        #[arg(long)]
        render: bool,

        /// Wait for real time on `advance` events instead of jumping the clock
        #[arg(long)]
        realtime: bool,
    },

    /// Print the locator of one element of a document fixture
    Locate {
        /// Document fixture (JSON)
        #[arg(short, long)]
        document: PathBuf,

        /// Element handle
        #[arg(short, long)]
        element: u64,
    },

    /// Validate the configuration file
    CheckConfig,
}
