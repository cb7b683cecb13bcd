//! CLI command definitions for the `callagent` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod config;
pub mod routes;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Backend API for the AI-powered calling platform.
#[derive(Parser)]
#[command(name = "callagent", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON (logs and command output).
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to read settings from.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to the settings file (defaults to ./callagent.toml if present).
    #[arg(long, short = 'c', env = "CALLAGENT_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve {
        #[command(flatten)]
        config: ConfigArgs,

        /// Interface to bind (overrides settings).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides settings).
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Validate settings and print the effective configuration.
    Config {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Print the mounted route-group prefixes.
    Routes {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
