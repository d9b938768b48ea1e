//! CLI interface for alpharsi
//!
//! Provides subcommands for:
//! - `replay`: Feed a bar file through the engine
//! - `config`: Show the effective engine configuration

mod replay;

pub use replay::{OutputFormat, ReplayArgs};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "alpharsi")]
#[command(about = "Adaptive RSI oscillator with divergence detection")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a JSON bar file through the engine
    Replay(ReplayArgs),
    /// Show configuration
    Config,
}
