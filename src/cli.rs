use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "alerta-rocketchat",
    version,
    about = "Rocket.Chat notification plugin for the Alerta alerting engine",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deliver a notification for an alert record to the webhook
    Send {
        /// Configuration file path (environment variables take precedence)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Alert record as JSON, as handed over by the engine
        #[arg(long, required = true)]
        alert: PathBuf,
    },

    /// Print the webhook payload for an alert record without sending
    Render {
        /// Configuration file path (environment variables take precedence)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Alert record as JSON, as handed over by the engine
        #[arg(long, required = true)]
        alert: PathBuf,
    },

    /// Resolve and display the effective configuration
    Test {
        /// Configuration file path (environment variables take precedence)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}
