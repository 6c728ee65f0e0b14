mod cli;

use alerta_rocketchat::{Alert, ConfigFile, NotificationConfig, Plugin, RocketChatPlugin};
use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Send { config, alert } => handle_send(config, alert).await?,
        Commands::Render { config, alert } => handle_render(config, alert)?,
        Commands::Test { config } => handle_test(config)?,
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<NotificationConfig> {
    let file = match path {
        Some(path) => Some(ConfigFile::from_file(
            path.to_str().context("Invalid config path")?,
        )?),
        None => None,
    };

    NotificationConfig::from_env(file).context("Failed to resolve configuration")
}

fn load_alert(path: &Path) -> Result<Alert> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read alert file {}", path.display()))?;
    Alert::from_json(&content).context("Failed to parse alert record")
}

async fn handle_send(config_path: Option<PathBuf>, alert_path: PathBuf) -> Result<()> {
    let config = load_config(config_path)?;
    let alert = load_alert(&alert_path)?;
    let plugin = RocketChatPlugin::new(&config);

    plugin.post_receive(&alert).await?;
    tracing::info!("Processed alert {} ({})", alert.id, alert.event);

    Ok(())
}

fn handle_render(config_path: Option<PathBuf>, alert_path: PathBuf) -> Result<()> {
    let config = load_config(config_path)?;
    let alert = load_alert(&alert_path)?;

    let payload = alerta_rocketchat::message::build_payload(&config, &alert, None, None)?;
    println!("{}", serde_json::to_string_pretty(&payload)?);

    Ok(())
}

fn handle_test(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;

    println!("webhook_url: {}", config.webhook_url);
    println!("channel: {}", config.channel);
    println!("username: {}", config.username);
    println!("icon_emoji: {}", config.icon_emoji);
    println!("dashboard_url: {}", config.dashboard_url);
    match &config.disabled_severities {
        Some(set) => {
            let mut names: Vec<_> = set.iter().map(String::as_str).collect();
            names.sort_unstable();
            println!("disabled_severities: {}", names.join(", "));
        }
        None => println!("disabled_severities: (none)"),
    }
    println!("timeout_secs: {}", config.timeout_secs);
    println!(
        "notify_on_status_change: {}",
        config.notify_on_status_change
    );

    Ok(())
}
