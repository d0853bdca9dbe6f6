use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wargear_games::Settings;
use wargear_games::cli::{Cli, Command};
use wargear_games::services::{ProfileScraper, WargearClient, get_games_info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wargear_games=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Credentials are required before anything touches the network.
    let settings = Settings::from_env()
        .context("WARGEAR_USER and WARGEAR_PASS must be set")?
        .with_overrides(cli.base_url.clone(), cli.cookie_path.clone())?;

    match cli.command() {
        Command::Games => {
            let games = get_games_info(&settings)
                .await
                .context("failed to fetch live games")?;
            debug!("{}", serde_json::to_string_pretty(&games)?);
        }
        Command::LastVisit { player } => {
            let client = Arc::new(WargearClient::new(&settings.base_url)?);
            let last_visit = ProfileScraper::new(client)
                .last_site_visit_for(&player)
                .await
                .with_context(|| format!("failed to read last visit for {}", player))?;
            info!(%player, %last_visit, "Last site visit");
        }
    }

    Ok(())
}
