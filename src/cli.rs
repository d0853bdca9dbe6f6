use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "wargear-games")]
#[command(about = "Summarize live Wargear games for the player in WARGEAR_USER")]
pub struct Cli {
    /// Site root, overrides WARGEAR_BASE_URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Session cookie file, overrides WARGEAR_COOKIE_PATH
    #[arg(long)]
    pub cookie_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Fetch and summarize live games (default)
    Games,
    /// Scrape a player's profile for their last site visit
    LastVisit {
        player: String,
    },
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Games)
    }
}
