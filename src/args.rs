use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "unlocked")]
#[command(about = "Search, inspect and download games from the SteamUnlocked catalogue")]
#[command(version)]
pub struct Args {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search games by title
    Search {
        query: String,

        /// Maximum number of results (configured default when omitted)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show a game's details
    Detail {
        /// Game slug or page URL
        game: String,
    },

    /// List one page of a category
    Category {
        /// Category slug or name, e.g. `open-world`
        category: String,

        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// List one page of the A-Z index
    Az {
        /// Restrict to titles starting with this letter
        letter: Option<String>,

        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// List the known categories
    Categories,

    /// Drive a browser through a mirror's countdown and start the download
    Download {
        /// Game page URL
        url: String,

        /// Run the browser without a window
        #[arg(long)]
        headless: bool,
    },
}
