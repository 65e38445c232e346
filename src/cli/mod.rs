pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tributary")]
#[command(about = "Keep track of podcast and RSS/Atom subscriptions", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/tributary/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Subscribe to a feed under a slug
    Add {
        /// Short name used to refer to the podcast
        slug: String,
        /// URL of the feed
        url: String,
        /// Keep entries that later disappear from the feed
        #[arg(long)]
        keep_removed: bool,
        /// Directory downloads for this podcast go to
        #[arg(long)]
        download_dir: Option<PathBuf>,
        /// Number of entries `show` lists
        #[arg(long)]
        recent: Option<usize>,
    },
    /// Fetch feeds again and record what changed
    Refresh {
        /// Only refresh this podcast
        slug: Option<String>,
    },
    /// List podcasts
    List,
    /// Show the recent entries of a podcast
    Show {
        slug: String,
    },
    /// Remove a podcast
    Remove {
        slug: String,
    },
    /// Search catalogs for feeds
    Search {
        #[command(subcommand)]
        target: SearchTarget,
    },
}

#[derive(Subcommand)]
pub enum SearchTarget {
    /// Search the podcast directory
    Podcasts {
        term: String,
        /// Maximum results (1-200)
        #[arg(short, long, default_value_t = 20)]
        limit: u32,
        /// Two-letter store country code
        #[arg(long)]
        country: Option<String>,
    },
    /// Search the general feed directory
    Feeds {
        query: String,
    },
}
