use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tributary::app::AppContext;
use tributary::cli::{commands, Cli, Commands, SearchTarget};
use tributary::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Add {
            slug,
            url,
            keep_removed,
            download_dir,
            recent,
        } => {
            commands::add_podcast(&ctx, &slug, &url, keep_removed, download_dir, recent).await?;
        }
        Commands::Refresh { slug } => {
            commands::refresh(&ctx, slug.as_deref()).await?;
        }
        Commands::List => {
            commands::list_podcasts(&ctx)?;
        }
        Commands::Show { slug } => {
            commands::show_podcast(&ctx, &slug)?;
        }
        Commands::Remove { slug } => {
            commands::remove_podcast(&ctx, &slug)?;
        }
        Commands::Search { target } => match target {
            SearchTarget::Podcasts {
                term,
                limit,
                country,
            } => {
                commands::search_podcasts(&ctx, &term, limit, country.as_deref()).await?;
            }
            SearchTarget::Feeds { query } => {
                commands::search_feeds(&ctx, &query).await?;
            }
        },
    }

    Ok(())
}
