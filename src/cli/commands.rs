use std::path::PathBuf;

use crate::app::{AppContext, Result};
use crate::domain::SubscriptionOptions;
use crate::search;

pub async fn add_podcast(
    ctx: &AppContext,
    slug: &str,
    url: &str,
    keep_removed: bool,
    download_dir: Option<PathBuf>,
    recent: Option<usize>,
) -> Result<()> {
    if ctx.registry.podcast(slug).is_ok() {
        println!("Podcast already exists: {}", slug);
        return Ok(());
    }

    let options = ctx.config.podcast.options(download_dir, recent);
    let subscription_options = SubscriptionOptions {
        include_removed_entries: keep_removed,
    };
    let record = ctx
        .registry
        .new_podcast(slug, url, options, subscription_options)
        .await?;

    println!("Added podcast: {}", slug);
    println!("Feed title: {}", record.subscription.title());
    println!("Fetched {} entries", record.subscription.entries.len());
    Ok(())
}

pub async fn refresh(ctx: &AppContext, slug: Option<&str>) -> Result<()> {
    let slugs: Vec<String> = match slug {
        Some(slug) => vec![slug.to_string()],
        None => ctx
            .registry
            .all_podcasts()?
            .into_iter()
            .map(|p| p.slug)
            .collect(),
    };

    if slugs.is_empty() {
        println!("No podcasts to refresh");
        return Ok(());
    }

    let errors = refresh_each(ctx, &slugs).await;

    println!("Refresh complete: {} podcasts, {} errors", slugs.len(), errors);
    Ok(())
}

/// Refresh each slug in turn, reporting per-podcast failures. Returns the
/// number of podcasts that could not be refreshed.
async fn refresh_each(ctx: &AppContext, slugs: &[String]) -> usize {
    let mut errors = 0;
    for slug in slugs {
        let before = match ctx.registry.podcast(slug) {
            Ok(record) => record,
            Err(e) => {
                errors += 1;
                eprintln!("  Error reading {}: {}", slug, e);
                continue;
            }
        };
        match ctx.registry.refresh_podcast(slug).await {
            Ok(after) => {
                let delta = after.subscription.entries.len() as i64
                    - before.subscription.entries.len() as i64;
                if after.subscription.snapshot.hash == before.subscription.snapshot.hash {
                    println!("  {}: unchanged", slug);
                } else {
                    println!(
                        "  {}: {} entries ({:+})",
                        slug,
                        after.subscription.entries.len(),
                        delta
                    );
                }
            }
            Err(e) => {
                errors += 1;
                eprintln!("  Error refreshing {}: {}", slug, e);
            }
        }
    }
    errors
}

pub fn list_podcasts(ctx: &AppContext) -> Result<()> {
    let podcasts = ctx.registry.all_podcasts()?;

    if podcasts.is_empty() {
        println!("No podcasts");
        return Ok(());
    }

    for podcast in podcasts {
        println!(
            "{} - {} ({} entries, {} downloaded)\n  {}",
            podcast.slug,
            podcast.subscription.title(),
            podcast.subscription.entries.len(),
            podcast.downloaded.len(),
            podcast.subscription.url()
        );
    }

    Ok(())
}

pub fn show_podcast(ctx: &AppContext, slug: &str) -> Result<()> {
    let podcast = ctx.registry.podcast(slug)?;
    println!("{}", podcast.subscription.title());
    println!(
        "Last fetched {}",
        podcast.subscription.snapshot.fetched_at.format("%Y-%m-%d %H:%M")
    );

    for entry in podcast.recent_entries() {
        let marker = match entry.identity() {
            Ok(id) if podcast.is_downloaded(&id) => "↓",
            _ => " ",
        };
        println!(
            "{} {} {}",
            marker,
            entry.published.format("%Y-%m-%d"),
            entry.display_title()
        );
    }

    Ok(())
}

pub fn remove_podcast(ctx: &AppContext, slug: &str) -> Result<()> {
    ctx.registry.remove_podcast(slug)?;
    println!("Removed podcast: {}", slug);
    Ok(())
}

pub async fn search_podcasts(
    ctx: &AppContext,
    term: &str,
    limit: u32,
    country: Option<&str>,
) -> Result<()> {
    let mut params = search::podcast::SearchParams::new(term).limit(limit);
    if let Some(country) = country {
        params = params.country(country);
    }

    let response = search::podcast::search(ctx.http.client(), &params).await?;
    if response.results.is_empty() {
        println!("No results");
        return Ok(());
    }

    for hit in response.results {
        println!("{} - {}\n  {}", hit.collection_name, hit.artist_name, hit.feed_url);
    }
    Ok(())
}

pub async fn search_feeds(ctx: &AppContext, query: &str) -> Result<()> {
    let response = search::feed::search(ctx.http.client(), query).await?;
    if response.results.is_empty() {
        println!("No results");
        return Ok(());
    }

    for hit in &response.results {
        println!("{}\n  {}", hit.title, hit.feed_url());
    }
    Ok(())
}
