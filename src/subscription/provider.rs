use std::sync::Arc;

use chrono::Utc;

use crate::app::Result;
use crate::domain::Snapshot;
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;

/// Turns a URL into a [`Snapshot`]. Snapshots stay plain values; getting a
/// newer one goes through [`SnapshotProvider::refresh`].
#[derive(Clone)]
pub struct SnapshotProvider {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
}

impl SnapshotProvider {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self {
            fetcher,
            normalizer: Normalizer::new(),
        }
    }

    pub async fn fetch(&self, url: &str) -> Result<Snapshot> {
        let body = self.fetcher.fetch(url).await?;
        let snapshot = self.normalizer.snapshot(url, &body, Utc::now())?;
        tracing::debug!(
            "Snapshot of {}: {} items, hash {}",
            url,
            snapshot.feed.items.len(),
            snapshot.hash
        );
        Ok(snapshot)
    }

    pub async fn refresh(&self, snapshot: &Snapshot) -> Result<Snapshot> {
        self.fetch(&snapshot.url).await
    }
}
