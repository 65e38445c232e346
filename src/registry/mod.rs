//! Podcast records stored under the `podcast` namespace, keyed by slug.

use std::sync::Arc;

use crate::app::{Result, ResultExt, TributaryError};
use crate::domain::{PodcastOptions, PodcastRecord, SubscriptionOptions};
use crate::store::KvStore;
use crate::subscription::Reconciler;

pub const PODCAST_NAMESPACE: &[u8] = b"podcast";

/// MessagePack with named fields, so records survive field reordering.
pub fn encode(record: &PodcastRecord) -> Result<Vec<u8>> {
    Ok(rmp_serde::to_vec_named(record)?)
}

pub fn decode(bytes: &[u8]) -> Result<PodcastRecord> {
    Ok(rmp_serde::from_slice(bytes)?)
}

pub struct PodcastRegistry<S: KvStore> {
    store: Arc<S>,
    reconciler: Reconciler,
}

impl<S: KvStore> PodcastRegistry<S> {
    pub fn new(store: Arc<S>, reconciler: Reconciler) -> Result<Self> {
        store
            .create_namespace(PODCAST_NAMESPACE)
            .context("opening podcast registry")?;
        Ok(Self { store, reconciler })
    }

    pub async fn new_podcast(
        &self,
        slug: &str,
        url: &str,
        options: PodcastOptions,
        subscription_options: SubscriptionOptions,
    ) -> Result<PodcastRecord> {
        let subscription = self
            .reconciler
            .create(url, subscription_options)
            .await
            .context("adding new podcast")?;

        let record = PodcastRecord::new(slug.to_string(), subscription, options);
        self.put(&record).context("adding new podcast")?;

        tracing::info!(
            "Added podcast {} ({} entries)",
            slug,
            record.subscription.entries.len()
        );
        Ok(record)
    }

    pub fn podcast(&self, slug: &str) -> Result<PodcastRecord> {
        let bytes = self
            .store
            .get(PODCAST_NAMESPACE, slug.as_bytes())
            .context("getting podcast")?
            .ok_or_else(|| TributaryError::KeyNotFound {
                namespace: String::from_utf8_lossy(PODCAST_NAMESPACE).into_owned(),
                key: slug.to_string(),
            })
            .context("getting podcast")?;

        decode(&bytes).context("getting podcast")
    }

    pub fn all_podcasts(&self) -> Result<Vec<PodcastRecord>> {
        let mut podcasts = Vec::new();
        self.store
            .for_each(PODCAST_NAMESPACE, &mut |_, value| {
                podcasts.push(decode(value)?);
                Ok(())
            })
            .context("listing podcasts")?;
        Ok(podcasts)
    }

    /// Overwrite the stored record for `record.slug`. Advancing the
    /// subscription is the caller's job.
    pub fn write_podcast(&self, record: &PodcastRecord) -> Result<()> {
        self.put(record).context("writing podcast")
    }

    /// Update the podcast's subscription from its feed and store the result.
    pub async fn refresh_podcast(&self, slug: &str) -> Result<PodcastRecord> {
        let mut record = self.podcast(slug)?;
        record.subscription = self
            .reconciler
            .update(&record.subscription)
            .await
            .context("refreshing podcast")?;
        self.write_podcast(&record)?;
        Ok(record)
    }

    /// Delete the stored record for `slug`, whether or not it still decodes.
    pub fn remove_podcast(&self, slug: &str) -> Result<()> {
        self.store
            .get(PODCAST_NAMESPACE, slug.as_bytes())
            .context("removing podcast")?
            .ok_or_else(|| TributaryError::KeyNotFound {
                namespace: String::from_utf8_lossy(PODCAST_NAMESPACE).into_owned(),
                key: slug.to_string(),
            })
            .context("removing podcast")?;
        self.store
            .delete(PODCAST_NAMESPACE, slug.as_bytes())
            .context("removing podcast")?;
        tracing::info!("Removed podcast {}", slug);
        Ok(())
    }

    fn put(&self, record: &PodcastRecord) -> Result<()> {
        let payload = encode(record)?;
        self.store
            .put(PODCAST_NAMESPACE, record.slug.as_bytes(), &payload)
    }
}
