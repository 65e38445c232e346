use indexmap::IndexMap;
use uuid::Uuid;

use crate::app::{Result, ResultExt};
use crate::domain::{Entry, SubscriptionOptions, SubscriptionState};
use crate::normalizer::to_entries;
use crate::subscription::SnapshotProvider;

/// Builds and advances [`SubscriptionState`]s.
#[derive(Clone)]
pub struct Reconciler {
    provider: SnapshotProvider,
}

impl Reconciler {
    pub fn new(provider: SnapshotProvider) -> Self {
        Self { provider }
    }

    pub async fn create(&self, url: &str, options: SubscriptionOptions) -> Result<SubscriptionState> {
        let snapshot = self.provider.fetch(url).await.context("creating subscription")?;
        let entries = dedup(to_entries(&snapshot)).context("creating subscription")?;

        let state = SubscriptionState {
            id: Uuid::new_v4(),
            snapshot,
            entries,
            options,
        };
        tracing::info!(
            "Subscribed to {} ({} entries)",
            state.url(),
            state.entries.len()
        );
        Ok(state)
    }

    /// Fetch the subscription's feed again and produce the next state. The
    /// given state is left as it was, whatever the outcome.
    pub async fn update(&self, state: &SubscriptionState) -> Result<SubscriptionState> {
        let snapshot = self
            .provider
            .refresh(&state.snapshot)
            .await
            .context("updating subscription")?;
        let candidates = to_entries(&snapshot);

        let entries = if state.options.include_removed_entries {
            merge(&state.entries, candidates)
        } else {
            dedup(candidates)
        }
        .context("updating subscription")?;

        tracing::info!(
            "Updated {}: {} -> {} entries",
            state.url(),
            state.entries.len(),
            entries.len()
        );

        Ok(SubscriptionState {
            id: state.id,
            snapshot,
            entries,
            options: state.options,
        })
    }
}

/// Key entries by identity in first-insertion order. Re-inserting an
/// identity replaces its entry without moving it.
fn by_identity(entries: impl IntoIterator<Item = Entry>) -> Result<IndexMap<String, Entry>> {
    let mut set = IndexMap::new();
    for entry in entries {
        let identity = entry.identity()?;
        if let Some(previous) = set.insert(identity, entry) {
            tracing::debug!("Duplicate entry identity for {}", previous.display_title());
        }
    }
    Ok(set)
}

/// Collapse entries sharing an identity; the last occurrence wins.
pub fn dedup(entries: impl IntoIterator<Item = Entry>) -> Result<Vec<Entry>> {
    Ok(by_identity(entries)?.into_values().collect())
}

/// Union of `old` and `new` by identity, with `new` winning conflicts,
/// ordered by ascending `updated` (stable over old-then-new order).
pub fn merge(old: &[Entry], new: impl IntoIterator<Item = Entry>) -> Result<Vec<Entry>> {
    let mut entries: Vec<Entry> = by_identity(old.iter().cloned().chain(new))?
        .into_values()
        .collect();
    entries.sort_by_key(|e| e.updated);
    Ok(entries)
}
