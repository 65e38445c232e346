use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::{Entry, SubscriptionState};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcastOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_directory: Option<PathBuf>,
    /// How many of the newest entries count as "recent".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_entries: Option<usize>,
}

/// A stored podcast: the subscription plus per-podcast bookkeeping, keyed by
/// a user-chosen slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcastRecord {
    pub slug: String,
    pub subscription: SubscriptionState,
    #[serde(default)]
    pub options: PodcastOptions,
    /// Entry identity -> local file path.
    #[serde(default)]
    pub downloaded: BTreeMap<String, String>,
}

impl PodcastRecord {
    pub fn new(slug: String, subscription: SubscriptionState, options: PodcastOptions) -> Self {
        Self {
            slug,
            subscription,
            options,
            downloaded: BTreeMap::new(),
        }
    }

    /// Newest-first by publish time, capped at `recent_entries` when set.
    pub fn recent_entries(&self) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.subscription.entries.iter().collect();
        entries.sort_by(|a, b| b.published.cmp(&a.published));
        if let Some(limit) = self.options.recent_entries {
            entries.truncate(limit);
        }
        entries
    }

    pub fn mark_downloaded(&mut self, identity: impl Into<String>, path: impl Into<String>) {
        self.downloaded.insert(identity.into(), path.into());
    }

    pub fn is_downloaded(&self, identity: &str) -> bool {
        self.downloaded.contains_key(identity)
    }
}
