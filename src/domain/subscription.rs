use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Entry, Snapshot};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionOptions {
    /// Keep entries that dropped out of the feed since the last fetch.
    #[serde(default, skip_serializing_if = "is_false")]
    pub include_removed_entries: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Everything known about one subscribed feed. Reconciliation never edits a
/// state in place; it builds the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionState {
    pub id: Uuid,
    pub snapshot: Snapshot,
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub options: SubscriptionOptions,
}

impl SubscriptionState {
    pub fn url(&self) -> &str {
        &self.snapshot.url
    }

    pub fn title(&self) -> &str {
        self.snapshot.title()
    }
}
