use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::app::{Result, TributaryError};

/// Subscription-level view of a feed item, with timestamps resolved and
/// author/image flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub link: String,
    pub updated: DateTime<Utc>,
    pub published: DateTime<Utc>,
    /// `updated` came from the fetch time, not the feed.
    #[serde(default, skip_serializing_if = "is_false")]
    pub updated_is_fetch_time: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub published_is_fetch_time: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author_email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub guid: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// The fields an entry's content hash covers. Timestamps filled in from the
/// fetch time are left out so refetching an undated item keeps its identity.
#[derive(Serialize)]
struct ContentKey<'a> {
    title: &'a str,
    description: &'a str,
    content: &'a str,
    link: &'a str,
    updated: Option<&'a DateTime<Utc>>,
    published: Option<&'a DateTime<Utc>>,
    author_name: &'a str,
    author_email: &'a str,
    image_url: &'a str,
    image_title: &'a str,
    categories: &'a [String],
}

impl Entry {
    /// Deduplication key: the publisher's GUID when present, otherwise a hex
    /// SHA-256 over the named-field encoding of the entry's content.
    ///
    /// An entry without a GUID whose content is edited gets a new identity.
    pub fn identity(&self) -> Result<String> {
        if !self.guid.is_empty() {
            return Ok(self.guid.clone());
        }

        let key = ContentKey {
            title: &self.title,
            description: &self.description,
            content: &self.content,
            link: &self.link,
            updated: (!self.updated_is_fetch_time).then_some(&self.updated),
            published: (!self.published_is_fetch_time).then_some(&self.published),
            author_name: &self.author_name,
            author_email: &self.author_email,
            image_url: &self.image_url,
            image_title: &self.image_title,
            categories: &self.categories,
        };
        let encoded =
            rmp_serde::to_vec_named(&key).map_err(|e| TributaryError::Identity(e.to_string()))?;
        Ok(hex::encode(Sha256::digest(&encoded)))
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }
}
