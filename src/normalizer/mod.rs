use chrono::{DateTime, Utc};
use feed_rs::model;
use feed_rs::parser;
use html_escape::decode_html_entities;
use sha2::{Digest, Sha256};

use crate::app::{Result, TributaryError};
use crate::domain::{Entry, Feed, Image, Item, Person, Snapshot};

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Hash, parse and timestamp a fetched body. Nothing is returned unless
    /// the whole document parses.
    pub fn snapshot(&self, url: &str, body: &[u8], fetched_at: DateTime<Utc>) -> Result<Snapshot> {
        let mut hasher = Sha256::new();
        hasher.update(body);
        let hash = hex::encode(hasher.finalize());

        let mut feed = self.parse(body)?;
        feed.feed_link = url.to_string();

        Ok(Snapshot {
            url: url.to_string(),
            hash,
            fetched_at,
            feed,
        })
    }

    pub fn parse(&self, body: &[u8]) -> Result<Feed> {
        // Entries without a publisher id keep an empty GUID so identity
        // falls back to the content hash.
        let feed = parser::Builder::new()
            .id_generator(|_, _, _| String::new())
            .build()
            .parse(body)
            .map_err(|e| TributaryError::Parse(e.to_string()))?;

        let items = feed.entries.into_iter().map(convert_entry).collect();

        Ok(Feed {
            title: text(feed.title),
            description: text(feed.description),
            link: feed.links.first().map(|l| l.href.clone()).unwrap_or_default(),
            feed_link: String::new(),
            updated: feed.updated,
            published: feed.published,
            author: feed.authors.first().map(convert_person),
            language: feed.language.unwrap_or_default(),
            image: feed.logo.or(feed.icon).map(convert_image),
            copyright: text(feed.rights),
            categories: feed.categories.into_iter().map(|c| c.term).collect(),
            items,
        })
    }
}

fn text(t: Option<model::Text>) -> String {
    t.map(|t| decode_html_entities(&t.content).to_string())
        .unwrap_or_default()
}

fn convert_person(p: &model::Person) -> Person {
    Person {
        name: p.name.clone(),
        email: p.email.clone().unwrap_or_default(),
    }
}

fn convert_image(i: model::Image) -> Image {
    Image {
        url: i.uri,
        title: i.title.unwrap_or_default(),
    }
}

fn convert_entry(entry: model::Entry) -> Item {
    let image = entry
        .media
        .iter()
        .flat_map(|m| m.thumbnails.iter())
        .next()
        .map(|t| convert_image(t.image.clone()));

    Item {
        title: text(entry.title),
        description: text(entry.summary),
        content: entry.content.and_then(|c| c.body).unwrap_or_default(),
        link: entry.links.first().map(|l| l.href.clone()).unwrap_or_default(),
        updated: entry.updated,
        published: entry.published,
        author: entry.authors.first().map(convert_person),
        guid: entry.id,
        image,
        categories: entry.categories.into_iter().map(|c| c.term).collect(),
    }
}

/// Project a snapshot's items into subscription entries. Missing timestamps
/// resolve to the snapshot's fetch time; empty items are dropped.
pub fn to_entries(snapshot: &Snapshot) -> Vec<Entry> {
    snapshot
        .feed
        .items
        .iter()
        .filter(|item| {
            if item.is_empty() {
                tracing::warn!("Skipping empty item in {}", snapshot.url);
                return false;
            }
            true
        })
        .map(|item| to_entry(item, snapshot.fetched_at))
        .collect()
}

fn to_entry(item: &Item, fetched_at: DateTime<Utc>) -> Entry {
    let (author_name, author_email) = item
        .author
        .as_ref()
        .map(|a| (a.name.clone(), a.email.clone()))
        .unwrap_or_default();
    let (image_url, image_title) = item
        .image
        .as_ref()
        .map(|i| (i.url.clone(), i.title.clone()))
        .unwrap_or_default();

    Entry {
        title: item.title.clone(),
        description: item.description.clone(),
        content: item.content.clone(),
        link: item.link.clone(),
        updated: item.updated.unwrap_or(fetched_at),
        published: item.published.unwrap_or(fetched_at),
        updated_is_fetch_time: item.updated.is_none(),
        published_is_fetch_time: item.published.is_none(),
        author_name,
        author_email,
        guid: item.guid.clone(),
        image_url,
        image_title,
        categories: item.categories.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const RSS_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Tech Talk &amp; Friends</title>
    <description>A test podcast</description>
    <link>https://example.com/</link>
    <language>en-us</language>
    <item>
      <title>Episode 1</title>
      <link>https://example.com/ep1</link>
      <guid>ep-1</guid>
      <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>
      <description>First episode</description>
      <category>tech</category>
    </item>
    <item>
      <title>Episode 2</title>
      <link>https://example.com/ep2</link>
      <description>Second episode</description>
    </item>
  </channel>
</rss>"#;

    const ATOM_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Test Feed</title>
  <subtitle>An Atom test feed</subtitle>
  <id>urn:feed:atom</id>
  <updated>2024-01-02T00:00:00Z</updated>
  <entry>
    <title>Atom Entry 1</title>
    <link href="https://example.com/atom1"/>
    <id>atom-entry-1</id>
    <updated>2024-01-01T00:00:00Z</updated>
    <author><name>Jo</name><email>jo@example.com</email></author>
    <summary>This is Atom entry 1</summary>
  </entry>
</feed>"#;

    fn fetched_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_rss() {
        let feed = Normalizer::new().parse(RSS_SAMPLE.as_bytes()).unwrap();

        assert_eq!(feed.title, "Tech Talk & Friends");
        assert_eq!(feed.description, "A test podcast");
        assert_eq!(feed.language, "en-us");
        assert_eq!(feed.items.len(), 2);
        assert_eq!(feed.items[0].title, "Episode 1");
        assert_eq!(feed.items[0].link, "https://example.com/ep1");
        assert_eq!(feed.items[0].guid, "ep-1");
        assert_eq!(feed.items[0].categories, vec!["tech".to_string()]);
    }

    #[test]
    fn test_missing_guid_stays_empty() {
        let feed = Normalizer::new().parse(RSS_SAMPLE.as_bytes()).unwrap();
        assert!(feed.items[1].guid.is_empty());
    }

    #[test]
    fn test_parse_atom() {
        let feed = Normalizer::new().parse(ATOM_SAMPLE.as_bytes()).unwrap();

        assert_eq!(feed.title, "Atom Test Feed");
        assert_eq!(feed.items.len(), 1);
        let item = &feed.items[0];
        assert_eq!(item.guid, "atom-entry-1");
        assert_eq!(item.link, "https://example.com/atom1");
        let author = item.author.as_ref().unwrap();
        assert_eq!(author.name, "Jo");
        assert_eq!(author.email, "jo@example.com");
    }

    #[test]
    fn test_parse_garbage_is_parse_error() {
        let err = Normalizer::new().parse(b"this is not a feed").unwrap_err();
        assert!(matches!(err, TributaryError::Parse(_)));
    }

    #[test]
    fn test_snapshot_hash_and_metadata() {
        let normalizer = Normalizer::new();
        let url = "https://example.com/feed.xml";
        let a = normalizer.snapshot(url, RSS_SAMPLE.as_bytes(), fetched_at()).unwrap();
        let b = normalizer.snapshot(url, RSS_SAMPLE.as_bytes(), fetched_at()).unwrap();

        assert_eq!(a.url, url);
        assert_eq!(a.feed.feed_link, url);
        assert_eq!(a.fetched_at, fetched_at());
        assert_eq!(a.hash.len(), 64);
        assert_eq!(a.hash, b.hash);

        let c = normalizer.snapshot(url, ATOM_SAMPLE.as_bytes(), fetched_at()).unwrap();
        assert_ne!(a.hash, c.hash);
    }

    #[test]
    fn test_to_entries_resolves_timestamps() {
        let snapshot = Normalizer::new()
            .snapshot("https://example.com/feed.xml", RSS_SAMPLE.as_bytes(), fetched_at())
            .unwrap();
        let entries = to_entries(&snapshot);

        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0].published,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(entries[1].published, fetched_at());
        assert_eq!(entries[1].updated, fetched_at());
        assert!(entries[1].published_is_fetch_time);
        assert!(entries[1].updated_is_fetch_time);
        assert!(!entries[0].published_is_fetch_time);
    }

    #[test]
    fn test_to_entries_flattens_author() {
        let snapshot = Normalizer::new()
            .snapshot("https://example.com/feed.atom", ATOM_SAMPLE.as_bytes(), fetched_at())
            .unwrap();
        let entries = to_entries(&snapshot);

        assert_eq!(entries[0].author_name, "Jo");
        assert_eq!(entries[0].author_email, "jo@example.com");
        assert!(entries[0].image_url.is_empty());
    }

    #[test]
    fn test_to_entries_skips_empty_items() {
        let mut snapshot = Normalizer::new()
            .snapshot("https://example.com/feed.xml", RSS_SAMPLE.as_bytes(), fetched_at())
            .unwrap();
        snapshot.feed.items.push(Item::default());

        assert_eq!(to_entries(&snapshot).len(), 2);
    }

    #[test]
    fn test_undated_entry_identity_survives_refetch() {
        let normalizer = Normalizer::new();
        let url = "https://example.com/feed.xml";
        let first = normalizer.snapshot(url, RSS_SAMPLE.as_bytes(), fetched_at()).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 6, 2, 12, 0, 0).unwrap();
        let second = normalizer.snapshot(url, RSS_SAMPLE.as_bytes(), later).unwrap();

        let a = to_entries(&first);
        let b = to_entries(&second);
        assert_ne!(a[1].updated, b[1].updated);
        assert_eq!(a[1].identity().unwrap(), b[1].identity().unwrap());
    }

    #[test]
    fn test_to_entries_is_deterministic() {
        let snapshot = Normalizer::new()
            .snapshot("https://example.com/feed.xml", RSS_SAMPLE.as_bytes(), fetched_at())
            .unwrap();
        assert_eq!(to_entries(&snapshot), to_entries(&snapshot));
    }
}
