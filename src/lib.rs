//! # Tributary
//!
//! Tracks the contents of RSS/Atom feeds for a subscriber and keeps that
//! state on disk, so repeated polling only surfaces what is new or changed.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Normalizer → Reconciler → Registry → Store
//! ```
//!
//! - [`fetcher`]: one HTTP GET per feed, raw bytes out
//! - [`normalizer`]: feed-rs parsing, snapshot hashing, item → entry projection
//! - [`subscription`]: snapshot fetch/refresh and entry reconciliation
//! - [`registry`]: podcast records keyed by slug
//! - [`store`]: namespaced key-value storage on SQLite
//!
//! ## Quick Start
//!
//! ```bash
//! # Subscribe
//! tributary add techtalk https://example.com/feed.xml --keep-removed
//!
//! # Poll every subscription
//! tributary refresh
//!
//! # Recent entries
//! tributary show techtalk
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the store,
/// fetcher, reconciler and registry.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/tributary/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Snapshot`](domain::Snapshot): one fetch of a feed
/// - [`Entry`](domain::Entry): a normalized item with its identity
/// - [`SubscriptionState`](domain::SubscriptionState): what is known about a feed
/// - [`PodcastRecord`](domain::PodcastRecord): the stored podcast aggregate
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait for feed fetching
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Feed parsing and normalization.
///
/// Converts RSS 0.9x/1.0/2.0, Atom 0.3/1.0, and JSON Feed 1.0 into
/// [`Snapshot`](domain::Snapshot)s and [`Entry`](domain::Entry) lists.
pub mod normalizer;

/// Podcast records on top of the store.
pub mod registry;

/// Podcast and feed directory search.
pub mod search;

/// Namespaced key-value persistence.
///
/// - [`KvStore`](store::KvStore): trait defining storage operations
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
pub mod store;

/// Subscription state: snapshot provider and reconciler.
pub mod subscription;
