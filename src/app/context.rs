use std::sync::Arc;

use crate::app::error::{Result, TributaryError};
use crate::config::Config;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::registry::PodcastRegistry;
use crate::store::SqliteStore;
use crate::subscription::{Reconciler, SnapshotProvider};

pub struct AppContext {
    pub config: Config,
    pub store: Arc<SqliteStore>,
    pub http: Arc<HttpFetcher>,
    pub registry: PodcastRegistry<SqliteStore>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let db_path = config
            .store_path()
            .map_err(|e| TributaryError::Config(e.to_string()))?;
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let store = Arc::new(SqliteStore::new(&db_path)?);
        Self::with_store(config, store)
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        Self::with_store(config, store)
    }

    fn with_store(config: Config, store: Arc<SqliteStore>) -> Result<Self> {
        let http = Arc::new(HttpFetcher::new(
            config.fetch.timeout(),
            &config.fetch.user_agent,
        )?);
        let fetcher: Arc<dyn Fetcher + Send + Sync> = http.clone();
        let reconciler = Reconciler::new(SnapshotProvider::new(fetcher));
        let registry = PodcastRegistry::new(store.clone(), reconciler)?;

        Ok(Self {
            config,
            store,
            http,
            registry,
        })
    }
}
