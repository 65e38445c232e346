pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;

/// Retrieves the raw bytes behind a feed URL in a single request.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

#[cfg(test)]
pub mod testing {
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::Fetcher;
    use crate::app::{Result, TributaryError};

    /// Serves queued bodies per URL. The last body for a URL is repeated
    /// once the queue drains to it.
    #[derive(Default)]
    pub struct StaticFetcher {
        bodies: Mutex<HashMap<String, VecDeque<Vec<u8>>>>,
    }

    impl StaticFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(self, url: &str, body: impl Into<Vec<u8>>) -> Self {
            self.push(url, body);
            self
        }

        pub fn push(&self, url: &str, body: impl Into<Vec<u8>>) {
            let mut bodies = self.bodies.lock().unwrap();
            bodies.entry(url.to_string()).or_default().push_back(body.into());
        }
    }

    #[async_trait]
    impl Fetcher for StaticFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            let mut bodies = self.bodies.lock().unwrap();
            let queue = bodies
                .get_mut(url)
                .ok_or_else(|| TributaryError::Parse(format!("no body for {}", url)))?;
            match queue.len() {
                0 => Err(TributaryError::Parse(format!("no body for {}", url))),
                1 => Ok(queue[0].clone()),
                _ => Ok(queue.pop_front().unwrap_or_default()),
            }
        }
    }
}
