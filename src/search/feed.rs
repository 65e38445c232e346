use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::app::Result;

const SEARCH_URL: &str = "https://cloud.feedly.com/v3/search/feeds";
const FEED_ID_PREFIX: &str = "feed/";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub hint: String,
    pub results: Vec<FeedResult>,
    pub related: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedResult {
    pub title: String,
    pub website: String,
    pub feed_id: String,
}

impl FeedResult {
    pub fn feed_url(&self) -> &str {
        self.feed_id
            .strip_prefix(FEED_ID_PREFIX)
            .unwrap_or(&self.feed_id)
    }
}

pub fn search_url(query: &str) -> Result<Url> {
    Ok(Url::parse_with_params(SEARCH_URL, &[("query", query)])?)
}

pub async fn search(client: &Client, query: &str) -> Result<SearchResponse> {
    let url = search_url(query)?;
    let body = client.get(url).send().await?.error_for_status()?.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
