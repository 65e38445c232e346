use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::app::Result;

const SEARCH_URL: &str = "https://itunes.apple.com/search";
pub const MAX_LIMIT: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub term: String,
    pub media: String,
    pub entity: Option<String>,
    pub country: Option<String>,
    pub limit: Option<u32>,
}

impl SearchParams {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            media: "podcast".to_string(),
            entity: None,
            country: None,
            limit: None,
        }
    }

    pub fn media(mut self, media: impl Into<String>) -> Self {
        self.media = media.into();
        self
    }

    pub fn entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Clamped to `1..=200`.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit.clamp(1, MAX_LIMIT));
        self
    }

    pub fn url(&self) -> Result<Url> {
        let mut pairs = vec![("term", self.term.clone()), ("media", self.media.clone())];
        if let Some(entity) = &self.entity {
            pairs.push(("entity", entity.clone()));
        }
        if let Some(country) = &self.country {
            pairs.push(("country", country.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        Ok(Url::parse_with_params(SEARCH_URL, &pairs)?)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResponse {
    pub result_count: u32,
    pub results: Vec<PodcastResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PodcastResult {
    pub collection_id: u64,
    pub collection_name: String,
    pub track_name: String,
    pub artist_name: String,
    pub feed_url: String,
    pub artwork_url100: String,
    pub primary_genre_name: String,
    pub genres: Vec<String>,
    pub release_date: String,
}

pub async fn search(client: &Client, params: &SearchParams) -> Result<SearchResponse> {
    let url = params.url()?;
    let body = client.get(url).send().await?.error_for_status()?.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_params() {
        let url = SearchParams::new("rust lang").country("US").limit(500).url().unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(pairs.contains(&("term".into(), "rust lang".into())));
        assert!(pairs.contains(&("media".into(), "podcast".into())));
        assert!(pairs.contains(&("country".into(), "US".into())));
        assert!(pairs.contains(&("limit".into(), "200".into())));
        assert!(!pairs.iter().any(|(k, _)| k == "entity"));
    }

    #[test]
    fn test_limit_clamped_low() {
        assert_eq!(SearchParams::new("x").limit(0).limit, Some(1));
    }

    #[test]
    fn test_decode_response() {
        let body = r#"{
            "resultCount": 1,
            "results": [{
                "wrapperType": "track",
                "collectionId": 42,
                "collectionName": "Tech Talk",
                "artistName": "Sam",
                "feedUrl": "https://example.com/feed.xml",
                "genres": ["Technology", "Podcasts"]
            }]
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.result_count, 1);
        let hit = &response.results[0];
        assert_eq!(hit.collection_name, "Tech Talk");
        assert_eq!(hit.feed_url, "https://example.com/feed.xml");
        assert_eq!(hit.genres.len(), 2);
        assert!(hit.track_name.is_empty());
    }
}
