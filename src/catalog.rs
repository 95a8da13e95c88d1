//! Remote book catalog
//!
//! The widget only needs titles, so the Google Books volumes response is
//! decoded into a flat list of [`Suggestion`]s in API order.

use crate::error::{BookSearchError, Result};
use crate::AppConfig;
use reqwest::blocking::Client;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const USER_AGENT: &str = concat!("booksearch/", env!("CARGO_PKG_VERSION"));

/// A single candidate result shown in the suggestion list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
}

impl Suggestion {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Anything that can turn a query into suggestions.
///
/// Implementations are called from background threads.
pub trait BookCatalog: Send + Sync {
    fn search(&self, query: &str) -> Result<Vec<Suggestion>>;
}

#[derive(Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Option<Vec<Volume>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    #[serde(default)]
    volume_info: Option<VolumeInfo>,
}

#[derive(Deserialize)]
struct VolumeInfo {
    #[serde(default)]
    title: Option<String>,
}

/// Decode a volumes response body. A body without `items` yields no suggestions;
/// items without a title are skipped.
pub fn parse_volumes(body: &str) -> Result<Vec<Suggestion>> {
    let response: VolumesResponse = serde_json::from_str(body)?;
    Ok(response
        .items
        .unwrap_or_default()
        .into_iter()
        .filter_map(|volume| volume.volume_info?.title)
        .map(Suggestion::new)
        .collect())
}

/// Blocking client for the Google Books volumes endpoint
pub struct GoogleBooksClient {
    http: Client,
    endpoint: Url,
    start_index: u32,
    max_results: u32,
}

impl GoogleBooksClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|_| BookSearchError::InvalidEndpoint(config.endpoint.clone()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(BookSearchError::InvalidEndpoint(config.endpoint.clone()));
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint,
            start_index: config.start_index,
            max_results: config.max_results,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl BookCatalog for GoogleBooksClient {
    fn search(&self, query: &str) -> Result<Vec<Suggestion>> {
        let start_index = self.start_index.to_string();
        let max_results = self.max_results.to_string();

        tracing::debug!(query, endpoint = %self.endpoint, "requesting volumes");

        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[
                ("q", query),
                ("startIndex", start_index.as_str()),
                ("maxResults", max_results.as_str()),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(BookSearchError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.text()?;
        let suggestions = parse_volumes(&body)?;
        tracing::debug!(query, count = suggestions.len(), "volumes decoded");
        Ok(suggestions)
    }
}
