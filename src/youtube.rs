use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::youtube::{
    error::SearchError,
    parse::{parse_channels, parse_playlists},
    structs::{ChannelRecord, PlaylistRecord, SearchFilter},
};

pub mod error;
pub mod parse;
pub mod structs;

pub const YOUTUBE_BASE_URL: &str = "https://www.youtube.com";

// Version string of the desktop web client; the search endpoint rejects unknown client names but is
// lenient with older versions
pub const INNERTUBE_CLIENT_NAME: &str = "WEB";
pub const INNERTUBE_CLIENT_VERSION: &str = "2.20250101.00.00";

/// Anything able to answer channel and playlist searches
#[async_trait]
pub trait CatalogSearch: Send + Sync + Debug {
    /// Returns up to `limit` channels matching `query`, in the order YouTube ranks them
    ///
    /// # Errors
    /// Errors on network failure, non-success status or an unrecognised response body
    async fn search_channels(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ChannelRecord>, SearchError>;

    /// Returns up to `limit` playlists matching `query`, in the order YouTube ranks them
    ///
    /// # Errors
    /// Errors on network failure, non-success status or an unrecognised response body
    async fn search_playlists(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<PlaylistRecord>, SearchError>;
}

/// Client for the search endpoint used by YouTube's own web frontend
///
/// Only the first result page is ever requested.
#[derive(Debug, Clone)]
pub struct InnertubeClient {
    client: reqwest::Client,
    base_url: String,
    language: String,
    region: String,
}

impl InnertubeClient {
    #[must_use]
    pub fn new(client: reqwest::Client, language: &str, region: &str) -> Self {
        Self {
            client,
            base_url: YOUTUBE_BASE_URL.to_string(),
            language: language.to_string(),
            region: region.to_string(),
        }
    }

    /// Points the client to another host, e.g. a local mirror
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn request_body(&self, query: &str, filter: SearchFilter) -> Value {
        json!({
            "context": {
                "client": {
                    "clientName": INNERTUBE_CLIENT_NAME,
                    "clientVersion": INNERTUBE_CLIENT_VERSION,
                    "hl": self.language,
                    "gl": self.region,
                },
                "user": { "lockedSafetyMode": false }
            },
            "query": query,
            "params": filter.params(),
        })
    }

    #[instrument(skip(self))]
    async fn search_page(&self, query: &str, filter: SearchFilter) -> Result<Value, SearchError> {
        let network_error = |source| SearchError::Network {
            query: query.to_string(),
            source,
        };

        let req = self
            .client
            .post(format!("{}/youtubei/v1/search", self.base_url))
            .query(&[("prettyPrint", "false")])
            .json(&self.request_body(query, filter))
            .send()
            .await
            .map_err(network_error)?;

        let status = req.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                query: query.to_string(),
                status,
            });
        }

        let body = req.bytes().await.map_err(network_error)?;
        let page = serde_json::from_slice::<Value>(&body).map_err(|e| {
            SearchError::MalformedResponse {
                query: query.to_string(),
                reason: format!("body is not JSON ({e})"),
            }
        })?;
        debug!("Received search page of {} bytes", body.len());
        Ok(page)
    }

    fn malformed(query: &str) -> SearchError {
        SearchError::MalformedResponse {
            query: query.to_string(),
            reason: "missing section list contents".to_string(),
        }
    }
}

#[async_trait]
impl CatalogSearch for InnertubeClient {
    async fn search_channels(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ChannelRecord>, SearchError> {
        let page = self.search_page(query, SearchFilter::Channels).await?;
        parse_channels(&page, limit).ok_or_else(|| Self::malformed(query))
    }

    async fn search_playlists(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<PlaylistRecord>, SearchError> {
        let page = self.search_page(query, SearchFilter::Playlists).await?;
        parse_playlists(&page, limit).ok_or_else(|| Self::malformed(query))
    }
}
