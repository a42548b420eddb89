use thiserror::Error;

/// Errors that can occur while querying YouTube's search endpoint
#[derive(Debug, Error)]
pub enum SearchError {
    /// The request never produced a response (DNS, TLS, timeout...) or its body could not be read
    #[error("Network error while searching for '{query}': {source}")]
    Network {
        query: String,
        #[source]
        source: reqwest::Error,
    },

    /// YouTube answered with a non-2xx status code
    #[error("Search for '{query}' returned HTTP {status}")]
    Status {
        query: String,
        status: reqwest::StatusCode,
    },

    /// The response was JSON but did not have the shape of a search result page
    #[error("Search for '{query}' returned an unexpected response: {reason}")]
    MalformedResponse { query: String, reason: String },
}

impl SearchError {
    #[must_use]
    pub fn query(&self) -> &str {
        match self {
            Self::Network { query, .. }
            | Self::Status { query, .. }
            | Self::MalformedResponse { query, .. } => query,
        }
    }
}
