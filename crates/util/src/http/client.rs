//! Thin reqwest wrapper that retrieves a URL and decodes the body as JSON.
//!
//! No auth, custom methods or per-page headers: a page source is a plain GET.
//! Non-success statuses are logged but their bodies are still decoded, so an
//! API error document becomes the page's data like any other payload.

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::HttpSettings;
use crate::http::parser::{JsonDecodeError, decode_json_body};

/// Failure while retrieving or decoding a page source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("network error fetching '{url}': {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Decode(#[from] JsonDecodeError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Configured HTTP client for page sources.
#[derive(Debug, Clone)]
pub struct JsonHttpClient {
    http: Client,
}

impl JsonHttpClient {
    pub fn new(settings: &HttpSettings) -> Result<Self, FetchError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .user_agent(settings.user_agent.clone())
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { http })
    }

    /// GET `url` and decode the response body as JSON.
    pub async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let parsed = Url::parse(url.trim()).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        debug!(%url, "requesting page data");
        let response = self.http.get(parsed).send().await.map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "page source returned a non-success status");
        }

        let text = response.text().await.map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;

        Ok(decode_json_body(&text, Some(status))?)
    }
}
