//! Fetch orchestration for the selected page.
//!
//! A fetch is split into three steps so that callers owning the store on a UI
//! task can run the network part elsewhere:
//!
//! 1. [`FetchTicket::for_selected`] captures the page id and URL at fetch start.
//! 2. [`FetchTicket::resolve`] performs the request (or yields the
//!    `"invalid url"` sentinel for pages without a URL).
//! 3. [`apply_fetch_outcome`] releases the in-flight flag and commits the data
//!    against the captured id.
//!
//! [`fetch_selected_page_data`] runs all three in place for callers that can
//! hold the store across the await.

use async_trait::async_trait;
use jitpages_types::{PageData, PageId};
use jitpages_util::HttpSettings;
use jitpages_util::http::{FetchError, JsonHttpClient};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::store::PageStore;

/// Capability to retrieve a URL and decode it as JSON.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// [`JsonFetcher`] backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpJsonFetcher {
    client: JsonHttpClient,
}

impl HttpJsonFetcher {
    pub fn new(settings: &HttpSettings) -> Result<Self, FetchError> {
        Ok(Self {
            client: JsonHttpClient::new(settings)?,
        })
    }
}

#[async_trait]
impl JsonFetcher for HttpJsonFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        self.client.get_json(url).await
    }
}

/// What a fetch will do, captured when it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchTicket {
    /// The page has no URL; the sentinel payload is committed without a request.
    InvalidUrl { page_id: PageId },
    /// GET `url` and commit the decoded body to `page_id`.
    Request { page_id: PageId, url: String },
}

impl FetchTicket {
    /// Ticket for the currently selected page, if any.
    pub fn for_selected(store: &PageStore) -> Option<Self> {
        let page = store.selected_page()?;
        if page.has_url() {
            Some(FetchTicket::Request {
                page_id: page.id,
                url: page.url.trim().to_string(),
            })
        } else {
            Some(FetchTicket::InvalidUrl { page_id: page.id })
        }
    }

    pub fn page_id(&self) -> PageId {
        match self {
            FetchTicket::InvalidUrl { page_id } | FetchTicket::Request { page_id, .. } => *page_id,
        }
    }

    /// Produce the payload this ticket commits.
    pub async fn resolve(&self, fetcher: &dyn JsonFetcher) -> Result<PageData, FetchError> {
        match self {
            FetchTicket::InvalidUrl { page_id } => {
                debug!(page_id, "page has no url; committing sentinel");
                Ok(PageData::invalid_url())
            }
            FetchTicket::Request { page_id, url } => {
                info!(page_id, %url, "fetching page data");
                let value = fetcher.fetch_json(url).await?;
                Ok(PageData::from(value))
            }
        }
    }
}

/// Release the in-flight flag and commit a successful payload.
///
/// Returns `true` when data was committed. Failures and completions for pages
/// that no longer exist only release the flag.
pub fn apply_fetch_outcome<E: std::fmt::Display>(store: &mut PageStore, page_id: PageId, outcome: Result<PageData, E>) -> bool {
    store.set_fetching_page(false);
    match outcome {
        Ok(data) => {
            let kind = data.kind();
            let committed = store.commit_page_data(page_id, data);
            if committed {
                info!(page_id, kind, "committed page data");
            } else {
                debug!(page_id, "fetch completed for a page that no longer exists");
            }
            committed
        }
        Err(error) => {
            warn!(page_id, %error, "fetch failed");
            false
        }
    }
}

/// Holds the in-flight flag for the lifetime of a fetch and releases it on
/// every exit path, including early returns through `?`.
struct FetchingGuard<'a> {
    store: &'a mut PageStore,
}

impl<'a> FetchingGuard<'a> {
    fn acquire(store: &'a mut PageStore) -> Self {
        store.set_fetching_page(true);
        Self { store }
    }
}

impl Drop for FetchingGuard<'_> {
    fn drop(&mut self) {
        self.store.set_fetching_page(false);
    }
}

/// Fetch the selected page's data and commit it.
///
/// Returns the id of the page the fetch was addressed to, or `None` when no
/// page is selected. Network and decode failures are returned to the caller;
/// the in-flight flag is cleared either way.
pub async fn fetch_selected_page_data(store: &mut PageStore, fetcher: &dyn JsonFetcher) -> Result<Option<PageId>, FetchError> {
    let Some(ticket) = FetchTicket::for_selected(store) else {
        debug!("no page selected; nothing to fetch");
        return Ok(None);
    };

    let guard = FetchingGuard::acquire(store);
    let data = ticket.resolve(fetcher).await?;
    guard.store.commit_page_data(ticket.page_id(), data);
    Ok(Some(ticket.page_id()))
}
