//! Fetch module
//!
//! Wraps a [`PageSource`] so that each call issues exactly one remote
//! request, relays transport retries to the caller's handler and reports
//! any failure as [`Error::Remote`].

mod types;

pub use types::{Cursor, Page, PageRequest, RetryEvent, RetryHandler};

use crate::error::{Error, Result};
use crate::query::Query;
use crate::source::PageSource;
use std::sync::Arc;
use tracing::debug;

/// Issues single page fetches for one query
#[derive(Clone)]
pub struct PageFetcher {
    source: Arc<dyn PageSource>,
    query: Query,
    retry: RetryHandler,
}

impl PageFetcher {
    /// Create a fetcher for a resolved query
    pub fn new(source: Arc<dyn PageSource>, query: Query, retry: RetryHandler) -> Self {
        Self {
            source,
            query,
            retry,
        }
    }

    /// The query being fetched
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Build the request for a cursor
    pub fn request_for(&self, cursor: &Cursor) -> Result<PageRequest> {
        match cursor {
            Cursor::Start => Ok(PageRequest::Initial(self.query.clone())),
            Cursor::Token(token) => Ok(PageRequest::Next {
                query: self.query.clone(),
                token: token.clone(),
            }),
            Cursor::Exhausted => Err(Error::state("no pages remain for this query")),
        }
    }

    /// Fetch the page at `cursor`
    pub async fn fetch(&self, cursor: &Cursor) -> Result<Page> {
        let request = self.request_for(cursor)?;
        debug!(
            group = %self.query.group,
            continuation = request.token().is_some(),
            "Fetching log events page"
        );

        let page = self
            .source
            .fetch_page(request, &self.retry)
            .await
            .map_err(Error::remote)?;

        debug!(
            group = %self.query.group,
            events = page.events.len(),
            has_next = page.has_next_page(),
            "Fetched log events page"
        );
        Ok(page)
    }
}

impl std::fmt::Debug for PageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFetcher")
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}
