//! Page sources
//!
//! A [`PageSource`] performs one remote filter-query call per request and
//! returns a [`Page`]. The stream machinery never talks to the network
//! directly; it only sees this trait.
//!
//! - [`CloudWatchSource`] - CloudWatch Logs `FilterLogEvents` over HTTP

mod cloudwatch;

pub use cloudwatch::{CloudWatchSource, FILTER_LOG_EVENTS_TARGET};

use crate::error::Result;
use crate::fetch::{Page, PageRequest, RetryHandler};
use async_trait::async_trait;

/// A remote, paginated log-query service
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch one page.
    ///
    /// Implementations must issue a single logical request (transport-level
    /// retries included) and report each retry through `on_retry`.
    async fn fetch_page(&self, request: PageRequest, on_retry: &RetryHandler) -> Result<Page>;
}
