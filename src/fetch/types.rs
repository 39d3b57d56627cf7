//! Fetch types
//!
//! Pages, continuation cursors and retry notifications.

use crate::query::Query;
use crate::types::LogEvent;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// One batch of events returned by a single remote call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Events in the order the service returned them
    pub events: Vec<LogEvent>,
    /// Token for the next page; `None` means this was the last page
    pub next_token: Option<String>,
}

impl Page {
    /// Create a page
    pub fn new(events: Vec<LogEvent>, next_token: Option<String>) -> Self {
        Self { events, next_token }
    }

    /// Create a final page (no continuation)
    pub fn last(events: Vec<LogEvent>) -> Self {
        Self::new(events, None)
    }

    /// Check if more pages follow this one
    pub fn has_next_page(&self) -> bool {
        self.next_token.is_some()
    }
}

/// Where the next fetch resumes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cursor {
    /// Nothing fetched yet
    #[default]
    Start,
    /// Resume from a continuation token
    Token(String),
    /// No pages remain
    Exhausted,
}

impl Cursor {
    /// Cursor following a fetched page
    pub fn after(page: &Page) -> Self {
        match &page.next_token {
            Some(token) => Self::Token(token.clone()),
            None => Self::Exhausted,
        }
    }

    /// Check if no pages remain
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

/// A request handed to a [`PageSource`](crate::source::PageSource)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    /// First page of a query
    Initial(Query),
    /// A later page, resumed from a continuation token
    Next {
        /// The query being paged
        query: Query,
        /// Continuation token from the previous page
        token: String,
    },
}

impl PageRequest {
    /// The query this request belongs to
    pub fn query(&self) -> &Query {
        match self {
            Self::Initial(query) | Self::Next { query, .. } => query,
        }
    }

    /// Continuation token, if this is not the first page
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Initial(_) => None,
            Self::Next { token, .. } => Some(token),
        }
    }
}

/// Notification that the transport is retrying a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryEvent {
    /// Retry number, starting at 1
    pub attempt: u32,
    /// Retries allowed for this request
    pub max_retries: u32,
    /// Delay before the retry is sent
    pub delay: Duration,
    /// Why the previous attempt failed
    pub reason: String,
}

impl RetryEvent {
    /// Create a retry event
    pub fn new(attempt: u32, max_retries: u32, delay: Duration, reason: impl Into<String>) -> Self {
        Self {
            attempt,
            max_retries,
            delay,
            reason: reason.into(),
        }
    }
}

/// Observer invoked once per transport retry. Never affects scheduling.
#[derive(Clone)]
pub struct RetryHandler {
    callback: Arc<dyn Fn(&RetryEvent) + Send + Sync>,
}

impl RetryHandler {
    /// Wrap a callback
    pub fn new(callback: impl Fn(&RetryEvent) + Send + Sync + 'static) -> Self {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Handler that ignores every notification
    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    /// Deliver a notification
    pub fn notify(&self, event: &RetryEvent) {
        (self.callback)(event);
    }
}

impl Default for RetryHandler {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for RetryHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryHandler").finish_non_exhaustive()
    }
}
