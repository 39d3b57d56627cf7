//! Query types
//!
//! Caller-facing options and the resolved, immutable query.

use crate::fetch::RetryHandler;
use crate::output::OutputMode;
use crate::types::{millis_to_utc, EpochMillis};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Caller-supplied options for reading a log group.
///
/// Every field is optional here so that missing values can be reported in
/// order by [`ReadOptions::resolve`]; use [`ReadOptions::new`] for the common
/// case.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// AWS region hosting the log group (required)
    pub region: Option<String>,
    /// Log group name (required)
    pub group: Option<String>,
    /// Start of the time range in epoch ms (default: 15 minutes ago)
    pub start: Option<EpochMillis>,
    /// End of the time range in epoch ms (default: now)
    pub end: Option<EpochMillis>,
    /// Filter pattern limiting returned events
    pub pattern: Option<String>,
    /// Observer for transport retries (default: no-op)
    pub retry: Option<RetryHandler>,
    /// Emit plain messages instead of structured records
    pub messages: Option<bool>,
    /// Maximum number of events per page
    pub limit: Option<u32>,
}

impl ReadOptions {
    /// Create options for a region and log group
    pub fn new(region: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            group: Some(group.into()),
            ..Default::default()
        }
    }

    /// Set the filter pattern
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set the start time (epoch ms)
    #[must_use]
    pub fn start(mut self, start: EpochMillis) -> Self {
        self.start = Some(start);
        self
    }

    /// Set the end time (epoch ms)
    #[must_use]
    pub fn end(mut self, end: EpochMillis) -> Self {
        self.end = Some(end);
        self
    }

    /// Set the retry handler
    #[must_use]
    pub fn retry(mut self, handler: RetryHandler) -> Self {
        self.retry = Some(handler);
        self
    }

    /// Select plain message output
    #[must_use]
    pub fn messages(mut self, messages: bool) -> Self {
        self.messages = Some(messages);
        self
    }

    /// Set the page size limit
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A fully resolved, immutable filter query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    /// AWS region
    pub region: String,
    /// Log group name
    pub group: String,
    /// Optional filter pattern
    pub pattern: Option<String>,
    /// Start of the range (epoch ms, inclusive)
    pub start: EpochMillis,
    /// End of the range (epoch ms)
    pub end: EpochMillis,
    /// Optional per-page event cap
    pub limit: Option<u32>,
}

impl Query {
    /// Start of the range as a UTC datetime
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.start)
    }

    /// End of the range as a UTC datetime
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.end)
    }
}

/// Result of option resolution: the query plus output and retry settings
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    /// The resolved query
    pub query: Query,
    /// Output shape for emitted items
    pub mode: OutputMode,
    /// Retry observer
    pub retry: RetryHandler,
}
