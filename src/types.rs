//! Common types used throughout cwlogs
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

/// Milliseconds since the Unix epoch
pub type EpochMillis = i64;

// ============================================================================
// Log Event
// ============================================================================

/// A single log event as returned by a filter query.
///
/// Field names follow the service's wire format so structured output can be
/// fed back into other CloudWatch tooling.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    /// Event time in milliseconds since the epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<EpochMillis>,

    /// Raw log message
    #[serde(default)]
    pub message: String,

    /// Name of the log stream the event belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_stream_name: Option<String>,

    /// Service-assigned event id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,

    /// Time the service ingested the event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingestion_time: Option<EpochMillis>,
}

impl LogEvent {
    /// Create an event carrying only a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Set the event timestamp
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: EpochMillis) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set the log stream name
    #[must_use]
    pub fn with_stream(mut self, name: impl Into<String>) -> Self {
        self.log_stream_name = Some(name.into());
        self
    }

    /// Set the event id
    #[must_use]
    pub fn with_event_id(mut self, id: impl Into<String>) -> Self {
        self.event_id = Some(id.into());
        self
    }

    /// Event timestamp as a UTC datetime
    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(millis_to_utc)
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Utilities
// ============================================================================

/// Convert epoch milliseconds into a UTC datetime
pub fn millis_to_utc(millis: EpochMillis) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
