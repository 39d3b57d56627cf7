//! Option validation and default resolution

use super::types::{Query, ReadOptions, ResolvedOptions};
use crate::error::{Error, Result};
use crate::output::OutputMode;
use crate::types::{EpochMillis, JsonValue};
use chrono::{DateTime, Duration, Utc};
use serde_json::Map;

/// Width of the default time window, ending now
pub const DEFAULT_WINDOW_MINUTES: i64 = 15;

/// Largest page size the service accepts
pub const MAX_PAGE_LIMIT: u32 = 10_000;

impl ReadOptions {
    /// Parse loosely-typed options, checking each field's type in order.
    ///
    /// Fields are checked as region, group, start, end, pattern, retry,
    /// messages, limit; the first failure is returned. `null` counts as
    /// absent. A `retry` value can never be supplied through JSON since it
    /// is not callable.
    pub fn from_json(value: &JsonValue) -> Result<Self> {
        let empty = Map::new();
        let obj = value.as_object().unwrap_or(&empty);

        let region = required_string(obj, "region")?;
        let group = required_string(obj, "group")?;
        let start = optional_number(obj, "start")?;
        let end = optional_number(obj, "end")?;
        let pattern = optional_string(obj, "pattern")?;

        if present(obj, "retry").is_some() {
            return Err(Error::invalid_option(
                "retry",
                "must be a callable retry handler",
            ));
        }

        let messages = match present(obj, "messages") {
            None => None,
            Some(JsonValue::Bool(b)) => Some(*b),
            Some(_) => return Err(Error::invalid_option("messages", "must be a boolean")),
        };

        let limit = match present(obj, "limit") {
            None => None,
            Some(v) => Some(
                v.as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(|| Error::invalid_option("limit", "must be a positive integer"))?,
            ),
        };

        Ok(Self {
            region: Some(region),
            group: Some(group),
            start,
            end,
            pattern,
            retry: None,
            messages,
            limit,
        })
    }

    /// Resolve against the current time
    pub fn resolve(self) -> Result<ResolvedOptions> {
        self.resolve_at(Utc::now())
    }

    /// Resolve against an explicit clock reading
    pub fn resolve_at(self, now: DateTime<Utc>) -> Result<ResolvedOptions> {
        let region = self
            .region
            .filter(|r| !r.is_empty())
            .ok_or_else(|| Error::invalid_option("region", "required non-empty string"))?;
        let group = self
            .group
            .filter(|g| !g.is_empty())
            .ok_or_else(|| Error::invalid_option("group", "required non-empty string"))?;

        let now_ms = now.timestamp_millis();
        let start = self
            .start
            .unwrap_or_else(|| (now - Duration::minutes(DEFAULT_WINDOW_MINUTES)).timestamp_millis());
        let end = self.end.unwrap_or(now_ms);

        if start > end {
            return Err(Error::invalid_option(
                "end",
                format!("end ({end}) must not precede start ({start})"),
            ));
        }

        if let Some(limit) = self.limit {
            if limit == 0 || limit > MAX_PAGE_LIMIT {
                return Err(Error::invalid_option(
                    "limit",
                    format!("must be between 1 and {MAX_PAGE_LIMIT}"),
                ));
            }
        }

        let mode = if self.messages.unwrap_or(false) {
            OutputMode::Messages
        } else {
            OutputMode::Records
        };

        Ok(ResolvedOptions {
            query: Query {
                region,
                group,
                pattern: self.pattern,
                start,
                end,
                limit: self.limit,
            },
            mode,
            retry: self.retry.unwrap_or_default(),
        })
    }
}

fn present<'a>(obj: &'a Map<String, JsonValue>, key: &str) -> Option<&'a JsonValue> {
    obj.get(key).filter(|v| !v.is_null())
}

fn required_string(obj: &Map<String, JsonValue>, key: &'static str) -> Result<String> {
    match present(obj, key) {
        Some(JsonValue::String(s)) if !s.is_empty() => Ok(s.clone()),
        _ => Err(Error::invalid_option(key, "required non-empty string")),
    }
}

fn optional_string(obj: &Map<String, JsonValue>, key: &'static str) -> Result<Option<String>> {
    match present(obj, key) {
        None => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(Error::invalid_option(key, "must be a string")),
    }
}

fn optional_number(obj: &Map<String, JsonValue>, key: &'static str) -> Result<Option<EpochMillis>> {
    match present(obj, key) {
        None => Ok(None),
        Some(JsonValue::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .map(Some)
            .ok_or_else(|| Error::invalid_option(key, "must be a number")),
        Some(_) => Err(Error::invalid_option(key, "must be a number")),
    }
}
