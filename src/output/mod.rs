//! Output module
//!
//! Projects raw log events into the shape the consumer asked for, and
//! writes projected items to an async sink.
//!
//! # Overview
//!
//! - [`OutputMode`] - resolved once per stream, never consulted by scheduling
//! - [`project`] - pure event-to-output projection applied at emission time
//! - [`OutputWriter`] - JSON lines for records, raw text for messages

mod writer;

pub use writer::OutputWriter;

use crate::types::LogEvent;
use serde::Serialize;

/// Shape of the items a stream yields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Full [`LogEvent`] records
    #[default]
    Records,
    /// Only each event's message text
    Messages,
}

/// One item emitted by a log stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Output {
    /// A complete event
    Record(LogEvent),
    /// A bare message
    Message(String),
}

impl Output {
    /// The message text, whichever shape this is
    pub fn message(&self) -> &str {
        match self {
            Self::Record(event) => &event.message,
            Self::Message(message) => message,
        }
    }

    /// The full record, if in record shape
    pub fn as_record(&self) -> Option<&LogEvent> {
        match self {
            Self::Record(event) => Some(event),
            Self::Message(_) => None,
        }
    }

    /// Consume into the message text
    pub fn into_message(self) -> String {
        match self {
            Self::Record(event) => event.message,
            Self::Message(message) => message,
        }
    }
}

/// Project an event into the configured output shape
pub fn project(event: LogEvent, mode: OutputMode) -> Output {
    match mode {
        OutputMode::Records => Output::Record(event),
        OutputMode::Messages => Output::Message(event.message),
    }
}
