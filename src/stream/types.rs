//! Stream types
//!
//! Scheduler phases and per-stream statistics.

/// Where the demand scheduler currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No fetch outstanding and nothing emitted since the last page
    #[default]
    Idle,
    /// Emitting buffered events
    Draining,
    /// A page fetch is outstanding
    Fetching,
    /// Every page was delivered; the stream has ended
    Exhausted,
    /// A fetch failed; the error was delivered and the stream has ended
    Failed,
}

impl Phase {
    /// Check if the stream can make no further progress
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exhausted | Self::Failed)
    }
}

/// Counters for one stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Fetches started
    pub fetches_started: u64,
    /// Pages received
    pub pages_fetched: u64,
    /// Events received across all pages
    pub events_received: u64,
    /// Items handed to the consumer
    pub events_emitted: u64,
}

impl StreamStats {
    /// Record a started fetch
    pub fn add_fetch(&mut self) {
        self.fetches_started += 1;
    }

    /// Record a received page
    pub fn add_page(&mut self, events: usize) {
        self.pages_fetched += 1;
        self.events_received += events as u64;
    }

    /// Record an emitted item
    pub fn add_emitted(&mut self) {
        self.events_emitted += 1;
    }
}
