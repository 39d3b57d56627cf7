//! Log stream module
//!
//! Turns page-at-a-time fetches into a pull-based [`futures::Stream`].
//!
//! # Overview
//!
//! Every `poll_next` call is a demand signal. The stream answers it from its
//! buffer when it can; when the buffer is empty it either ends (no pages
//! left), waits on the fetch already in flight, or starts exactly one new
//! fetch. A consumer that stops polling never causes another fetch, so at
//! most one page is ever held ahead of demand.
//!
//! ```text
//!   poll_next ─▶ buffer non-empty? ─yes─▶ emit one item (Draining)
//!                   │ no
//!                   ▼
//!            fetch in flight? ─yes─▶ poll it ─ Pending ─▶ wait
//!                   │ no                │ Ok(page) ─▶ buffer, loop
//!                   ▼                   └ Err ─▶ emit error (Failed)
//!            cursor exhausted? ─yes─▶ end (Exhausted)
//!                   │ no
//!                   ▼
//!            start fetch (Fetching), loop
//! ```

mod types;

pub use types::{Phase, StreamStats};

use crate::config::SourceConfig;
use crate::error::{Error, Result};
use crate::fetch::{Cursor, Page, PageFetcher};
use crate::output::{project, Output, OutputMode};
use crate::query::{Query, ReadOptions};
use crate::source::{CloudWatchSource, PageSource};
use crate::types::LogEvent;
use futures::future::BoxFuture;
use futures::stream::FusedStream;
use futures::{FutureExt, Stream};
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tracing::{debug, trace, warn};

type PageFuture = BoxFuture<'static, Result<Page>>;

/// Create a stream over a log group.
///
/// Options are validated and resolved before anything touches the source;
/// an invalid configuration fails here with
/// [`Error::InvalidOptions`](crate::Error::InvalidOptions).
pub fn readable(options: ReadOptions, source: Arc<dyn PageSource>) -> Result<LogStream> {
    let resolved = options.resolve()?;
    let fetcher = PageFetcher::new(source, resolved.query, resolved.retry);
    Ok(LogStream::new(fetcher, resolved.mode))
}

/// Create a stream backed by the CloudWatch HTTP source for the options' region
pub fn connect(options: ReadOptions, config: &SourceConfig) -> Result<LogStream> {
    let resolved = options.resolve()?;
    let source = CloudWatchSource::new(&resolved.query.region, config)?;
    let fetcher = PageFetcher::new(Arc::new(source), resolved.query, resolved.retry);
    Ok(LogStream::new(fetcher, resolved.mode))
}

/// Demand-driven stream of log events.
///
/// Yields `Ok(Output)` items in exactly the order the service returned them,
/// then ends. A fetch failure is yielded once as `Err` and ends the stream.
/// Not restartable.
pub struct LogStream {
    fetcher: PageFetcher,
    mode: OutputMode,
    buffer: VecDeque<LogEvent>,
    cursor: Cursor,
    in_flight: Option<PageFuture>,
    phase: Phase,
    stats: StreamStats,
}

impl LogStream {
    /// Create a stream from a fetcher
    pub fn new(fetcher: PageFetcher, mode: OutputMode) -> Self {
        Self {
            fetcher,
            mode,
            buffer: VecDeque::new(),
            cursor: Cursor::Start,
            in_flight: None,
            phase: Phase::Idle,
            stats: StreamStats::default(),
        }
    }

    /// The resolved query
    pub fn query(&self) -> &Query {
        self.fetcher.query()
    }

    /// Output shape of emitted items
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Current scheduler phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Events fetched but not yet emitted
    pub fn pending_events(&self) -> usize {
        self.buffer.len()
    }

    /// Check if a fetch is outstanding
    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Counters for this stream
    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    fn start_fetch(&mut self) {
        let fetcher = self.fetcher.clone();
        let cursor = self.cursor.clone();
        trace!(cursor = ?cursor, "Starting page fetch");

        self.in_flight = Some(async move { fetcher.fetch(&cursor).await }.boxed());
        self.phase = Phase::Fetching;
        self.stats.add_fetch();
    }

    fn accept_page(&mut self, page: Page) {
        self.cursor = Cursor::after(&page);
        self.stats.add_page(page.events.len());
        trace!(
            events = page.events.len(),
            exhausted = self.cursor.is_exhausted(),
            "Buffered page"
        );
        self.buffer.extend(page.events);
        self.phase = Phase::Idle;
    }

    fn fail(&mut self, err: Error) -> Error {
        warn!(
            group = %self.fetcher.query().group,
            discarded = self.buffer.len(),
            "Log stream failed: {err}"
        );
        self.buffer.clear();
        self.cursor = Cursor::Exhausted;
        self.phase = Phase::Failed;
        err
    }

    fn finish(&mut self) {
        debug!(
            group = %self.fetcher.query().group,
            pages = self.stats.pages_fetched,
            events = self.stats.events_emitted,
            "Log stream exhausted"
        );
        self.phase = Phase::Exhausted;
    }
}

impl Stream for LogStream {
    type Item = Result<Output>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if this.phase.is_terminal() {
                return Poll::Ready(None);
            }

            if let Some(event) = this.buffer.pop_front() {
                this.phase = Phase::Draining;
                this.stats.add_emitted();
                return Poll::Ready(Some(Ok(project(event, this.mode))));
            }

            if let Some(pending) = this.in_flight.as_mut() {
                let result = match pending.poll_unpin(cx) {
                    Poll::Pending => return Poll::Pending,
                    Poll::Ready(result) => result,
                };
                this.in_flight = None;

                match result {
                    Ok(page) => {
                        this.accept_page(page);
                        continue;
                    }
                    Err(err) => return Poll::Ready(Some(Err(this.fail(err)))),
                }
            }

            if this.cursor.is_exhausted() {
                this.finish();
                return Poll::Ready(None);
            }

            this.start_fetch();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.phase.is_terminal() {
            (0, Some(0))
        } else {
            (self.buffer.len(), None)
        }
    }
}

impl FusedStream for LogStream {
    fn is_terminated(&self) -> bool {
        self.phase.is_terminal()
    }
}

impl std::fmt::Debug for LogStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogStream")
            .field("query", self.fetcher.query())
            .field("mode", &self.mode)
            .field("phase", &self.phase)
            .field("pending_events", &self.buffer.len())
            .field("cursor", &self.cursor)
            .field("fetching", &self.in_flight.is_some())
            .finish()
    }
}
