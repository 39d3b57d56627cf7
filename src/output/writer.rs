//! Output writer
//!
//! Serializes stream items to any `AsyncWrite` sink.

use super::Output;
use crate::error::Result;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Writes stream items to an async sink.
///
/// Records become one JSON object per line. Messages are written verbatim,
/// with a newline appended when the message does not already end in one.
pub struct OutputWriter<W> {
    inner: W,
    items_written: u64,
}

impl<W: AsyncWrite + Unpin> OutputWriter<W> {
    /// Wrap a sink
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            items_written: 0,
        }
    }

    /// Write one item
    pub async fn write(&mut self, item: &Output) -> Result<()> {
        match item {
            Output::Record(event) => {
                let mut line = serde_json::to_vec(event)?;
                line.push(b'\n');
                self.inner.write_all(&line).await?;
            }
            Output::Message(message) => {
                self.inner.write_all(message.as_bytes()).await?;
                if !message.ends_with('\n') {
                    self.inner.write_all(b"\n").await?;
                }
            }
        }
        self.items_written += 1;
        Ok(())
    }

    /// Flush the sink
    pub async fn flush(&mut self) -> Result<()> {
        self.inner.flush().await?;
        Ok(())
    }

    /// Number of items written so far
    pub fn items_written(&self) -> u64 {
        self.items_written
    }

    /// Recover the sink
    pub fn into_inner(self) -> W {
        self.inner
    }
}
