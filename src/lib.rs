// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # cwlogs
//!
//! Demand-driven streams over CloudWatch Logs filter queries.
//!
//! A query is validated once, then read page by page as the consumer
//! polls. Nothing is fetched ahead of demand and at most one request is
//! in flight at a time.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cwlogs::{connect, ReadOptions, Result, SourceConfig};
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let options = ReadOptions::new("us-east-1", "/aws/lambda/my-fn")
//!         .pattern("ERROR")
//!         .messages(true);
//!
//!     let mut stream = connect(options, &SourceConfig::default())?;
//!     while let Some(item) = stream.next().await {
//!         println!("{}", item?.message());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 LogStream (futures::Stream)                     │
//! │  poll_next → drain buffer | await fetch | start fetch | end     │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌────────────┬─────────────────┴─┬───────────────┬────────────────┐
//! │   Query    │      Fetch        │    Source     │    Output      │
//! ├────────────┼───────────────────┼───────────────┼────────────────┤
//! │ Validate   │ One call per page │ PageSource    │ Records        │
//! │ Defaults   │ Relay retries     │ CloudWatch    │ Messages       │
//! │ Time range │ Wrap failures     │ HTTP + retry  │ JSON lines     │
//! └────────────┴───────────────────┴───────────────┴────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Source configuration
pub mod config;

/// HTTP client with retry and rate limiting
pub mod http;

/// Option validation and query resolution
pub mod query;

/// Single page fetches and retry notifications
pub mod fetch;

/// Page sources
pub mod source;

/// Demand-driven log stream
pub mod stream;

/// Output projection and writing
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::SourceConfig;
pub use fetch::{Page, PageRequest, RetryEvent, RetryHandler};
pub use output::{Output, OutputMode, OutputWriter};
pub use query::{Query, ReadOptions};
pub use source::{CloudWatchSource, PageSource};
pub use stream::{connect, readable, LogStream};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
