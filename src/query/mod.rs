//! Query module
//!
//! Validates caller options and resolves them into an immutable [`Query`].
//!
//! # Overview
//!
//! Options are checked field by field in a fixed order (region, group, start,
//! end, pattern, retry, messages, limit) and the first offending field is
//! reported as [`Error::InvalidOptions`](crate::Error::InvalidOptions).
//! Defaults are applied only once every present field has passed.

mod normalize;
mod types;

pub use normalize::{DEFAULT_WINDOW_MINUTES, MAX_PAGE_LIMIT};
pub use types::{Query, ReadOptions, ResolvedOptions};
