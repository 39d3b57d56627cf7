//! CLI module
//!
//! Command-line interface for streaming log groups.
//!
//! # Commands
//!
//! - `read <region:group> [pattern]` - Stream matching events to stdout

mod commands;
mod runner;

pub use commands::{parse_log_group, Cli, Commands};
pub use runner::Runner;
