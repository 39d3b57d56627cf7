//! CLI commands and argument parsing

use crate::error::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stream CloudWatch log events to stdout
#[derive(Parser, Debug)]
#[command(name = "cwlogs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Service endpoint override (may contain `{region}`)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Source configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read logs from a group
    Read {
        /// The region and name of the log group, eg us-east-1:my-group-name
        log_group: String,

        /// A search pattern to limit returned logs
        pattern: Option<String>,

        /// Start time in ms
        #[arg(short, long, allow_negative_numbers = true)]
        start: Option<i64>,

        /// End time in ms
        #[arg(short, long, allow_negative_numbers = true)]
        end: Option<i64>,

        /// Write full events as JSON lines instead of bare messages
        #[arg(long)]
        json: bool,

        /// Maximum events per page
        #[arg(long)]
        limit: Option<u32>,
    },
}

/// Split a `region:group` argument.
///
/// Only the first `:` separates; the rest belongs to the group name.
pub fn parse_log_group(arg: &str) -> Result<(String, String)> {
    match arg.split_once(':') {
        Some((region, group)) if !region.is_empty() && !group.is_empty() => {
            Ok((region.to_string(), group.to_string()))
        }
        _ => Err(Error::usage("Missing log group region and name")),
    }
}
