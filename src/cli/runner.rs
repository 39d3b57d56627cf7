//! CLI runner - executes commands

use crate::cli::commands::{parse_log_group, Cli, Commands};
use crate::config::SourceConfig;
use crate::error::Result;
use crate::fetch::RetryHandler;
use crate::output::OutputWriter;
use crate::query::ReadOptions;
use crate::stream::connect;
use crate::types::OptionStringExt;
use futures::StreamExt;
use std::time::Instant;
use tokio::io::AsyncWrite;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing to stdout
    pub async fn run(&self) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        self.run_with_writer(&mut stdout).await?;
        Ok(())
    }

    /// Run the CLI command against any sink, returning the items written
    pub async fn run_with_writer<W: AsyncWrite + Unpin>(&self, out: &mut W) -> Result<u64> {
        match &self.cli.command {
            Commands::Read { .. } => self.read(out).await,
        }
    }

    /// Load the source configuration, applying the endpoint override
    pub fn source_config(&self) -> Result<SourceConfig> {
        let config = match &self.cli.config {
            Some(path) => SourceConfig::from_file(path)?,
            None => SourceConfig::default(),
        };

        Ok(match &self.cli.endpoint {
            Some(endpoint) => config.with_endpoint(endpoint.clone()),
            None => config,
        })
    }

    /// Build stream options from the `read` arguments
    pub fn read_options(&self) -> Result<ReadOptions> {
        let Commands::Read {
            log_group,
            pattern,
            start,
            end,
            json,
            limit,
        } = &self.cli.command;

        let (region, group) = parse_log_group(log_group)?;
        Ok(ReadOptions {
            region: Some(region),
            group: Some(group),
            start: *start,
            end: *end,
            pattern: pattern.clone().none_if_empty(),
            retry: Some(log_retries()),
            messages: Some(!*json),
            limit: *limit,
        })
    }

    /// Stream a log group to the sink
    async fn read<W: AsyncWrite + Unpin>(&self, out: &mut W) -> Result<u64> {
        let options = self.read_options()?;
        let config = self.source_config()?;
        let mut stream = connect(options, &config)?;

        let query = stream.query();
        info!(
            region = %query.region,
            group = %query.group,
            start = query.start,
            end = query.end,
            "Reading log group"
        );

        let started = Instant::now();
        let mut writer = OutputWriter::new(out);
        let mut outcome = Ok(());

        while let Some(item) = stream.next().await {
            match item {
                Ok(output) => writer.write(&output).await?,
                Err(e) => {
                    outcome = Err(e);
                    break;
                }
            }
        }
        writer.flush().await?;

        let stats = stream.stats();
        info!(
            pages = stats.pages_fetched,
            events = writer.items_written(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Read complete"
        );

        outcome.map(|()| writer.items_written())
    }
}

/// Retry handler that reports each retry as a warning
fn log_retries() -> RetryHandler {
    RetryHandler::new(|event| {
        warn!(
            attempt = event.attempt,
            max_retries = event.max_retries,
            delay_ms = event.delay.as_millis() as u64,
            reason = %event.reason,
            "Retrying FilterLogEvents"
        );
    })
}
