//! CloudWatch Logs `FilterLogEvents` source
//!
//! Speaks the AWS JSON 1.1 protocol: every call is a POST to the service
//! root with the operation named in the `X-Amz-Target` header.

use super::PageSource;
use crate::config::SourceConfig;
use crate::error::{Error, Result};
use crate::fetch::{Page, PageRequest, RetryHandler};
use crate::http::{HttpClient, RequestConfig};
use crate::types::LogEvent;
use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// `X-Amz-Target` value for the filter operation
pub const FILTER_LOG_EVENTS_TARGET: &str = "Logs_20140328.FilterLogEvents";

const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// Request body for `FilterLogEvents`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FilterLogEventsRequest<'a> {
    log_group_name: &'a str,
    start_time: i64,
    end_time: i64,
    interleaved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter_pattern: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

/// Response body for `FilterLogEvents`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilterLogEventsResponse {
    #[serde(default)]
    events: Vec<LogEvent>,
    #[serde(default)]
    next_token: Option<String>,
}

/// Page source backed by a CloudWatch Logs compatible endpoint
#[derive(Debug)]
pub struct CloudWatchSource {
    client: HttpClient,
    endpoint: String,
}

impl CloudWatchSource {
    /// Create a source for a region using the given configuration
    pub fn new(region: &str, config: &SourceConfig) -> Result<Self> {
        let endpoint = config.endpoint_for(region)?;
        let client = HttpClient::with_config(config.http_client_config())?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Create a source from an existing client and endpoint
    pub fn with_client(client: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// The endpoint requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PageSource for CloudWatchSource {
    async fn fetch_page(&self, request: PageRequest, on_retry: &RetryHandler) -> Result<Page> {
        let query = request.query();
        let body = FilterLogEventsRequest {
            log_group_name: &query.group,
            start_time: query.start,
            end_time: query.end,
            interleaved: true,
            filter_pattern: query.pattern.as_deref(),
            next_token: request.token(),
            limit: query.limit,
        };

        let config = RequestConfig::new()
            .header("Content-Type", CONTENT_TYPE)
            .header("X-Amz-Target", FILTER_LOG_EVENTS_TARGET)
            .json(serde_json::to_value(&body)?);

        let response: FilterLogEventsResponse = self
            .client
            .request_json(Method::POST, &self.endpoint, config, on_retry)
            .await?;

        // An empty token is the service's way of saying "no more pages" too
        let next_token = response.next_token.filter(|t| !t.is_empty());
        if next_token.as_deref() == request.token() && next_token.is_some() {
            return Err(Error::Other(
                "service returned the same continuation token twice".to_string(),
            ));
        }

        Ok(Page::new(response.events, next_token))
    }
}
