//! SQL query execution with HTTP transport.
//!
//! The query endpoint is read-only and PostGIS-enabled; the client
//! neither inspects nor enforces that, statements go upstream verbatim.

use log::{debug, warn};
use std::time::Instant;

use crate::auth::AuthProvider;
use crate::error::{AtlasLinkError, Result};
use crate::models::{QueryFormat, QueryRequest, QueryResponse};

/// Handles SQL query execution via HTTP.
#[derive(Clone)]
pub struct QueryExecutor {
    base_url: String,
    http_client: reqwest::Client,
    auth: AuthProvider,
    max_retries: u32,
}

impl QueryExecutor {
    pub(crate) fn new(
        base_url: String,
        http_client: reqwest::Client,
        auth: AuthProvider,
        max_retries: u32,
    ) -> Self {
        Self {
            base_url,
            http_client,
            auth,
            max_retries,
        }
    }

    /// Execute a query in JSON format and decode the result set.
    ///
    /// Fails with `ConfigurationError` when the request asks for CSV or
    /// GeoJSON; those go through [`execute_raw`](Self::execute_raw).
    pub async fn execute(&self, request: &QueryRequest) -> Result<QueryResponse> {
        if request.format != QueryFormat::Json {
            return Err(AtlasLinkError::ConfigurationError(format!(
                "typed query results require the json format, got {}",
                request.format
            )));
        }

        let response = self.send(request).await?;

        let parse_start = Instant::now();
        let query_response: QueryResponse = response.json().await?;
        debug!(
            "[QUERY] Decoded {} rows in {:?}",
            query_response.len(),
            parse_start.elapsed()
        );

        Ok(query_response)
    }

    /// Execute a query and return the body verbatim (CSV or GeoJSON).
    pub async fn execute_raw(&self, request: &QueryRequest) -> Result<String> {
        let response = self.send(request).await?;
        Ok(response.text().await?)
    }

    /// Send the request with transient-network retry, returning a
    /// success-status response.
    async fn send(&self, request: &QueryRequest) -> Result<reqwest::Response> {
        let url = format!("{}/api/v2/query", self.base_url);
        let pairs = request.to_query_pairs();

        let mut sql_preview: String = request.q.chars().take(80).collect();
        if sql_preview.len() < request.q.len() {
            sql_preview.push_str("...");
        }
        debug!(
            "[QUERY] Starting query: \"{}\" (len={}, format={})",
            sql_preview.replace('\n', " "),
            request.q.len(),
            request.format
        );

        let mut retries = 0;
        let overall_start = Instant::now();

        loop {
            let req_builder = self.http_client.get(&url).query(&pairs);
            let req_builder = self.auth.apply_to_request(req_builder)?;

            let attempt_start = Instant::now();
            debug!(
                "[HTTP] Sending GET to {} (attempt {}/{})",
                url,
                retries + 1,
                self.max_retries + 1
            );

            match req_builder.send().await {
                Ok(response) => {
                    let status = response.status();
                    debug!(
                        "[HTTP] Response received: status={} duration={:?}",
                        status,
                        attempt_start.elapsed()
                    );

                    if status.is_success() {
                        debug!("[QUERY] Success: total={:?}", overall_start.elapsed());
                        return Ok(response);
                    }

                    let retry_after = retry_after_secs(&response);
                    let body = response.text().await.unwrap_or_default();
                    let error = AtlasLinkError::from_response(status, retry_after, &body);
                    warn!("[HTTP] Query error: status={} error={}", status, error);
                    return Err(error);
                }
                Err(e) if retries < self.max_retries && is_retriable(&e) => {
                    warn!(
                        "[HTTP] Retriable error (attempt {}/{}): {}",
                        retries + 1,
                        self.max_retries + 1,
                        e
                    );
                    retries += 1;
                    tokio::time::sleep(tokio::time::Duration::from_millis(100 * retries as u64))
                        .await;
                    continue;
                }
                Err(e) => {
                    warn!(
                        "[HTTP] Fatal error: {} total={:?}",
                        e,
                        overall_start.elapsed()
                    );
                    return Err(e.into());
                }
            }
        }
    }
}

pub(crate) fn is_retriable(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}

pub(crate) fn retry_after_secs(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}
