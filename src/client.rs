//! Main Atlas client with builder pattern.
//!
//! Provides the primary interface for talking to an Atlas region and
//! executing resource, query, and media operations.

use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::time::Duration;

use crate::auth::AuthProvider;
use crate::error::{AtlasLinkError, Result};
use crate::models::{QueryRequest, QueryResponse};
use crate::query::{is_retriable, retry_after_secs, QueryExecutor};
use crate::region::Region;
use crate::timeouts::AtlasLinkTimeouts;

/// Main Atlas API client.
///
/// Use [`AtlasLinkClientBuilder`] to construct instances with custom
/// configuration. Clones share the underlying connection pool.
///
/// # Examples
///
/// ```rust,no_run
/// use atlas_link::{AtlasLinkClient, Region};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AtlasLinkClient::builder()
///     .region(Region::Us)
///     .api_token("your-api-token")
///     .build()?;
///
/// let response = client.query("SELECT * FROM forms ORDER BY name").await?;
/// println!("{} forms", response.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AtlasLinkClient {
    base_url: String,
    http_client: reqwest::Client,
    auth: AuthProvider,
    query_executor: QueryExecutor,
    timeouts: AtlasLinkTimeouts,
    max_retries: u32,
}

impl AtlasLinkClient {
    /// Create a new builder for configuring the client
    pub fn builder() -> AtlasLinkClientBuilder {
        AtlasLinkClientBuilder::new()
    }

    /// Execute a SQL query with JSON results.
    ///
    /// # Example
    /// ```rust,no_run
    /// # async fn example() -> atlas_link::Result<()> {
    /// # let client = atlas_link::AtlasLinkClient::builder()
    /// #     .base_url("http://localhost:8080")
    /// #     .build()?;
    /// let response = client
    ///     .query("SELECT _record_id, _status FROM \"Hydrant Inspections\"")
    ///     .await?;
    ///
    /// for row in &response.rows {
    ///     println!("{:?}", row.get("_record_id"));
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn query(&self, sql: &str) -> Result<QueryResponse> {
        self.query_executor.execute(&QueryRequest::new(sql)).await
    }

    /// Execute a query with explicit parameters (pagination, metadata).
    ///
    /// The request must ask for JSON format; CSV and GeoJSON go through
    /// [`query_raw`](Self::query_raw).
    pub async fn query_with(&self, request: &QueryRequest) -> Result<QueryResponse> {
        self.query_executor.execute(request).await
    }

    /// Execute a query and return the response body verbatim (CSV or
    /// GeoJSON text).
    pub async fn query_raw(&self, request: &QueryRequest) -> Result<String> {
        self.query_executor.execute_raw(request).await
    }

    /// Get the configured timeouts
    pub fn timeouts(&self) -> &AtlasLinkTimeouts {
        &self.timeouts
    }

    /// Get the base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a path under `/api/v2`.
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/api/v2/{}", self.base_url, path)
    }

    /// Send a request with transient-network retry.
    ///
    /// The builder closure runs once per attempt: request builders with
    /// bodies cannot be cloned, so each retry rebuilds from scratch.
    pub(crate) async fn execute_with_retry<F>(&self, mut build: F) -> Result<reqwest::Response>
    where
        F: FnMut(&reqwest::Client) -> reqwest::RequestBuilder,
    {
        let mut retries = 0;

        loop {
            let request = self.auth.apply_to_request(build(&self.http_client))?;

            match request.send().await {
                Ok(response) => return Ok(response),
                Err(e) if retries < self.max_retries && is_retriable(&e) => {
                    warn!(
                        "[HTTP] Retriable error (attempt {}/{}): {}",
                        retries + 1,
                        self.max_retries + 1,
                        e
                    );
                    retries += 1;
                    tokio::time::sleep(Duration::from_millis(100 * retries as u64)).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Pass through success responses; map anything else to a typed
    /// error, consuming the body for details.
    pub(crate) async fn check_status(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = retry_after_secs(&response);
        let body = response.text().await.unwrap_or_default();
        let error = AtlasLinkError::from_response(status, retry_after, &body);
        warn!("[HTTP] Error response: status={} error={}", status, error);
        Err(error)
    }
}

/// Builder for configuring [`AtlasLinkClient`] instances.
pub struct AtlasLinkClientBuilder {
    region: Option<Region>,
    base_url: Option<String>,
    auth: AuthProvider,
    timeouts: AtlasLinkTimeouts,
    max_retries: u32,
}

impl AtlasLinkClientBuilder {
    fn new() -> Self {
        Self {
            region: None,
            base_url: None,
            auth: AuthProvider::none(),
            timeouts: AtlasLinkTimeouts::default(),
            max_retries: 3,
        }
    }

    /// Target a hosting region (US/AU/CA/EU).
    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Set an explicit base URL, overriding any region.
    ///
    /// Useful for test servers and proxies.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set API token authentication
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.auth = AuthProvider::api_token(token);
        self
    }

    /// Set authentication provider directly
    pub fn auth(mut self, auth: AuthProvider) -> Self {
        self.auth = auth;
        self
    }

    /// Set the JSON request timeout.
    ///
    /// Shorthand for overriding just `receive_timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.receive_timeout = timeout;
        self
    }

    /// Set comprehensive timeout configuration for all operations
    pub fn timeouts(mut self, timeouts: AtlasLinkTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Set maximum number of retries for transient network failures
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<AtlasLinkClient> {
        let base_url = match (self.base_url, self.region) {
            (Some(url), _) => url.trim_end_matches('/').to_string(),
            (None, Some(region)) => region.base_url().to_string(),
            (None, None) => {
                return Err(AtlasLinkError::ConfigurationError(
                    "either base_url or region is required".into(),
                ))
            }
        };

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        // Connection pooling keeps TCP handshake overhead off repeated
        // calls; idle expiry sits above typical server keep-alive.
        let http_client = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(self.timeouts.receive_timeout)
            .connect_timeout(self.timeouts.connection_timeout)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| AtlasLinkError::ConfigurationError(e.to_string()))?;

        debug!(
            "[CLIENT] Built client for {} (authenticated={})",
            base_url,
            self.auth.is_authenticated()
        );

        let query_executor = QueryExecutor::new(
            base_url.clone(),
            http_client.clone(),
            self.auth.clone(),
            self.max_retries,
        );

        Ok(AtlasLinkClient {
            base_url,
            http_client,
            auth: self.auth,
            query_executor,
            timeouts: self.timeouts,
            max_retries: self.max_retries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_with_region() {
        let client = AtlasLinkClient::builder()
            .region(Region::Eu)
            .api_token("token")
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "https://api.eu.atlasfield.io");
    }

    #[test]
    fn test_builder_base_url_overrides_region() {
        let client = AtlasLinkClient::builder()
            .region(Region::Us)
            .base_url("http://localhost:8080/")
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_builder_requires_target() {
        let result = AtlasLinkClient::builder().api_token("token").build();
        assert!(matches!(
            result,
            Err(AtlasLinkError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_api_url() {
        let client = AtlasLinkClient::builder()
            .base_url("http://localhost:8080")
            .build()
            .unwrap();

        assert_eq!(
            client.api_url("forms.json"),
            "http://localhost:8080/api/v2/forms.json"
        );
    }
}
