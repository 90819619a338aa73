//! Request parameters for the SQL query endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output format for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryFormat {
    /// Structured fields + rows (the only format the typed path accepts)
    #[default]
    Json,
    /// Comma-separated text, returned verbatim
    Csv,
    /// GeoJSON FeatureCollection text, returned verbatim
    GeoJson,
}

impl QueryFormat {
    /// Wire name sent in the `format` parameter.
    pub fn wire_name(&self) -> &'static str {
        match self {
            QueryFormat::Json => "json",
            QueryFormat::Csv => "csv",
            QueryFormat::GeoJson => "geojson",
        }
    }
}

impl fmt::Display for QueryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// Parameters for one query call.
///
/// The endpoint is read-only and enforces its own statement cap
/// upstream; pagination is passed through verbatim.
///
/// # Examples
///
/// ```rust
/// use atlas_link::{QueryFormat, QueryRequest};
///
/// let request = QueryRequest::new("SELECT * FROM forms ORDER BY name")
///     .format(QueryFormat::Csv)
///     .headers(true)
///     .per_page(500);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// SQL statement
    pub q: String,

    /// Result format (default JSON)
    #[serde(default)]
    pub format: QueryFormat,

    /// Include a header row (CSV format)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<bool>,

    /// Include column metadata alongside rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl QueryRequest {
    /// Create a request with default JSON output.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            q: sql.into(),
            format: QueryFormat::Json,
            headers: None,
            metadata: None,
            page: None,
            per_page: None,
        }
    }

    /// Set the output format.
    pub fn format(mut self, format: QueryFormat) -> Self {
        self.format = format;
        self
    }

    /// Request a header row (CSV format).
    pub fn headers(mut self, headers: bool) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Request column metadata alongside rows.
    pub fn metadata(mut self, metadata: bool) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Request a specific result page.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size (upstream default and maximum: 20000).
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Query-string pairs for the GET transport.
    pub(crate) fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("q", self.q.clone()),
            ("format", self.format.wire_name().to_string()),
        ];
        if let Some(headers) = self.headers {
            pairs.push(("headers", headers.to_string()));
        }
        if let Some(metadata) = self.metadata {
            pairs.push(("metadata", metadata.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(QueryFormat::Json.wire_name(), "json");
        assert_eq!(QueryFormat::Csv.wire_name(), "csv");
        assert_eq!(QueryFormat::GeoJson.wire_name(), "geojson");
    }

    #[test]
    fn test_serde_wire_names() {
        assert_eq!(
            serde_json::to_string(&QueryFormat::GeoJson).unwrap(),
            "\"geojson\""
        );
        let parsed: QueryFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(parsed, QueryFormat::Csv);
    }

    #[test]
    fn test_minimal_pairs() {
        let request = QueryRequest::new("SELECT 1");
        let pairs = request.to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("q", "SELECT 1".to_string()),
                ("format", "json".to_string()),
            ]
        );
    }

    #[test]
    fn test_full_pairs() {
        let request = QueryRequest::new("SELECT * FROM records")
            .format(QueryFormat::Csv)
            .headers(true)
            .metadata(false)
            .page(3)
            .per_page(100);

        let pairs = request.to_query_pairs();
        assert!(pairs.contains(&("format", "csv".to_string())));
        assert!(pairs.contains(&("headers", "true".to_string())));
        assert!(pairs.contains(&("metadata", "false".to_string())));
        assert!(pairs.contains(&("page", "3".to_string())));
        assert!(pairs.contains(&("per_page", "100".to_string())));
    }
}
