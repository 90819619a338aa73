//! Authentication provider for the Atlas client.
//!
//! The upstream authenticates every call with an `X-ApiToken` header.

use crate::error::Result;

/// Authentication credentials for the Atlas API.
///
/// # Examples
///
/// ```rust
/// use atlas_link::AuthProvider;
///
/// // API token (the only scheme the upstream supports)
/// let auth = AuthProvider::api_token("abc123".to_string());
///
/// // No authentication (local test servers)
/// let auth = AuthProvider::none();
/// ```
#[derive(Debug, Clone)]
pub enum AuthProvider {
    /// Per-account API token, sent as `X-ApiToken`
    ApiToken(String),

    /// No authentication (test servers)
    None,
}

impl AuthProvider {
    /// Create API token authentication
    pub fn api_token(token: impl Into<String>) -> Self {
        Self::ApiToken(token.into())
    }

    /// No authentication (for test servers)
    pub fn none() -> Self {
        Self::None
    }

    /// Attach authentication headers to an HTTP request builder
    pub fn apply_to_request(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder> {
        match self {
            Self::ApiToken(token) => Ok(request.header("X-ApiToken", token)),
            Self::None => Ok(request),
        }
    }

    /// Check if authentication is configured
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_provider_creation() {
        let token = AuthProvider::api_token("abc123");
        assert!(token.is_authenticated());

        let none = AuthProvider::none();
        assert!(!none.is_authenticated());
    }

    #[test]
    fn test_api_token_applies_cleanly() {
        let auth = AuthProvider::api_token("abc123");

        let client = reqwest::Client::new();
        let request = client.get("http://localhost:8080");
        let result = auth.apply_to_request(request);

        assert!(result.is_ok());
    }
}
