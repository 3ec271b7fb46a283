//! # Galoy Configuration
//!
//! Connection settings for the GraphQL API.
//! Loaded from environment variables.

use lnurlp_core::BackendError;
use std::env;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// GraphQL API configuration
#[derive(Debug, Clone)]
pub struct GaloyConfig {
    /// GraphQL HTTP endpoint (e.g. https://api.example.com/graphql)
    pub graphql_uri: String,

    /// Optional bearer token
    pub auth_token: Option<String>,

    /// Per-request timeout
    pub timeout: Duration,
}

impl GaloyConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `GRAPHQL_URI`
    ///
    /// Optional:
    /// - `GRAPHQL_AUTH_TOKEN`
    /// - `GRAPHQL_TIMEOUT_SECS` (default 30)
    pub fn from_env() -> Result<Self, BackendError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let graphql_uri = env::var("GRAPHQL_URI")
            .map_err(|_| BackendError::Configuration("GRAPHQL_URI not set".to_string()))?;

        let timeout_secs = match env::var("GRAPHQL_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                BackendError::Configuration(format!(
                    "GRAPHQL_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let auth_token = env::var("GRAPHQL_AUTH_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());

        let config = Self {
            graphql_uri,
            auth_token,
            timeout: Duration::from_secs(timeout_secs),
        };
        config.validate()?;
        Ok(config)
    }

    /// Create config with explicit values (for testing)
    pub fn new(graphql_uri: impl Into<String>) -> Self {
        Self {
            graphql_uri: graphql_uri.into(),
            auth_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Builder: set bearer token
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Builder: set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check the endpoint looks like an HTTP(S) URL
    pub fn validate(&self) -> Result<(), BackendError> {
        if !self.graphql_uri.starts_with("http://") && !self.graphql_uri.starts_with("https://") {
            return Err(BackendError::Configuration(
                "GRAPHQL_URI must start with http:// or https://".to_string(),
            ));
        }
        Ok(())
    }

    /// Get authorization header value, if a token is configured
    pub fn auth_header(&self) -> Option<String> {
        self.auth_token.as_ref().map(|t| format!("Bearer {}", t))
    }
}
