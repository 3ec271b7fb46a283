//! # Application State
//!
//! Shared state for the Axum application: the pay responder (which holds the
//! single process-wide backend client) and server configuration.

use anyhow::Context;
use lnurlp_core::{PayResponder, PaymentBounds, SharedWalletBackend};
use lnurlp_galoy::GaloyClient;
use serde::Deserialize;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// LNURL-pay handshake over the shared backend
    pub responder: PayResponder,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by the Galoy GraphQL API
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let bounds = load_payment_bounds()?;

        let backend = GaloyClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize wallet backend: {}", e))?;

        Ok(Self::with_backend(config, Arc::new(backend), bounds))
    }

    /// Create state around an existing backend
    pub fn with_backend(
        config: AppConfig,
        backend: SharedWalletBackend,
        bounds: PaymentBounds,
    ) -> Self {
        Self {
            responder: PayResponder::new(backend, bounds),
            config,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LnurlpFile {
    #[serde(default)]
    bounds: Option<PaymentBounds>,
}

/// Load sendable bounds from config file, then apply env overrides
fn load_payment_bounds() -> anyhow::Result<PaymentBounds> {
    let config_paths = [
        "config/lnurlp.toml",
        "../config/lnurlp.toml",
        "../../config/lnurlp.toml",
    ];

    let mut bounds = PaymentBounds::default();

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            bounds = parse_bounds(&content)
                .with_context(|| format!("Failed to parse {}", path))?
                .unwrap_or(bounds);
            tracing::info!("Loaded payment bounds from {}", path);
            break;
        }
    }

    apply_env_overrides(bounds)
}

fn parse_bounds(content: &str) -> anyhow::Result<Option<PaymentBounds>> {
    let file: LnurlpFile = toml::from_str(content)?;
    Ok(file.bounds)
}

fn apply_env_overrides(mut bounds: PaymentBounds) -> anyhow::Result<PaymentBounds> {
    if let Ok(raw) = std::env::var("LNURLP_MIN_SENDABLE") {
        bounds.min_sendable = raw
            .parse()
            .with_context(|| format!("LNURLP_MIN_SENDABLE is not a msat amount: '{}'", raw))?;
    }
    if let Ok(raw) = std::env::var("LNURLP_MAX_SENDABLE") {
        bounds.max_sendable = raw
            .parse()
            .with_context(|| format!("LNURLP_MAX_SENDABLE is not a msat amount: '{}'", raw))?;
    }
    Ok(bounds)
}
