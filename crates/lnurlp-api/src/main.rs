//! # lnurlp
//!
//! LNURL-pay responder in front of a Galoy wallet backend.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export GRAPHQL_URI=https://api.example.com/graphql
//!
//! # Run the server
//! lnurlp
//! ```

use lnurlp_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    print_banner();

    // Initialize application state (builds the shared backend client once)
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();
    let bounds = state.responder.bounds();

    info!("Environment: {}", state.config.environment);
    info!("Wallet backend: {}", state.responder.backend_name());
    info!(
        "Sendable bounds: min={}, max={}",
        bounds.min_sendable, bounds.max_sendable
    );

    // Create router
    let app = routes::create_router(state);

    info!("⚡ lnurlp starting on http://{}", addr);

    if !is_prod {
        info!("Health: http://{}/health", addr);
        info!("Pay request: GET http://{}/lnurlp/{{username}}", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("lnurlp stopped");
    Ok(())
}

/// `LOG_FORMAT=json` switches to structured output
fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let json = std::env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn print_banner() {
    println!(
        r#"
  ⚡ lnurlp ⚡
  ━━━━━━━━━━━━━━━━━━━━━━━
  LNURL-pay responder
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
