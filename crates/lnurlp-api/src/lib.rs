//! # lnurlp-api
//!
//! HTTP API layer for lnurlp-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The LNURL-pay endpoint, with callback URL reconstruction
//! - Configuration and shared state (one backend client per process)
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/lnurlp/{username}` | Pay request (phase 1) |
//! | GET | `/lnurlp/{username}?amount={msat}` | Invoice (phase 2) |
//! | GET | `/.well-known/lnurlp/{username}` | Lightning Address alias |

pub mod callback;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
