//! # Metadata & Description Hash
//!
//! The metadata string shown to the wallet in phase 1 and the description
//! hash committed into the phase-2 invoice are both derived from the
//! username alone. For a fixed username the canonical string is
//! byte-identical on every call, so the hash always matches.

use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;

pub const TEXT_PLAIN: &str = "text/plain";

/// Ordered `(content type, content)` entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    /// Metadata describing a payment to `username`
    pub fn for_username(username: &str) -> Self {
        Self {
            entries: vec![(TEXT_PLAIN.to_string(), format!("Payment to {}", username))],
        }
    }

    /// Compact JSON array-of-pairs form, e.g. `[["text/plain","Payment to alice"]]`
    pub fn to_canonical_string(&self) -> String {
        let pairs = self
            .entries
            .iter()
            .map(|(content_type, content)| {
                Value::Array(vec![
                    Value::String(content_type.clone()),
                    Value::String(content.clone()),
                ])
            })
            .collect();
        // `Value`'s Display writes compact JSON and cannot fail
        Value::Array(pairs).to_string()
    }

    /// SHA-256 over the canonical string
    pub fn commitment(&self) -> MetadataCommitment {
        MetadataCommitment::of(self.to_canonical_string().as_bytes())
    }
}

/// 32-byte description hash sent to the invoice backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetadataCommitment([u8; 32]);

impl MetadataCommitment {
    pub fn of(bytes: &[u8]) -> Self {
        Self(Sha256::digest(bytes).into())
    }

    /// Lowercase hex, 64 characters
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for MetadataCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
