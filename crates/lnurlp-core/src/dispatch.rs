//! # Phase Dispatch
//!
//! Decides whether a request is phase 1 (discovery) or phase 2 (invoice).

use crate::model::MilliSatoshi;
use std::num::IntErrorKind;
use tracing::warn;

/// Which half of the handshake a request belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayPhase {
    /// No amount: answer with bounds, metadata and the callback URL
    Discovery { callback: String },
    /// Amount given: answer with an invoice
    Invoice { amount: MilliSatoshi },
    /// Amount is an integer too large for a millisatoshi count: answer with an error
    OutOfRange { amount: String },
}

impl PayPhase {
    /// Select the phase from the raw `amount` query value.
    ///
    /// An amount that is not a non-negative integer is treated as absent.
    /// The callback is only built for discovery requests.
    pub fn select<F>(raw_amount: Option<&str>, callback: F) -> Self
    where
        F: FnOnce() -> String,
    {
        match parse_amount(raw_amount) {
            AmountParam::Valid(amount) => PayPhase::Invoice { amount },
            AmountParam::OutOfRange(amount) => PayPhase::OutOfRange { amount },
            AmountParam::Absent => PayPhase::Discovery {
                callback: callback(),
            },
        }
    }

    pub fn is_discovery(&self) -> bool {
        matches!(self, PayPhase::Discovery { .. })
    }

    /// Short label for logs
    pub fn name(&self) -> &'static str {
        match self {
            PayPhase::Discovery { .. } => "discovery",
            PayPhase::Invoice { .. } => "invoice",
            PayPhase::OutOfRange { .. } => "out_of_range",
        }
    }
}

/// The `amount` query value, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParam {
    /// Missing, empty or malformed
    Absent,
    Valid(MilliSatoshi),
    /// All digits, but larger than `u64::MAX`
    OutOfRange(String),
}

/// Parse the `amount` query value in millisatoshi.
pub fn parse_amount(raw: Option<&str>) -> AmountParam {
    let Some(raw) = raw else {
        return AmountParam::Absent;
    };
    if raw.is_empty() {
        return AmountParam::Absent;
    }
    match raw.parse::<MilliSatoshi>() {
        Ok(amount) => AmountParam::Valid(amount),
        Err(e)
            if *e.kind() == IntErrorKind::PosOverflow
                && raw.bytes().all(|b| b.is_ascii_digit()) =>
        {
            warn!(amount = raw, "Amount overflows millisatoshi range");
            AmountParam::OutOfRange(raw.to_string())
        }
        Err(e) => {
            warn!(amount = raw, error = %e, "Ignoring malformed amount, answering discovery");
            AmountParam::Absent
        }
    }
}
