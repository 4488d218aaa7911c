// ── Core error types ──
//
// Errors surfaced by podalert-core. Decoding a flat record is NOT an
// error at this level: `record::decode` returns `None` and callers drop
// the alert. `DecodeError` only exists to explain *why* a record was
// dropped (logs, CLI diagnostics).

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Payload validation ───────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    InvalidPayload { field: &'static str, reason: String },

    #[error("Unknown alert kind: {identifier}")]
    UnknownKind { identifier: String },

    // ── Hand-off ─────────────────────────────────────────────────────
    #[error("Alert hand-off closed: receiver dropped")]
    HandoffClosed,

    // ── Persistence ──────────────────────────────────────────────────
    #[error("Pending alert store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pending alert store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a flat record could not be decoded into a `PumpAlert`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("record has no string `identifier`")]
    MissingIdentifier,

    #[error("unrecognized identifier `{0}`")]
    UnknownIdentifier(String),

    #[error("`{identifier}` requires a numeric `{key}`")]
    MissingField {
        identifier: &'static str,
        key: &'static str,
    },

    #[error("`{identifier}` has an out-of-range `{key}`")]
    InvalidField {
        identifier: &'static str,
        key: &'static str,
    },
}
