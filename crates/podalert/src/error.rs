//! CLI error types with miette diagnostics.
//!
//! Maps core and config errors into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use podalert_config::ConfigError;
use podalert_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const UNDECODABLE: i32 = 5;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Alerts ───────────────────────────────────────────────────────

    #[error("Unknown alert kind '{kind}'")]
    #[diagnostic(
        code(podalert::unknown_kind),
        help("Run: podalert alerts list to see every alert identifier")
    )]
    UnknownKind { kind: String },

    #[error("No record could be decoded ({count} rejected)")]
    #[diagnostic(
        code(podalert::undecodable),
        help("{reasons}")
    )]
    Undecodable { count: usize, reasons: String },

    #[error("No pending alert '{identifier}'")]
    #[diagnostic(
        code(podalert::not_pending),
        help("Run: podalert pending list to see pending alerts")
    )]
    NotPending { identifier: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(podalert::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(
        code(podalert::config),
        help("Check the config file at `podalert config path`, or recreate it with: podalert config init")
    )]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("'{action}' needs an interactive terminal")]
    #[diagnostic(
        code(podalert::confirmation_required),
        help("Use --yes (-y) to accept defaults in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Internal ─────────────────────────────────────────────────────

    #[error("{0}")]
    #[diagnostic(code(podalert::internal))]
    Internal(String),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(podalert::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotPending { .. } => exit_code::NOT_FOUND,
            Self::Undecodable { .. } => exit_code::UNDECODABLE,
            Self::UnknownKind { .. }
            | Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::Config(ConfigError::Validation { .. } | ConfigError::UnknownKey { .. }) => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidPayload { field, reason } => CliError::Validation {
                field: field.into(),
                reason,
            },
            CoreError::UnknownKind { identifier } => CliError::UnknownKind { kind: identifier },
            CoreError::Io(e) => CliError::Io(e),
            CoreError::Json(e) => CliError::Json(e),
            other @ CoreError::HandoffClosed => CliError::Internal(other.to_string()),
        }
    }
}
