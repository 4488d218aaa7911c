//! Shared helpers for command handlers.

use std::io::{IsTerminal, Read};
use std::path::Path;

use chrono::{DateTime, Utc};

use podalert_core::{AlertKind, AlertSlot, PumpAlert, ReminderOffset};

use crate::cli::AlertSpec;
use crate::error::CliError;

/// Build a `PumpAlert` from command-line arguments.
pub fn build_alert(spec: &AlertSpec) -> Result<PumpAlert, CliError> {
    let kind = AlertKind::from_identifier(&spec.kind)?;

    let slot = spec.slot.map(AlertSlot::try_from).transpose()?;
    if slot.is_some() && !kind.carries_slot() {
        tracing::warn!(%kind, "ignoring --slot: this alert is never attributed to a slot");
    }

    let amount = match kind {
        AlertKind::LowReservoir => spec.value,
        AlertKind::UserPodExpiration => match spec.hours {
            Some(hours) => Some(ReminderOffset::from_hours(hours)?.as_secs()),
            None => spec.offset,
        },
        _ => None,
    };

    Ok(PumpAlert::build(kind, slot, amount)?)
}

/// Parse an optional RFC 3339 timestamp, defaulting to now.
pub fn parse_time(raw: Option<&str>) -> Result<DateTime<Utc>, CliError> {
    match raw {
        None => Ok(Utc::now()),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| CliError::Validation {
                field: "at".into(),
                reason: format!("'{s}' is not an RFC 3339 timestamp: {e}"),
            }),
    }
}

/// Read a JSON document from a file, or stdin when `path` is `None` / `-`.
pub fn read_json_input(path: Option<&Path>) -> Result<serde_json::Value, CliError> {
    let contents = match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&contents)?)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(action: &str, message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

/// Map a dialoguer failure into `CliError`.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Internal(format!("prompt failed: {e}"))
}

/// Format an optional slot for display.
pub fn slot_label(slot: Option<AlertSlot>) -> String {
    slot.map_or_else(|| "-".into(), |s| format!("{} ({})", s.raw(), s.name()))
}
