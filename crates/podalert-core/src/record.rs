// ── Flat record codec ──
//
// Bridges `PumpAlert` to and from the untyped string-keyed record used
// for persisted and pending alerts. The record shape is a storage
// contract shared with previously persisted data:
//
//   identifier  string            always
//   slot        integer           a triggering slot exists
//   value       float             lowReservoir
//   offset      float (secs, >0)  userPodExpiration

use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::model::{AlertKind, AlertSlot, PumpAlert, ReminderOffset, ReservoirLevel};

/// Untyped persistence record for a single alert.
pub type FlatRecord = Map<String, Value>;

/// Record keys.
pub mod keys {
    pub const IDENTIFIER: &str = "identifier";
    pub const SLOT: &str = "slot";
    pub const VALUE: &str = "value";
    pub const OFFSET: &str = "offset";
}

// ── Helpers ────────────────────────────────────────────────────────

/// Parse a slot leniently: anything that is not a valid slot index is `None`.
fn parse_slot(raw: Option<&Value>) -> Option<AlertSlot> {
    raw.and_then(Value::as_u64)
        .and_then(|n| u8::try_from(n).ok())
        .and_then(AlertSlot::from_repr)
}

fn numeric(record: &FlatRecord, kind: AlertKind, key: &'static str) -> Result<f64, DecodeError> {
    record
        .get(key)
        .and_then(Value::as_f64)
        .ok_or(DecodeError::MissingField {
            identifier: kind.identifier(),
            key,
        })
}

// ── Encode ─────────────────────────────────────────────────────────

/// Encode an alert as a flat record. Irrelevant keys are omitted.
pub fn encode(alert: &PumpAlert) -> FlatRecord {
    let mut record = FlatRecord::new();
    record.insert(keys::IDENTIFIER.into(), Value::from(alert.identifier()));

    if let Some(slot) = alert.triggering_slot() {
        record.insert(keys::SLOT.into(), Value::from(slot.raw()));
    }

    match alert {
        PumpAlert::LowReservoir { level, .. } => {
            record.insert(keys::VALUE.into(), Value::from(level.units()));
        }
        PumpAlert::UserPodExpiration { offset, .. } => {
            record.insert(keys::OFFSET.into(), Value::from(offset.as_secs()));
        }
        _ => {}
    }

    record
}

// ── Decode ─────────────────────────────────────────────────────────

/// Decode a flat record, explaining any failure.
pub fn try_decode(record: &FlatRecord) -> Result<PumpAlert, DecodeError> {
    let identifier = record
        .get(keys::IDENTIFIER)
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingIdentifier)?;

    let kind: AlertKind = identifier
        .parse()
        .map_err(|_| DecodeError::UnknownIdentifier(identifier.to_owned()))?;

    let slot = parse_slot(record.get(keys::SLOT));

    Ok(match kind {
        AlertKind::MultiCommand => PumpAlert::MultiCommand { slot },
        AlertKind::PodExpireImminent => PumpAlert::PodExpireImminent { slot },
        AlertKind::UserPodExpiration => {
            let secs = numeric(record, kind, keys::OFFSET)?;
            let offset = ReminderOffset::from_secs(secs).map_err(|_| DecodeError::InvalidField {
                identifier: kind.identifier(),
                key: keys::OFFSET,
            })?;
            PumpAlert::UserPodExpiration { slot, offset }
        }
        AlertKind::LowReservoir => {
            let units = numeric(record, kind, keys::VALUE)?;
            let level = ReservoirLevel::from_units(units).map_err(|_| DecodeError::InvalidField {
                identifier: kind.identifier(),
                key: keys::VALUE,
            })?;
            PumpAlert::LowReservoir { slot, level }
        }
        AlertKind::SuspendInProgress => PumpAlert::SuspendInProgress { slot },
        AlertKind::SuspendEnded => PumpAlert::SuspendEnded { slot },
        AlertKind::PodExpiring => PumpAlert::PodExpiring { slot },
        AlertKind::FinishSetupReminder => PumpAlert::FinishSetupReminder { slot },
        AlertKind::TimeOffsetChangeDetected => PumpAlert::TimeOffsetChangeDetected,
    })
}

/// Decode a flat record. Undecodable records yield `None` and should be dropped.
pub fn decode(record: &FlatRecord) -> Option<PumpAlert> {
    match try_decode(record) {
        Ok(alert) => Some(alert),
        Err(reason) => {
            tracing::debug!(%reason, "dropping undecodable alert record");
            None
        }
    }
}

// ── Conversions ────────────────────────────────────────────────────

impl From<PumpAlert> for FlatRecord {
    fn from(alert: PumpAlert) -> Self {
        encode(&alert)
    }
}

impl From<&PumpAlert> for FlatRecord {
    fn from(alert: &PumpAlert) -> Self {
        encode(alert)
    }
}

impl TryFrom<FlatRecord> for PumpAlert {
    type Error = DecodeError;

    fn try_from(record: FlatRecord) -> Result<Self, Self::Error> {
        try_decode(&record)
    }
}

impl TryFrom<&FlatRecord> for PumpAlert {
    type Error = DecodeError;

    fn try_from(record: &FlatRecord) -> Result<Self, Self::Error> {
        try_decode(record)
    }
}
