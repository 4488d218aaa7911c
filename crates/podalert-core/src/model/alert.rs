// ── Pump alert domain types ──
//
// `PumpAlert` is the in-memory representation of every condition the
// pump manager can raise. Payloads that carry numbers use validated
// newtypes so an invalid combination (e.g. a zero expiration offset)
// cannot be constructed.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

use super::slot::AlertSlot;
use crate::error::CoreError;

/// Suffix appended to an identifier to key a repeat-reminder instance.
pub const REPEAT_SUFFIX: &str = "-repeating";

/// How often `SuspendEnded` is re-delivered until acknowledged.
pub const SUSPEND_ENDED_REPEAT_INTERVAL: Duration = Duration::from_secs(15 * 60);

// ── AlertKind ───────────────────────────────────────────────────────

/// Payload-free tag of a [`PumpAlert`].
///
/// The string forms are persisted keys and must never change.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr, Serialize,
    Deserialize,
)]
pub enum AlertKind {
    #[strum(serialize = "multiCommand")]
    #[serde(rename = "multiCommand")]
    MultiCommand,
    #[strum(serialize = "podExpireImminent")]
    #[serde(rename = "podExpireImminent")]
    PodExpireImminent,
    #[strum(serialize = "userPodExpiration")]
    #[serde(rename = "userPodExpiration")]
    UserPodExpiration,
    #[strum(serialize = "lowReservoir")]
    #[serde(rename = "lowReservoir")]
    LowReservoir,
    #[strum(serialize = "suspendInProgress")]
    #[serde(rename = "suspendInProgress")]
    SuspendInProgress,
    #[strum(serialize = "suspendEnded")]
    #[serde(rename = "suspendEnded")]
    SuspendEnded,
    #[strum(serialize = "podExpiring")]
    #[serde(rename = "podExpiring")]
    PodExpiring,
    #[strum(serialize = "finishSetupReminder")]
    #[serde(rename = "finishSetupReminder")]
    FinishSetupReminder,
    #[strum(serialize = "timeOffsetChangeDetected")]
    #[serde(rename = "timeOffsetChangeDetected")]
    TimeOffsetChangeDetected,
}

impl AlertKind {
    /// Look up a kind by its persistence identifier.
    pub fn from_identifier(identifier: &str) -> Result<Self, CoreError> {
        identifier.parse().map_err(|_| CoreError::UnknownKind {
            identifier: identifier.to_owned(),
        })
    }

    /// Stable persistence key.
    pub fn identifier(self) -> &'static str {
        self.into()
    }

    pub fn repeat_identifier(self) -> String {
        format!("{}{REPEAT_SUFFIX}", self.identifier())
    }

    pub fn repeat_interval(self) -> Option<Duration> {
        match self {
            Self::SuspendEnded => Some(SUSPEND_ENDED_REPEAT_INTERVAL),
            _ => None,
        }
    }

    pub fn is_repeating(self) -> bool {
        self.repeat_interval().is_some()
    }

    /// Non-actionable alerts that downstream consumers ignore.
    pub fn is_ignored(self) -> bool {
        matches!(self, Self::FinishSetupReminder)
    }

    /// Whether this kind can be attributed to a pod alert slot.
    pub fn carries_slot(self) -> bool {
        !matches!(self, Self::TimeOffsetChangeDetected)
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

// ── Payload newtypes ────────────────────────────────────────────────

/// Time before pod expiration at which the user asked to be reminded.
///
/// Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ReminderOffset(f64);

impl ReminderOffset {
    pub fn from_secs(secs: f64) -> Result<Self, CoreError> {
        if secs.is_finite() && secs > 0.0 {
            Ok(Self(secs))
        } else {
            Err(CoreError::InvalidPayload {
                field: "offset",
                reason: format!("expiration reminder offset must be > 0 seconds, got {secs}"),
            })
        }
    }

    pub fn from_hours(hours: u32) -> Result<Self, CoreError> {
        Self::from_secs(f64::from(hours) * 3600.0)
    }

    pub fn as_secs(self) -> f64 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_secs_f64(self.0)
    }
}

impl TryFrom<Duration> for ReminderOffset {
    type Error = CoreError;

    fn try_from(duration: Duration) -> Result<Self, Self::Error> {
        Self::from_secs(duration.as_secs_f64())
    }
}

/// Insulin level, in units, at which the low reservoir reminder fires.
///
/// Always finite so it survives a trip through a flat record.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ReservoirLevel(f64);

impl ReservoirLevel {
    pub fn from_units(units: f64) -> Result<Self, CoreError> {
        if units.is_finite() {
            Ok(Self(units))
        } else {
            Err(CoreError::InvalidPayload {
                field: "value",
                reason: format!("reservoir reminder value must be finite, got {units}"),
            })
        }
    }

    pub fn units(self) -> f64 {
        self.0
    }
}

// ── PumpAlert ───────────────────────────────────────────────────────

/// An alert condition raised by the pod or the pump manager.
///
/// Serializes as its flat record (see [`crate::record`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "crate::record::FlatRecord", try_from = "crate::record::FlatRecord")]
pub enum PumpAlert {
    MultiCommand {
        slot: Option<AlertSlot>,
    },
    PodExpireImminent {
        slot: Option<AlertSlot>,
    },
    UserPodExpiration {
        slot: Option<AlertSlot>,
        offset: ReminderOffset,
    },
    LowReservoir {
        slot: Option<AlertSlot>,
        level: ReservoirLevel,
    },
    SuspendInProgress {
        slot: Option<AlertSlot>,
    },
    SuspendEnded {
        slot: Option<AlertSlot>,
    },
    PodExpiring {
        slot: Option<AlertSlot>,
    },
    FinishSetupReminder {
        slot: Option<AlertSlot>,
    },
    TimeOffsetChangeDetected,
}

impl PumpAlert {
    /// Build an alert of `kind` from loose parts.
    ///
    /// `amount` is the reservoir level (units) for `LowReservoir` and the
    /// reminder offset (seconds) for `UserPodExpiration`; it is ignored
    /// for every other kind, as is `slot` for `TimeOffsetChangeDetected`.
    pub fn build(
        kind: AlertKind,
        slot: Option<AlertSlot>,
        amount: Option<f64>,
    ) -> Result<Self, CoreError> {
        let require = |field: &'static str| {
            amount.ok_or_else(|| CoreError::InvalidPayload {
                field,
                reason: format!("{kind} requires a `{field}`"),
            })
        };

        Ok(match kind {
            AlertKind::MultiCommand => Self::MultiCommand { slot },
            AlertKind::PodExpireImminent => Self::PodExpireImminent { slot },
            AlertKind::UserPodExpiration => Self::UserPodExpiration {
                slot,
                offset: ReminderOffset::from_secs(require("offset")?)?,
            },
            AlertKind::LowReservoir => Self::LowReservoir {
                slot,
                level: ReservoirLevel::from_units(require("value")?)?,
            },
            AlertKind::SuspendInProgress => Self::SuspendInProgress { slot },
            AlertKind::SuspendEnded => Self::SuspendEnded { slot },
            AlertKind::PodExpiring => Self::PodExpiring { slot },
            AlertKind::FinishSetupReminder => Self::FinishSetupReminder { slot },
            AlertKind::TimeOffsetChangeDetected => Self::TimeOffsetChangeDetected,
        })
    }

    pub fn kind(&self) -> AlertKind {
        match self {
            Self::MultiCommand { .. } => AlertKind::MultiCommand,
            Self::PodExpireImminent { .. } => AlertKind::PodExpireImminent,
            Self::UserPodExpiration { .. } => AlertKind::UserPodExpiration,
            Self::LowReservoir { .. } => AlertKind::LowReservoir,
            Self::SuspendInProgress { .. } => AlertKind::SuspendInProgress,
            Self::SuspendEnded { .. } => AlertKind::SuspendEnded,
            Self::PodExpiring { .. } => AlertKind::PodExpiring,
            Self::FinishSetupReminder { .. } => AlertKind::FinishSetupReminder,
            Self::TimeOffsetChangeDetected => AlertKind::TimeOffsetChangeDetected,
        }
    }

    pub fn identifier(&self) -> &'static str {
        self.kind().identifier()
    }

    pub fn repeat_identifier(&self) -> String {
        self.kind().repeat_identifier()
    }

    pub fn is_repeating(&self) -> bool {
        self.kind().is_repeating()
    }

    pub fn repeat_interval(&self) -> Option<Duration> {
        self.kind().repeat_interval()
    }

    pub fn is_ignored(&self) -> bool {
        self.kind().is_ignored()
    }

    /// The pod slot that raised this alert, if any.
    pub fn triggering_slot(&self) -> Option<AlertSlot> {
        match self {
            Self::MultiCommand { slot }
            | Self::PodExpireImminent { slot }
            | Self::UserPodExpiration { slot, .. }
            | Self::LowReservoir { slot, .. }
            | Self::SuspendInProgress { slot }
            | Self::SuspendEnded { slot }
            | Self::PodExpiring { slot }
            | Self::FinishSetupReminder { slot } => *slot,
            Self::TimeOffsetChangeDetected => None,
        }
    }
}

impl fmt::Display for PumpAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())?;
        if let Some(slot) = self.triggering_slot() {
            write!(f, " (slot {slot})")?;
        }
        Ok(())
    }
}
