// ── Pod alert slots ──
//
// The pod exposes eight fixed hardware alert slots. An alert raised by
// the pod carries the slot that fired; alerts raised by the manager
// itself carry no slot at all.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, FromRepr};

use crate::error::CoreError;

/// One of the pod's eight hardware alert slots, identified by its raw index.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, FromRepr, Serialize,
    Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum AlertSlot {
    AutoOff = 0,
    NotUsed = 1,
    ShutdownImminent = 2,
    ExpirationReminder = 3,
    LowReservoir = 4,
    SuspendedReminder = 5,
    SuspendTimeExpired = 6,
    Expired = 7,
}

impl AlertSlot {
    /// Raw slot index as stored in flat records.
    #[allow(clippy::as_conversions)]
    pub fn raw(self) -> u8 {
        self as u8
    }

    /// Human-readable slot name, e.g. `"slot2ShutdownImminent"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::AutoOff => "slot0AutoOff",
            Self::NotUsed => "slot1NotUsed",
            Self::ShutdownImminent => "slot2ShutdownImminent",
            Self::ExpirationReminder => "slot3ExpirationReminder",
            Self::LowReservoir => "slot4LowReservoir",
            Self::SuspendedReminder => "slot5SuspendedReminder",
            Self::SuspendTimeExpired => "slot6SuspendTimeExpired",
            Self::Expired => "slot7Expired",
        }
    }
}

impl fmt::Display for AlertSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw())
    }
}

impl From<AlertSlot> for u8 {
    fn from(slot: AlertSlot) -> Self {
        slot.raw()
    }
}

impl TryFrom<u8> for AlertSlot {
    type Error = CoreError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::from_repr(raw).ok_or_else(|| CoreError::InvalidPayload {
            field: "slot",
            reason: format!("{raw} is not a pod alert slot (expected 0-7)"),
        })
    }
}
