// ── Alert domain model ──
//
// Strongly typed alert values. The untyped flat record only exists at the
// serialization boundary in `crate::record`.

pub mod alert;
pub mod slot;

// ── Re-exports ──────────────────────────────────────────────────────

pub use alert::{
    AlertKind, PumpAlert, REPEAT_SUFFIX, ReminderOffset, ReservoirLevel,
    SUSPEND_ENDED_REPEAT_INTERVAL,
};
pub use slot::AlertSlot;
