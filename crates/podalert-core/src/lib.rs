//! Alert taxonomy for Omnipod pump managers.
//!
//! This crate owns the pump alert domain model and everything needed to
//! show, persist, and route those alerts:
//!
//! - **Domain model** ([`model`]): [`PumpAlert`], a closed set of alert
//!   conditions carrying an optional [`AlertSlot`] and validated numeric
//!   payloads, plus the payload-free [`AlertKind`] with each variant's stable
//!   persistence identifier.
//!
//! - **Flat records** ([`record`]): [`encode`](record::encode) /
//!   [`decode`](record::decode) between a `PumpAlert` and the untyped
//!   `identifier` / `slot` / `value` / `offset` map used for storage. Decoding
//!   never produces a malformed alert; undecodable records are dropped.
//!
//! - **[`AlertCatalog`]**: Localized foreground and background text with
//!   pluggable duration and quantity formatters.
//!
//! - **[`PendingAlertStore`]**: Raised-but-unacknowledged alerts keyed by
//!   identifier, with repeat-reminder scheduling, `watch` subscriptions, and
//!   JSON persistence.
//!
//! - **[`handoff`]**: Channel carrying alerts from a background
//!   communication context to the UI context.

pub mod catalog;
pub mod error;
pub mod handoff;
pub mod model;
pub mod preference;
pub mod record;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::{AlertCatalog, AlertContent, Locale};
pub use error::{CoreError, DecodeError};
pub use handoff::{AlertReceiver, AlertSender};
pub use preference::SilencePodPreference;
pub use record::FlatRecord;
pub use store::{DueRepeat, PendingAlert, PendingAlertStore, StoredAlert};

pub use model::{
    AlertKind, AlertSlot, PumpAlert, REPEAT_SUFFIX, ReminderOffset, ReservoirLevel,
    SUSPEND_ENDED_REPEAT_INTERVAL,
};
