// ── Pending alert storage ──

mod pending;
mod persist;

pub use pending::{DueRepeat, PendingAlert, PendingAlertStore};
pub use persist::StoredAlert;
