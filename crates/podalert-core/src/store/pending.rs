// ── Pending alert store ──
//
// Alerts that have been raised but not yet acknowledged, keyed by their
// persistence identifier. Raising an alert whose identifier is already
// pending supersedes the older instance.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::watch;

use crate::model::{PumpAlert, REPEAT_SUFFIX};

/// A raised, unacknowledged alert.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAlert {
    pub alert: PumpAlert,
    pub issued_at: DateTime<Utc>,
    pub last_repeated_at: Option<DateTime<Utc>>,
}

impl PendingAlert {
    pub fn identifier(&self) -> &'static str {
        self.alert.identifier()
    }

    /// When the next repeat reminder is due, for repeating alerts.
    pub fn next_repeat_at(&self) -> Option<DateTime<Utc>> {
        let interval = chrono::Duration::from_std(self.alert.repeat_interval()?).ok()?;
        let since = self.last_repeated_at.unwrap_or(self.issued_at);
        since.checked_add_signed(interval)
    }
}

/// A repeat reminder that should be delivered now.
#[derive(Debug, Clone, PartialEq)]
pub struct DueRepeat {
    /// Repeat identifier (`<identifier>-repeating`).
    pub identifier: String,
    pub alert: PumpAlert,
}

type Snapshot = Arc<Vec<Arc<PendingAlert>>>;

/// Concurrent store of pending alerts with push-based change notification.
///
/// Every mutation rebuilds the snapshot handed to `watch` subscribers, so a
/// UI context can observe the store while a communication context writes.
pub struct PendingAlertStore {
    by_identifier: DashMap<&'static str, Arc<PendingAlert>>,
    snapshot: watch::Sender<Snapshot>,
}

impl Default for PendingAlertStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PendingAlertStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingAlertStore")
            .field("len", &self.len())
            .finish()
    }
}

impl PendingAlertStore {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            by_identifier: DashMap::new(),
            snapshot,
        }
    }

    /// Record a newly raised alert. Returns the instance it superseded, if any.
    pub fn issue(&self, alert: PumpAlert, at: DateTime<Utc>) -> Option<Arc<PendingAlert>> {
        let identifier = alert.identifier();
        let pending = PendingAlert {
            alert,
            issued_at: at,
            last_repeated_at: None,
        };
        let superseded = self.by_identifier.insert(identifier, Arc::new(pending));
        if superseded.is_some() {
            tracing::debug!(identifier, "pending alert superseded");
        } else {
            tracing::debug!(identifier, "pending alert issued");
        }
        self.rebuild_snapshot();
        superseded
    }

    /// Put back a previously persisted entry as-is.
    pub(crate) fn restore(&self, pending: PendingAlert) {
        self.by_identifier
            .insert(pending.identifier(), Arc::new(pending));
        self.rebuild_snapshot();
    }

    /// Acknowledge by identifier or repeat identifier. Returns the removed alert.
    pub fn acknowledge(&self, identifier: &str) -> Option<Arc<PendingAlert>> {
        let key = identifier.strip_suffix(REPEAT_SUFFIX).unwrap_or(identifier);
        let removed = self.by_identifier.remove(key).map(|(_, v)| v);
        if removed.is_some() {
            tracing::debug!(identifier = key, "pending alert acknowledged");
            self.rebuild_snapshot();
        }
        removed
    }

    pub fn get(&self, identifier: &str) -> Option<Arc<PendingAlert>> {
        let key = identifier.strip_suffix(REPEAT_SUFFIX).unwrap_or(identifier);
        self.by_identifier.get(key).map(|r| Arc::clone(r.value()))
    }

    /// Repeat reminders due at `now`, ordered by issue time.
    pub fn due_repeats(&self, now: DateTime<Utc>) -> Vec<DueRepeat> {
        self.sorted_entries()
            .iter()
            .filter(|p| p.next_repeat_at().is_some_and(|due| due <= now))
            .map(|p| DueRepeat {
                identifier: p.alert.repeat_identifier(),
                alert: p.alert.clone(),
            })
            .collect()
    }

    /// Record that a repeat reminder was delivered. Returns `false` if the
    /// alert is no longer pending or does not repeat.
    pub fn mark_repeated(&self, identifier: &str, at: DateTime<Utc>) -> bool {
        let key = identifier.strip_suffix(REPEAT_SUFFIX).unwrap_or(identifier);
        let updated = match self.by_identifier.get_mut(key) {
            Some(mut entry) if entry.alert.is_repeating() => {
                let next = PendingAlert {
                    last_repeated_at: Some(at),
                    ..entry.value().as_ref().clone()
                };
                *entry.value_mut() = Arc::new(next);
                true
            }
            _ => false,
        };
        if updated {
            self.rebuild_snapshot();
        }
        updated
    }

    /// Current pending alerts, ordered by issue time then identifier.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.subscribe()
    }

    pub fn len(&self) -> usize {
        self.by_identifier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_identifier.is_empty()
    }

    pub fn clear(&self) {
        self.by_identifier.clear();
        self.rebuild_snapshot();
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Current entries ordered by issue time then identifier, read from the map.
    pub(crate) fn sorted_entries(&self) -> Vec<Arc<PendingAlert>> {
        let mut values: Vec<Arc<PendingAlert>> = self
            .by_identifier
            .iter()
            .map(|r| Arc::clone(r.value()))
            .collect();
        values.sort_by(|a, b| {
            a.issued_at
                .cmp(&b.issued_at)
                .then_with(|| a.identifier().cmp(b.identifier()))
        });
        values
    }

    fn rebuild_snapshot(&self) {
        // Read the map while holding the watch lock so concurrent rebuilds
        // publish in the order they observed the map.
        self.snapshot
            .send_modify(|snap| *snap = Arc::new(self.sorted_entries()));
    }
}
