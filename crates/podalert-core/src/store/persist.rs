// ── Pending store persistence ──
//
// On-disk form is a JSON document of flat records plus timestamps.
// Entries whose record no longer decodes are dropped on load.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::pending::{PendingAlert, PendingAlertStore};
use crate::error::CoreError;
use crate::record::{self, FlatRecord};

/// One persisted pending alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAlert {
    pub alert: FlatRecord,
    pub issued_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_repeated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    alerts: Vec<StoredAlert>,
}

impl From<&PendingAlert> for StoredAlert {
    fn from(p: &PendingAlert) -> Self {
        Self {
            alert: record::encode(&p.alert),
            issued_at: p.issued_at,
            last_repeated_at: p.last_repeated_at,
        }
    }
}

impl PendingAlertStore {
    /// Persistable form of every pending alert, in snapshot order.
    pub fn to_stored(&self) -> Vec<StoredAlert> {
        self.sorted_entries()
            .iter()
            .map(|p| StoredAlert::from(p.as_ref()))
            .collect()
    }

    /// Rebuild a store from persisted entries, dropping undecodable ones.
    pub fn from_stored(entries: impl IntoIterator<Item = StoredAlert>) -> Self {
        let store = Self::new();
        let mut dropped = 0usize;
        for entry in entries {
            match record::try_decode(&entry.alert) {
                Ok(alert) => store.restore(PendingAlert {
                    alert,
                    issued_at: entry.issued_at,
                    last_repeated_at: entry.last_repeated_at,
                }),
                Err(reason) => {
                    dropped += 1;
                    tracing::warn!(%reason, "dropping persisted alert that no longer decodes");
                }
            }
        }
        if dropped > 0 {
            tracing::info!(dropped, kept = store.len(), "restored pending alerts");
        }
        store
    }

    /// Load from a JSON file. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no pending alert store yet");
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };
        let doc: StoreDocument = serde_json::from_str(&contents)?;
        Ok(Self::from_stored(doc.alerts))
    }

    /// Write to a JSON file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let doc = StoreDocument {
            alerts: self.to_stored(),
        };
        let json = serde_json::to_string_pretty(&doc)?;
        std::fs::write(path, json)?;
        tracing::debug!(path = %path.display(), count = doc.alerts.len(), "saved pending alerts");
        Ok(())
    }
}
