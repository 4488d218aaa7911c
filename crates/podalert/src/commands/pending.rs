//! Pending alert command handlers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::Tabled;

use podalert_core::record::FlatRecord;
use podalert_core::{AlertCatalog, DueRepeat, PendingAlert, PendingAlertStore};

use crate::cli::{AlertSpec, PendingArgs, PendingCommand};
use crate::config::{Config, Context};
use crate::error::CliError;
use crate::output::Listed;

use super::util;

// ── Views ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PendingView {
    identifier: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    slot: Option<u8>,
    issued_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_repeated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_repeat_at: Option<DateTime<Utc>>,
    title: String,
    record: FlatRecord,
}

impl PendingView {
    fn new(pending: &PendingAlert, catalog: &AlertCatalog) -> Self {
        Self {
            identifier: pending.identifier(),
            slot: pending.alert.triggering_slot().map(u8::from),
            issued_at: pending.issued_at,
            last_repeated_at: pending.last_repeated_at,
            next_repeat_at: pending.next_repeat_at(),
            title: catalog.title(&pending.alert),
            record: FlatRecord::from(&pending.alert),
        }
    }
}

#[derive(Tabled)]
struct PendingRow {
    #[tabled(rename = "Identifier")]
    identifier: &'static str,
    #[tabled(rename = "Slot")]
    slot: String,
    #[tabled(rename = "Issued")]
    issued: String,
    #[tabled(rename = "Next Repeat")]
    next_repeat: String,
    #[tabled(rename = "Title")]
    title: String,
}

impl Listed for PendingView {
    type Row = PendingRow;

    fn row(&self) -> PendingRow {
        PendingRow {
            identifier: self.identifier,
            slot: self.slot.map_or_else(|| "-".into(), |s| s.to_string()),
            issued: self.issued_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            next_repeat: self.next_repeat_at.map_or_else(
                || "-".into(),
                |t| t.format("%Y-%m-%d %H:%M:%S").to_string(),
            ),
            title: self.title.clone(),
        }
    }

    fn plain(&self) -> String {
        self.identifier.to_owned()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DueView {
    repeat_identifier: String,
    identifier: &'static str,
    title: String,
    body: String,
}

impl DueView {
    fn new(due: &DueRepeat, catalog: &AlertCatalog) -> Self {
        Self {
            repeat_identifier: due.identifier.clone(),
            identifier: due.alert.identifier(),
            title: catalog.background_title(&due.alert),
            body: catalog.background_body(&due.alert),
        }
    }
}

#[derive(Tabled)]
struct DueRow {
    #[tabled(rename = "Reminder")]
    repeat_identifier: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Body")]
    body: String,
}

impl Listed for DueView {
    type Row = DueRow;

    fn row(&self) -> DueRow {
        DueRow {
            repeat_identifier: self.repeat_identifier.clone(),
            title: self.title.clone(),
            body: self.body.clone(),
        }
    }

    fn plain(&self) -> String {
        self.repeat_identifier.clone()
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Fill reminder amounts the user left out from the notification settings.
fn with_configured_amounts(mut spec: AlertSpec, config: &Config) -> AlertSpec {
    if spec.value.is_none() {
        spec.value = Some(f64::from(config.notifications.low_reservoir_units));
    }
    if spec.offset.is_none() && spec.hours.is_none() {
        spec.hours = Some(config.notifications.expiration_reminder_hours);
    }
    spec
}

fn load_store(ctx: &Context) -> Result<PendingAlertStore, CliError> {
    tracing::debug!(path = %ctx.store_path.display(), "loading pending alert store");
    Ok(PendingAlertStore::load(&ctx.store_path)?)
}

fn save_store(store: &PendingAlertStore, ctx: &Context) -> Result<(), CliError> {
    Ok(store.save(&ctx.store_path)?)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: PendingArgs, ctx: &Context) -> Result<(), CliError> {
    let catalog = ctx.catalog();

    match args.command {
        PendingCommand::List => {
            let store = load_store(ctx)?;
            let views: Vec<PendingView> = store
                .snapshot()
                .iter()
                .map(|p| PendingView::new(p, &catalog))
                .collect();
            ctx.printer().list(&views)
        }

        PendingCommand::Issue { spec, at } => {
            let alert = util::build_alert(&with_configured_amounts(spec, &ctx.config))?;
            if alert.is_ignored() {
                tracing::warn!(identifier = alert.identifier(), "alert is ignored, not recorded");
                return Ok(());
            }
            let at = util::parse_time(at.as_deref())?;

            let store = load_store(ctx)?;
            let identifier = alert.identifier();
            let superseded = store.issue(alert, at);
            save_store(&store, ctx)?;

            if !ctx.quiet {
                if superseded.is_some() {
                    eprintln!("Pending alert '{identifier}' replaced");
                } else {
                    eprintln!("Pending alert '{identifier}' recorded");
                }
            }
            Ok(())
        }

        PendingCommand::Ack { identifier } => {
            let store = load_store(ctx)?;
            let removed = store
                .acknowledge(&identifier)
                .ok_or(CliError::NotPending { identifier })?;
            save_store(&store, ctx)?;

            if !ctx.quiet {
                eprintln!("Pending alert '{}' acknowledged", removed.identifier());
            }
            Ok(())
        }

        PendingCommand::Due { at, mark } => {
            let now = util::parse_time(at.as_deref())?;
            let store = load_store(ctx)?;
            let due = store.due_repeats(now);

            if mark && !due.is_empty() {
                for reminder in &due {
                    store.mark_repeated(&reminder.identifier, now);
                }
                save_store(&store, ctx)?;
            }

            let views: Vec<DueView> = due.iter().map(|d| DueView::new(d, &catalog)).collect();
            ctx.printer().list(&views)
        }

        PendingCommand::Clear => {
            let store = load_store(ctx)?;
            if store.is_empty() {
                return Ok(());
            }
            if !util::confirm(
                "pending clear",
                &format!("Remove {} pending alert(s)?", store.len()),
                ctx.yes,
            )? {
                return Ok(());
            }
            store.clear();
            save_store(&store, ctx)?;
            if !ctx.quiet {
                eprintln!("Pending alerts cleared");
            }
            Ok(())
        }
    }
}
