//! Alert catalog command handlers.

use serde::Serialize;
use strum::IntoEnumIterator;
use tabled::Tabled;

use podalert_core::record::{self, FlatRecord};
use podalert_core::{AlertCatalog, AlertContent, AlertKind, PumpAlert};

use crate::cli::{AlertsArgs, AlertsCommand};
use crate::config::Context;
use crate::error::CliError;
use crate::output::{self, Described, Listed};

use super::util;

// ── Views ───────────────────────────────────────────────────────────

/// One catalog entry, as listed by `alerts list`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KindView {
    identifier: &'static str,
    repeat_identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    repeat_interval_secs: Option<u64>,
    carries_slot: bool,
    ignored: bool,
    title: &'static str,
}

impl KindView {
    fn new(kind: AlertKind, catalog: &AlertCatalog) -> Self {
        Self {
            identifier: kind.identifier(),
            repeat_identifier: kind.repeat_identifier(),
            repeat_interval_secs: kind.repeat_interval().map(|d| d.as_secs()),
            carries_slot: kind.carries_slot(),
            ignored: kind.is_ignored(),
            title: catalog.kind_title(kind),
        }
    }
}

#[derive(Tabled)]
struct KindRow {
    #[tabled(rename = "Identifier")]
    identifier: &'static str,
    #[tabled(rename = "Repeats")]
    repeats: String,
    #[tabled(rename = "Slot")]
    slot: &'static str,
    #[tabled(rename = "Ignored")]
    ignored: &'static str,
    #[tabled(rename = "Title")]
    title: &'static str,
}

impl Listed for KindView {
    type Row = KindRow;

    fn row(&self) -> KindRow {
        KindRow {
            identifier: self.identifier,
            repeats: self
                .repeat_interval_secs
                .map_or_else(|| "-".into(), |secs| format!("every {}m", secs / 60)),
            slot: if self.carries_slot { "yes" } else { "no" },
            ignored: if self.ignored { "yes" } else { "no" },
            title: self.title,
        }
    }

    fn plain(&self) -> String {
        self.identifier.to_owned()
    }
}

/// A concrete alert with its display text and persisted record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AlertView {
    identifier: &'static str,
    repeat_identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    repeat_interval_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    slot: Option<u8>,
    ignored: bool,
    content: AlertContent,
    record: FlatRecord,
    #[serde(skip)]
    slot_label: String,
}

impl AlertView {
    fn new(alert: &PumpAlert, catalog: &AlertCatalog, background: bool) -> Self {
        let content = if background {
            catalog.background_content(alert)
        } else {
            catalog.foreground_content(alert)
        };
        Self {
            identifier: alert.identifier(),
            repeat_identifier: alert.repeat_identifier(),
            repeat_interval_secs: alert.repeat_interval().map(|d| d.as_secs()),
            slot: alert.triggering_slot().map(u8::from),
            ignored: alert.is_ignored(),
            content,
            record: FlatRecord::from(alert),
            slot_label: util::slot_label(alert.triggering_slot()),
        }
    }
}

impl Described for AlertView {
    fn describe(&self, color: bool) -> String {
        let mut lines = vec![
            output::heading(&self.content.title, color),
            self.content.body.clone(),
            String::new(),
            output::dim(&format!("Identifier:  {}", self.identifier), color),
            output::dim(&format!("Slot:        {}", self.slot_label), color),
        ];
        if let Some(secs) = self.repeat_interval_secs {
            lines.push(output::dim(
                &format!("Repeats:     every {}s as {}", secs, self.repeat_identifier),
                color,
            ));
        }
        if self.ignored {
            lines.push(output::dim("Ignored:     yes", color));
        }
        lines.push(output::dim(
            &format!("Action:      {}", self.content.acknowledge_action_label),
            color,
        ));
        lines.join("\n")
    }

    fn plain(&self) -> String {
        self.content.body.clone()
    }
}

/// An encoded record, printed as compact JSON outside structured formats.
#[derive(Debug, Serialize)]
#[serde(transparent)]
struct RecordView(FlatRecord);

impl Described for RecordView {
    fn describe(&self, _color: bool) -> String {
        serde_json::Value::Object(self.0.clone()).to_string()
    }

    fn plain(&self) -> String {
        self.describe(false)
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: AlertsArgs, ctx: &Context) -> Result<(), CliError> {
    let catalog = ctx.catalog();

    match args.command {
        AlertsCommand::List => {
            let kinds: Vec<KindView> = AlertKind::iter()
                .map(|kind| KindView::new(kind, &catalog))
                .collect();
            ctx.printer().list(&kinds)
        }

        AlertsCommand::Show { spec, background } => {
            let alert = util::build_alert(&spec)?;
            let view = AlertView::new(&alert, &catalog, background);
            ctx.printer().one(&view)
        }

        AlertsCommand::Encode { spec } => {
            let alert = util::build_alert(&spec)?;
            ctx.printer().one(&RecordView(record::encode(&alert)))
        }

        AlertsCommand::Decode { file } => {
            let input = util::read_json_input(file.as_deref())?;
            let (decoded, rejected) = decode_all(input);

            for reason in &rejected {
                tracing::warn!("{reason}");
            }
            if decoded.is_empty() && !rejected.is_empty() {
                return Err(CliError::Undecodable {
                    count: rejected.len(),
                    reasons: rejected.join("\n"),
                });
            }

            let views: Vec<AlertView> = decoded
                .iter()
                .map(|alert| AlertView::new(alert, &catalog, false))
                .collect();
            ctx.printer().list(&views)
        }
    }
}

#[derive(Tabled)]
struct DecodedRow {
    #[tabled(rename = "Identifier")]
    identifier: &'static str,
    #[tabled(rename = "Slot")]
    slot: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Body")]
    body: String,
}

impl Listed for AlertView {
    type Row = DecodedRow;

    fn row(&self) -> DecodedRow {
        DecodedRow {
            identifier: self.identifier,
            slot: self.slot_label.clone(),
            title: self.content.title.clone(),
            body: self.content.body.clone(),
        }
    }

    fn plain(&self) -> String {
        self.identifier.to_owned()
    }
}

/// Decode a single record object or an array of them.
///
/// Returns the decoded alerts and one message per rejected entry.
fn decode_all(input: serde_json::Value) -> (Vec<PumpAlert>, Vec<String>) {
    let entries = match input {
        serde_json::Value::Array(items) => items,
        other => vec![other],
    };

    let mut decoded = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();
    for (index, entry) in entries.into_iter().enumerate() {
        let serde_json::Value::Object(map) = entry else {
            rejected.push(format!("entry {index}: not a JSON object"));
            continue;
        };
        match record::try_decode(&map) {
            Ok(alert) => decoded.push(alert),
            Err(e) => rejected.push(format!("entry {index}: {e}")),
        }
    }
    (decoded, rejected)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use podalert_core::{AlertSlot, Locale};

    use super::*;

    #[test]
    fn decode_all_accepts_object_or_array() {
        let (one, rejected) = decode_all(json!({"identifier": "suspendEnded", "slot": 5}));
        assert!(rejected.is_empty());
        assert_eq!(
            one,
            vec![PumpAlert::SuspendEnded {
                slot: Some(AlertSlot::SuspendedReminder)
            }]
        );

        let (many, rejected) = decode_all(json!([
            {"identifier": "podExpiring"},
            {"identifier": "bogus"},
            42,
            {"identifier": "lowReservoir", "slot": 4},
        ]));
        assert_eq!(many, vec![PumpAlert::PodExpiring { slot: None }]);
        assert_eq!(rejected.len(), 3);
        assert!(rejected[1].starts_with("entry 2"));
    }

    #[test]
    fn kind_rows_describe_repeat_behavior() {
        let catalog = AlertCatalog::new(Locale::En);
        let suspend = KindView::new(AlertKind::SuspendEnded, &catalog).row();
        assert_eq!(suspend.repeats, "every 15m");

        let setup = KindView::new(AlertKind::FinishSetupReminder, &catalog).row();
        assert_eq!(setup.repeats, "-");
        assert_eq!(setup.ignored, "yes");

        let offset = KindView::new(AlertKind::TimeOffsetChangeDetected, &catalog);
        assert!(!offset.carries_slot);
    }

    #[test]
    fn background_view_uses_notification_body() {
        let catalog = AlertCatalog::new(Locale::En);
        let alert = PumpAlert::SuspendEnded { slot: None };
        let fg = AlertView::new(&alert, &catalog, false);
        let bg = AlertView::new(&alert, &catalog, true);
        assert_eq!(fg.content.title, bg.content.title);
        assert_ne!(fg.content.body, bg.content.body);
        assert!(fg.describe(false).contains("suspendEnded-repeating"));
        assert_eq!(Listed::plain(&fg), "suspendEnded");
        assert_eq!(Described::plain(&bg), bg.content.body);
    }
}
