// ── Alert display catalog ──
//
// Pure lookups from a `PumpAlert` to the text shown in-app (foreground)
// and in a user notification (background).

mod format;
mod locale;
pub(crate) mod text;

use std::sync::Arc;

use serde::Serialize;

pub use format::{DurationFormatter, HourFormatter, InsulinUnitFormatter, QuantityFormatter};
pub use locale::Locale;

use crate::model::{AlertKind, PumpAlert};

/// Text for a single presentation of an alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertContent {
    pub title: String,
    pub body: String,
    pub acknowledge_action_label: String,
}

/// Localized alert text with injectable formatters.
#[derive(Clone)]
pub struct AlertCatalog {
    locale: Locale,
    durations: Arc<dyn DurationFormatter>,
    quantities: Arc<dyn QuantityFormatter>,
}

impl std::fmt::Debug for AlertCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertCatalog")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl Default for AlertCatalog {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl AlertCatalog {
    /// Catalog using the built-in formatters for `locale`.
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            durations: Arc::new(HourFormatter::new(locale)),
            quantities: Arc::new(InsulinUnitFormatter),
        }
    }

    pub fn with_duration_formatter(mut self, formatter: impl DurationFormatter + 'static) -> Self {
        self.durations = Arc::new(formatter);
        self
    }

    pub fn with_quantity_formatter(mut self, formatter: impl QuantityFormatter + 'static) -> Self {
        self.quantities = Arc::new(formatter);
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn title(&self, alert: &PumpAlert) -> String {
        self.kind_title(alert.kind()).to_owned()
    }

    /// Title shared by every alert of `kind`; titles never carry a payload.
    pub fn kind_title(&self, kind: AlertKind) -> &'static str {
        text::title(self.locale, kind)
    }

    pub fn body(&self, alert: &PumpAlert) -> String {
        let template = text::body(self.locale, alert.kind());
        match alert {
            PumpAlert::UserPodExpiration { offset, .. } => {
                let time = self.durations.hours(offset.as_duration());
                template.replacen(text::PLACEHOLDER, &time, 1)
            }
            PumpAlert::LowReservoir { level, .. } => {
                let units = level.units();
                let value = self
                    .quantities
                    .insulin_units(units)
                    .unwrap_or_else(|| format!("{units:?}"));
                template.replacen(text::PLACEHOLDER, &value, 1)
            }
            _ => template.to_owned(),
        }
    }

    pub fn background_title(&self, alert: &PumpAlert) -> String {
        self.title(alert)
    }

    pub fn background_body(&self, alert: &PumpAlert) -> String {
        text::background_body(self.locale, alert.kind())
            .map_or_else(|| self.body(alert), str::to_owned)
    }

    pub fn acknowledge_label(&self) -> &'static str {
        text::acknowledge_label(self.locale)
    }

    pub fn foreground_content(&self, alert: &PumpAlert) -> AlertContent {
        AlertContent {
            title: self.title(alert),
            body: self.body(alert),
            acknowledge_action_label: self.acknowledge_label().to_owned(),
        }
    }

    pub fn background_content(&self, alert: &PumpAlert) -> AlertContent {
        AlertContent {
            title: self.background_title(alert),
            body: self.background_body(alert),
            acknowledge_action_label: self.acknowledge_label().to_owned(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{AlertKind, AlertSlot, ReminderOffset, ReservoirLevel};
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    struct Broken;

    impl QuantityFormatter for Broken {
        fn insulin_units(&self, _units: f64) -> Option<String> {
            None
        }
    }

    struct Minutes;

    impl DurationFormatter for Minutes {
        fn hours(&self, duration: std::time::Duration) -> String {
            format!("{} min", duration.as_secs() / 60)
        }
    }

    fn low_reservoir(units: f64) -> PumpAlert {
        PumpAlert::LowReservoir {
            slot: Some(AlertSlot::LowReservoir),
            level: ReservoirLevel::from_units(units).unwrap(),
        }
    }

    #[test]
    fn user_pod_expiration_body_formats_hours() {
        let catalog = AlertCatalog::new(Locale::En);
        let alert = PumpAlert::UserPodExpiration {
            slot: None,
            offset: ReminderOffset::from_hours(2).unwrap(),
        };
        assert_eq!(catalog.title(&alert), "Pod Expiration Reminder");
        assert_eq!(catalog.body(&alert), "Pod expires in 2 hours.");
    }

    #[test]
    fn low_reservoir_body_formats_units() {
        let catalog = AlertCatalog::new(Locale::En);
        assert_eq!(
            catalog.body(&low_reservoir(10.0)),
            "10 U insulin or less remaining in Pod. Change Pod soon."
        );
    }

    #[test]
    fn low_reservoir_falls_back_to_raw_number() {
        let catalog = AlertCatalog::new(Locale::En).with_quantity_formatter(Broken);
        assert_eq!(
            catalog.body(&low_reservoir(10.0)),
            "10.0 insulin or less remaining in Pod. Change Pod soon."
        );
    }

    #[test]
    fn injected_duration_formatter_is_used() {
        let catalog = AlertCatalog::new(Locale::En).with_duration_formatter(Minutes);
        let alert = PumpAlert::UserPodExpiration {
            slot: None,
            offset: ReminderOffset::from_secs(5400.0).unwrap(),
        };
        assert_eq!(catalog.body(&alert), "Pod expires in 90 min.");
    }

    #[test]
    fn suspend_ended_has_distinct_background_body() {
        let catalog = AlertCatalog::new(Locale::En);
        let alert = PumpAlert::SuspendEnded { slot: None };
        let fg = catalog.foreground_content(&alert);
        let bg = catalog.background_content(&alert);
        assert_eq!(fg.title, bg.title);
        assert_ne!(fg.body, bg.body);
        assert_eq!(bg.body, "Suspension time is up. Open the app and resume.");
        assert_eq!(bg.acknowledge_action_label, "OK");
    }

    #[test]
    fn background_matches_foreground_for_other_kinds() {
        let catalog = AlertCatalog::new(Locale::ZhHans);
        for kind in AlertKind::iter().filter(|k| *k != AlertKind::SuspendEnded) {
            let alert = PumpAlert::build(kind, None, Some(3600.0)).unwrap();
            assert_eq!(
                catalog.foreground_content(&alert),
                catalog.background_content(&alert)
            );
        }
    }

    #[test]
    fn chinese_locale_fills_placeholders() {
        let catalog = AlertCatalog::new(Locale::ZhHans);
        let alert = PumpAlert::UserPodExpiration {
            slot: None,
            offset: ReminderOffset::from_hours(4).unwrap(),
        };
        assert_eq!(catalog.body(&alert), "Pod 将在 4小时 后过期。");
        assert_eq!(catalog.acknowledge_label(), "好的");
    }

    #[test]
    fn content_serializes_camel_case() {
        let content = AlertCatalog::default().foreground_content(&PumpAlert::TimeOffsetChangeDetected);
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["title"], "Time Change Detected");
        assert_eq!(json["acknowledgeActionLabel"], "OK");
    }
}
