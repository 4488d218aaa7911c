// ── Formatter collaborators ──
//
// Alert bodies embed a reminder duration and an insulin quantity. The
// formatting itself is pluggable so hosts can supply platform formatters;
// the defaults below cover the built-in locales.

use std::time::Duration;

use super::locale::Locale;

/// Renders a duration as a whole number of hours ("2 hours").
pub trait DurationFormatter: Send + Sync {
    fn hours(&self, duration: Duration) -> String;
}

/// Renders an insulin quantity ("10 U"). `None` means the value could not
/// be formatted and the caller falls back to the raw number.
pub trait QuantityFormatter: Send + Sync {
    fn insulin_units(&self, units: f64) -> Option<String>;
}

/// Default duration formatter: full-style hour count, rounded to the nearest hour.
#[derive(Debug, Clone, Copy, Default)]
pub struct HourFormatter {
    locale: Locale,
}

impl HourFormatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl DurationFormatter for HourFormatter {
    fn hours(&self, duration: Duration) -> String {
        let hours = (duration.as_secs_f64() / 3600.0).round();
        match self.locale {
            Locale::En if (hours - 1.0).abs() < f64::EPSILON => "1 hour".to_owned(),
            Locale::En => format!("{hours:.0} hours"),
            Locale::ZhHans => format!("{hours:.0}小时"),
        }
    }
}

/// Default quantity formatter: up to two decimals, trailing zeros trimmed, unit "U".
#[derive(Debug, Clone, Copy, Default)]
pub struct InsulinUnitFormatter;

impl QuantityFormatter for InsulinUnitFormatter {
    fn insulin_units(&self, units: f64) -> Option<String> {
        if !units.is_finite() {
            return None;
        }
        let rounded = (units * 100.0).round() / 100.0;
        let text = format!("{rounded:.2}");
        let text = text.trim_end_matches('0').trim_end_matches('.');
        Some(format!("{text} U"))
    }
}
