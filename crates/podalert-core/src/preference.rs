// ── Silence-pod preference ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, FromRepr};

use crate::catalog::{Locale, text};

/// Whether pod alerts beep audibly.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    FromRepr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SilencePodPreference {
    #[default]
    Disabled = 0,
    Enabled = 1,
}

impl SilencePodPreference {
    pub fn is_silenced(self) -> bool {
        self == Self::Enabled
    }

    pub fn title(self, locale: Locale) -> &'static str {
        text::silence_title(locale, self)
    }

    pub fn description(self, locale: Locale) -> &'static str {
        text::silence_description(locale, self)
    }
}
