use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Display language for alert text.
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
    Serialize,
    Deserialize,
)]
pub enum Locale {
    #[default]
    #[strum(to_string = "en", serialize = "en-US")]
    #[serde(rename = "en", alias = "en-US")]
    En,
    #[strum(to_string = "zh-Hans", serialize = "zh")]
    #[serde(rename = "zh-Hans", alias = "zh")]
    ZhHans,
}
