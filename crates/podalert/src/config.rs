//! CLI configuration: a thin wrapper around `podalert_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--config, --store, --locale, --output, --color).

use std::path::PathBuf;

use clap::ValueEnum;

use podalert_core::{AlertCatalog, Locale};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::Printer;

pub use podalert_config::{Config, load_config_from, load_file_config, save_config_to};

/// Effective settings for one invocation.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    pub locale: Locale,
    pub output: OutputFormat,
    pub color: bool,
    pub store_path: PathBuf,
    pub quiet: bool,
    pub yes: bool,
}

impl Context {
    pub fn catalog(&self) -> AlertCatalog {
        AlertCatalog::new(self.locale)
    }

    pub fn printer(&self) -> Printer {
        Printer {
            format: self.output.clone(),
            color: self.color,
            quiet: self.quiet,
        }
    }
}

/// Config file path: `--config` flag, else the platform default.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(podalert_config::config_path)
}

/// Load the config file and merge global flag overrides on top.
pub fn resolve(global: &GlobalOpts) -> Result<Context, CliError> {
    let config_path = config_file(global);
    let config = load_config_from(&config_path)?;
    tracing::debug!(path = %config_path.display(), "loaded configuration");

    // 1. Locale (flag > env > config)
    let locale = match global.locale.as_deref() {
        Some(tag) => tag.parse().map_err(|_| CliError::Validation {
            field: "locale".into(),
            reason: format!("unsupported locale '{tag}' (expected 'en' or 'zh-Hans')"),
        })?,
        None => config.defaults.locale,
    };

    // 2. Output format (flag > env > config)
    let output = match &global.output {
        Some(format) => format.clone(),
        None => OutputFormat::from_str(&config.defaults.output, true).map_err(|reason| {
            CliError::Validation {
                field: "defaults.output".into(),
                reason,
            }
        })?,
    };

    // 3. Color
    let color_mode = match &global.color {
        Some(mode) => mode.clone(),
        None => ColorMode::from_str(&config.defaults.color, true).unwrap_or(ColorMode::Auto),
    };

    // 4. Store path (flag > env > config > platform default)
    let store_path = global
        .store
        .clone()
        .unwrap_or_else(|| config.store_path());

    Ok(Context {
        config_path,
        locale,
        output,
        color: color_mode.enabled(),
        store_path,
        quiet: global.quiet,
        yes: global.yes,
        config,
    })
}
