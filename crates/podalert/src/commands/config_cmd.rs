//! Config subcommand handlers.

use std::io::IsTerminal;
use std::path::PathBuf;

use dialoguer::{Input, Select};
use serde::Serialize;

use podalert_config::{EXPIRATION_REMINDER_HOURS, LOW_RESERVOIR_UNITS};
use podalert_core::{Locale, SilencePodPreference};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output::{self, Described};

use super::util::prompt_err;

// ── Views ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigView<'a> {
    path: PathBuf,
    store_path: PathBuf,
    config: &'a Config,
    silence_pod: SilenceView,
}

#[derive(Debug, Serialize)]
struct SilenceView {
    title: &'static str,
    description: &'static str,
}

impl Described for ConfigView<'_> {
    fn describe(&self, color: bool) -> String {
        let toml = toml::to_string_pretty(self.config).unwrap_or_default();
        [
            output::dim(&format!("# {}", self.path.display()), color),
            toml.trim_end().to_owned(),
            String::new(),
            output::heading(self.silence_pod.title, color),
            self.silence_pod.description.to_owned(),
            String::new(),
            output::dim(&format!("Pending store: {}", self.store_path.display()), color),
        ]
        .join("\n")
    }

    fn plain(&self) -> String {
        self.path.display().to_string()
    }
}

// ── Init wizard ─────────────────────────────────────────────────────

fn prompt_settings(cfg: &mut Config) -> Result<(), CliError> {
    let hours_range = EXPIRATION_REMINDER_HOURS;
    cfg.notifications.expiration_reminder_hours = Input::new()
        .with_prompt(format!(
            "Expiration reminder, hours before expiry ({}-{})",
            hours_range.start(),
            hours_range.end()
        ))
        .default(cfg.notifications.expiration_reminder_hours)
        .validate_with(|h: &u32| {
            if EXPIRATION_REMINDER_HOURS.contains(h) {
                Ok(())
            } else {
                Err("out of range")
            }
        })
        .interact_text()
        .map_err(prompt_err)?;

    let units_range = LOW_RESERVOIR_UNITS;
    cfg.notifications.low_reservoir_units = Input::new()
        .with_prompt(format!(
            "Low reservoir reminder, units ({}-{})",
            units_range.start(),
            units_range.end()
        ))
        .default(cfg.notifications.low_reservoir_units)
        .validate_with(|u: &u32| {
            if LOW_RESERVOIR_UNITS.contains(u) {
                Ok(())
            } else {
                Err("out of range")
            }
        })
        .interact_text()
        .map_err(prompt_err)?;

    let locale = cfg.defaults.locale;
    let silence_choices = [
        SilencePodPreference::Disabled.title(locale),
        SilencePodPreference::Enabled.title(locale),
    ];
    let silenced = Select::new()
        .with_prompt("Pod beeps")
        .items(&silence_choices)
        .default(usize::from(cfg.notifications.silence_pod.is_silenced()))
        .interact()
        .map_err(prompt_err)?;
    cfg.notifications.silence_pod = if silenced == 1 {
        SilencePodPreference::Enabled
    } else {
        SilencePodPreference::Disabled
    };

    let locale_choices = ["English (en)", "简体中文 (zh-Hans)"];
    let locale = Select::new()
        .with_prompt("Alert language")
        .items(&locale_choices)
        .default(usize::from(cfg.defaults.locale == Locale::ZhHans))
        .interact()
        .map_err(prompt_err)?;
    cfg.defaults.locale = if locale == 1 {
        Locale::ZhHans
    } else {
        Locale::En
    };

    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let config_path = config::config_file(global);

    match args.command {
        ConfigCommand::Init => {
            let mut cfg = if config_path.exists() {
                config::load_file_config(&config_path)?
            } else {
                Config::default()
            };

            if !global.yes {
                if !std::io::stdin().is_terminal() {
                    return Err(CliError::NonInteractiveRequiresYes {
                        action: "config init".into(),
                    });
                }
                eprintln!("podalert configuration");
                eprintln!("   Config path: {}\n", config_path.display());
                prompt_settings(&mut cfg)?;
            }

            cfg.validate()?;
            config::save_config_to(&cfg, &config_path)?;
            if !global.quiet {
                eprintln!("Configuration written to {}", config_path.display());
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let ctx = config::resolve(global)?;
            let pref = ctx.config.notifications.silence_pod;
            let view = ConfigView {
                path: ctx.config_path.clone(),
                store_path: ctx.store_path.clone(),
                config: &ctx.config,
                silence_pod: SilenceView {
                    title: pref.title(ctx.locale),
                    description: pref.description(ctx.locale),
                },
            };
            ctx.printer().one(&view)
        }

        ConfigCommand::Path => {
            println!("{}", config_path.display());
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_file_config(&config_path)?;
            cfg.set(&key, &value)?;
            config::save_config_to(&cfg, &config_path)?;
            tracing::debug!(%key, %value, "config value updated");
            if !global.quiet {
                eprintln!("Set {key} = {value}");
            }
            Ok(())
        }
    }
}
