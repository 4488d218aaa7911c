//! Rendering of command results in the format chosen by `--output`.
//!
//! Views opt in through [`Listed`] (rows of a table) or [`Described`]
//! (a single free-form record). JSON and YAML always come from the view's
//! `Serialize` impl, so every format shows the same fields.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color ───────────────────────────────────────────────────────────

impl ColorMode {
    /// Whether ANSI styling should be emitted on stdout.
    pub fn enabled(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
        }
    }
}

/// Bold heading when color is on, bare text otherwise.
pub fn heading(text: &str, color: bool) -> String {
    if color {
        text.bold().to_string()
    } else {
        text.to_owned()
    }
}

/// Dimmed secondary text when color is on.
pub fn dim(text: &str, color: bool) -> String {
    if color {
        text.dimmed().to_string()
    } else {
        text.to_owned()
    }
}

// ── View traits ─────────────────────────────────────────────────────

/// A view shown as one row among many.
pub trait Listed: Serialize {
    type Row: Tabled;

    fn row(&self) -> Self::Row;

    /// Line printed for this view in `plain` mode.
    fn plain(&self) -> String;
}

/// A view shown on its own.
pub trait Described: Serialize {
    /// Human-readable rendering used for the `table` format.
    fn describe(&self, color: bool) -> String;

    /// Text printed in `plain` mode.
    fn plain(&self) -> String;
}

// ── Printer ─────────────────────────────────────────────────────────

/// Output settings for one invocation.
#[derive(Debug, Clone)]
pub struct Printer {
    pub format: OutputFormat,
    pub color: bool,
    pub quiet: bool,
}

impl Printer {
    pub fn render_list<T: Listed>(&self, items: &[T]) -> Result<String, CliError> {
        match self.format {
            OutputFormat::Table => {
                if items.is_empty() {
                    return Ok(String::new());
                }
                let rows: Vec<T::Row> = items.iter().map(Listed::row).collect();
                Ok(Table::new(rows).with(Style::rounded()).to_string())
            }
            OutputFormat::Plain => Ok(items
                .iter()
                .map(Listed::plain)
                .collect::<Vec<_>>()
                .join("\n")),
            _ => self.structured(items),
        }
    }

    pub fn render_one<T: Described>(&self, item: &T) -> Result<String, CliError> {
        match self.format {
            OutputFormat::Table => Ok(item.describe(self.color)),
            OutputFormat::Plain => Ok(item.plain()),
            _ => self.structured(item),
        }
    }

    pub fn list<T: Listed>(&self, items: &[T]) -> Result<(), CliError> {
        let out = self.render_list(items)?;
        self.emit(&out)
    }

    pub fn one<T: Described>(&self, item: &T) -> Result<(), CliError> {
        let out = self.render_one(item)?;
        self.emit(&out)
    }

    fn structured<T: Serialize + ?Sized>(&self, data: &T) -> Result<String, CliError> {
        match self.format {
            OutputFormat::JsonCompact => Ok(serde_json::to_string(data)?),
            OutputFormat::Yaml => serde_yaml::to_string(data)
                .map(|s| s.trim_end().to_owned())
                .map_err(|e| CliError::Internal(format!("YAML rendering failed: {e}"))),
            _ => Ok(serde_json::to_string_pretty(data)?),
        }
    }

    fn emit(&self, out: &str) -> Result<(), CliError> {
        if self.quiet || out.is_empty() {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{out}")?;
        Ok(())
    }
}
