//! Clap derive structures for the `podalert` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// podalert -- inspect, encode, and track Omnipod pump alerts
#[derive(Debug, Parser)]
#[command(
    name = "podalert",
    version,
    about = "Inspect and manage Omnipod pump alerts from the command line",
    long_about = "Work with the pump alert catalog of an Omnipod pump manager.\n\n\
        Encode alerts into their persisted record form, decode stored records,\n\
        preview localized alert text, and track pending alerts until they are\n\
        acknowledged.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "PODALERT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Pending alert store file (overrides config)
    #[arg(long, env = "PODALERT_STORE", global = true)]
    pub store: Option<PathBuf>,

    /// Display language for alert text (en, zh-Hans)
    #[arg(long, short = 'L', env = "PODALERT_LOCALE", global = true)]
    pub locale: Option<String>,

    /// Output format (defaults to the configured format)
    #[arg(long, short = 'o', env = "PODALERT_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the alert catalog and convert alert records
    #[command(alias = "a")]
    Alerts(AlertsArgs),

    /// Track raised alerts until they are acknowledged
    #[command(alias = "p")]
    Pending(PendingArgs),

    /// Manage notification settings and configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Alert Arguments ───────────────────────────────────────────

/// Describes a single alert on the command line.
#[derive(Debug, Args)]
pub struct AlertSpec {
    /// Alert identifier (e.g. lowReservoir, suspendEnded)
    pub kind: String,

    /// Pod alert slot that raised the alert (0-7)
    #[arg(long, short = 's')]
    pub slot: Option<u8>,

    /// Low reservoir reminder level, in insulin units
    #[arg(long, allow_negative_numbers = true)]
    pub value: Option<f64>,

    /// Expiration reminder offset, in seconds
    #[arg(long, conflicts_with = "hours", allow_negative_numbers = true)]
    pub offset: Option<f64>,

    /// Expiration reminder offset, in whole hours
    #[arg(long)]
    pub hours: Option<u32>,
}

// ── Alerts ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AlertsArgs {
    #[command(subcommand)]
    pub command: AlertsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AlertsCommand {
    /// List every alert kind with its identifiers and repeat behavior
    #[command(alias = "ls")]
    List,

    /// Show the localized text for an alert
    Show {
        #[command(flatten)]
        spec: AlertSpec,

        /// Show the background notification text instead
        #[arg(long, short = 'b')]
        background: bool,
    },

    /// Encode an alert into its persisted record
    Encode {
        #[command(flatten)]
        spec: AlertSpec,
    },

    /// Decode persisted records (an object or an array of objects)
    Decode {
        /// JSON file to read (stdin if omitted or "-")
        file: Option<PathBuf>,
    },
}

// ── Pending ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PendingArgs {
    #[command(subcommand)]
    pub command: PendingCommand,
}

#[derive(Debug, Subcommand)]
pub enum PendingCommand {
    /// List pending alerts
    #[command(alias = "ls")]
    List,

    /// Record a newly raised alert (supersedes one with the same identifier)
    Issue {
        #[command(flatten)]
        spec: AlertSpec,

        /// Time the alert was raised (RFC 3339, defaults to now)
        #[arg(long)]
        at: Option<String>,
    },

    /// Acknowledge a pending alert by identifier or repeat identifier
    #[command(alias = "acknowledge")]
    Ack {
        /// Alert identifier (e.g. suspendEnded or suspendEnded-repeating)
        identifier: String,
    },

    /// Show repeat reminders that are due
    Due {
        /// Evaluate at this time (RFC 3339, defaults to now)
        #[arg(long)]
        at: Option<String>,

        /// Record the due reminders as delivered
        #[arg(long)]
        mark: bool,
    },

    /// Remove every pending alert
    Clear,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive setup of notification settings
    Init,

    /// Display the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Set a configuration value (e.g. notifications.low_reservoir_units 20)
    Set {
        /// Dotted config key
        key: String,
        /// New value
        value: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
