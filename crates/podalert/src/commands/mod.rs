//! Command dispatch: bridges CLI args -> core alert types -> output formatting.

pub mod alerts;
pub mod config_cmd;
pub mod pending;
pub mod util;

use crate::cli::Command;
use crate::config::Context;
use crate::error::CliError;

/// Dispatch a command that needs resolved settings to its handler.
pub fn dispatch(cmd: Command, ctx: &Context) -> Result<(), CliError> {
    match cmd {
        Command::Alerts(args) => alerts::handle(args, ctx),
        Command::Pending(args) => pending::handle(args, ctx),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
