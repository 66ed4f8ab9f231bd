//! Command registration and dispatch for the multi-call binary.
//!
//! Every command registers a [`CommandSpec`] in [`COMMANDS`]. The binary
//! resolves which command to run in two steps: the basename of `argv[0]`
//! (so a link named `cat` behaves like `corebox cat`), then the first
//! argument (`corebox cat …`).

pub mod cat;

use crate::cli::arg_utils::{exe_name_match, last_name_from_path};

/// A command shipped in the suite.
pub struct CommandSpec {
    /// Dispatch name: the subcommand word and the alias binary name.
    pub name: &'static str,
    /// One-line summary shown in the suite usage listing.
    pub summary: &'static str,
    /// Runs the command on its own argv (program and command name already
    /// stripped); returns the process exit code.
    pub run: fn(&[String]) -> i32,
}

/// Every command, in display order.
pub static COMMANDS: &[CommandSpec] = &[cat::COMMAND];

/// Look up a command by its exact dispatch name.
pub fn find(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|cmd| cmd.name == name)
}

/// Multi-call alias detection: the basename of `argv[0]` selects a command
/// when it matches a registered name (tolerating a Windows `.exe` suffix).
pub fn detect_alias(argv0: &str) -> Option<&'static CommandSpec> {
    let exe_name = last_name_from_path(argv0);
    COMMANDS.iter().find(|cmd| exe_name_match(exe_name, cmd.name))
}
