//! Command-line interface plumbing shared by every command in the suite.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Suite identity string and the shared `DISPLAY_LEVEL` verbosity atomic. |
//! | [`help`]      | Usage/version banner printers for the suite and its commands. |
//! | [`arg_utils`] | Low-level helpers: path basename and executable-name matching for alias dispatch. |
//! | [`argv`]      | `ArgStream` — syntactic argument-token classification pulled one token at a time. |
//!
//! Typical call sequence: `commands::detect_alias` → per-command `parse` over
//! an [`argv::ArgStream`] → command execution.

pub mod arg_utils;
pub mod argv;
pub mod constants;
pub mod help;
