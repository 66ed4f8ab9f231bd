//! Process-facing collaborators consumed by the commands.
//!
//! Commands never reach for ambient process state inside their core loops;
//! they receive these collaborators as explicit parameters, which keeps the
//! loops hermetically testable.
//!
//! - [`file_io`] — read-only filesystem access and standard-output acquisition.
//! - [`diag`]   — the best-effort, command-tagged diagnostics channel.

pub mod diag;
pub mod file_io;

pub use diag::Diagnostics;
pub use file_io::{Filesystem, OsFilesystem};
