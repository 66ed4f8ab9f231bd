//! Best-effort diagnostics channel.

use std::fmt;
use std::io::Write;

use crate::cli::constants::display_level;

/// Per-invocation error reporter tagged with the command's name.
///
/// Each report is one line, `<command>: <message>`, written to the sink when
/// the display level permits (errors show at level 1 and above). A failure to
/// write the report is swallowed: reporting must never turn a recoverable
/// condition into an abort.
pub struct Diagnostics<'a> {
    command: &'a str,
    sink: &'a mut dyn Write,
}

impl<'a> Diagnostics<'a> {
    pub fn new(command: &'a str, sink: &'a mut dyn Write) -> Self {
        Diagnostics { command, sink }
    }

    /// Emit one diagnostic line. Emission failure is ignored.
    pub fn report(&mut self, message: fmt::Arguments<'_>) {
        if display_level() < 1 {
            return;
        }
        let _ = writeln!(self.sink, "{}: {}", self.command, message);
    }
}
