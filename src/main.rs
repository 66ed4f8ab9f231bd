//! Binary entry point for the `corebox` multi-call utility suite.
//!
//! Dispatch order:
//!
//! 1. Alias: the basename of `argv[0]` names a registered command (a link
//!    named `cat` behaves exactly like `corebox cat`).
//! 2. Subcommand: the first argument names the command (`corebox cat …`).
//! 3. Suite surface: help/version banners and the unknown-command error.
//!
//! The selected command returns the process exit code; per-file diagnostics
//! inside a command never change it.

use corebox::cli::constants::SUITE_NAME;
use corebox::cli::help;
use corebox::commands;
use corebox::displaylevel;

fn dispatch(argv0: &str, rest: &[String]) -> i32 {
    if let Some(cmd) = commands::detect_alias(argv0) {
        return (cmd.run)(rest);
    }

    let Some(first) = rest.first() else {
        help::print_suite_usage(SUITE_NAME);
        return 1;
    };

    match first.as_str() {
        "-h" | "--help" => {
            help::print_suite_usage(SUITE_NAME);
            0
        }
        "-V" | "--version" => {
            help::print_version();
            0
        }
        name => match commands::find(name) {
            Some(cmd) => (cmd.run)(&rest[1..]),
            None => {
                displaylevel!(
                    1,
                    "{}: unknown command: {} (try '{} --help')\n",
                    SUITE_NAME,
                    name,
                    SUITE_NAME
                );
                1
            }
        },
    }
}

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    let argv0 = argv.first().map(String::as_str).unwrap_or(SUITE_NAME);
    let rest = argv.get(1..).unwrap_or(&[]);
    std::process::exit(dispatch(argv0, rest));
}
