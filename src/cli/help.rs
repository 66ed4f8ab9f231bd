//! Usage and version banner printers for the suite and its commands.
//!
//! All text is static; commands invoke these printers and never render their
//! own banners, so `-h`/`--help`/`--version` behave uniformly across the
//! suite.

use crate::cli::constants::SUITE_NAME;
use crate::commands;
use crate::displayout;

/// Print the one-line version banner.
pub fn print_version() {
    displayout!(
        "*** {} v{} {}-bit multi-call binary ***\n",
        SUITE_NAME,
        crate::version_string(),
        (std::mem::size_of::<*const ()>() * 8)
    );
}

/// Print the suite-level usage: synopsis plus the registered commands.
pub fn print_suite_usage(program: &str) {
    displayout!("Usage : \n");
    displayout!("      {} COMMAND [ARG]... \n", program);
    displayout!("\n");
    displayout!("Commands : \n");
    for cmd in commands::COMMANDS {
        displayout!(" {:<6} : {} \n", cmd.name, cmd.summary);
    }
    displayout!("\n");
    displayout!("{} may also be installed under a command's name; \n", program);
    displayout!("a link named 'cat' behaves exactly like '{} cat'. \n", program);
    displayout!("\n");
    displayout!(" -h/--help    : display this help and exit \n");
    displayout!(" -V/--version : display Version number and exit \n");
}

/// Print the `cat` usage text.
pub fn print_cat_usage() {
    displayout!("Usage : \n");
    displayout!("      cat [OPTION]... [FILE]... \n");
    displayout!("\n");
    displayout!("Concatenate FILE(s) to standard output. \n");
    displayout!("With no FILE, nothing is read and nothing is written. \n");
    displayout!("A FILE that cannot be opened or read is reported and skipped. \n");
    displayout!("\n");
    displayout!("Arguments : \n");
    displayout!(" -n     : number all output lines (accepted; output currently unchanged) \n");
    displayout!(" -h     : display this help and exit \n");
    displayout!("--version : display Version number and exit \n");
}
