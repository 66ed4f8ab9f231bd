//! `cat` — concatenate files to standard output.
//!
//! Reads each named file in command-line order and forwards its bytes to
//! standard output in fixed-size chunks. A file that cannot be opened or read
//! is reported through the diagnostics channel and skipped; the run keeps
//! going. Only a failure to write to standard output aborts the invocation.
//!
//! The option parse is a two-state machine over the token stream from
//! [`ArgStream`]: it stays `Normal` while tokens are recognized and flips to
//! `InvalidArgument` on the first token (or shorthand character) this command
//! does not know, at which point no further tokens are consumed.

use std::io::{self, Read, Write};

use anyhow::anyhow;

use crate::cli::argv::{Arg, ArgStream, Pull};
use crate::cli::help;
use crate::displaylevel;
use crate::io::diag::Diagnostics;
use crate::io::file_io::{stdout_for_streaming, Filesystem, OsFilesystem};

use super::CommandSpec;

/// Registry entry.
pub const COMMAND: CommandSpec = CommandSpec {
    name: "cat",
    summary: "concatenate files to standard output",
    run,
};

/// Chunk size of the streaming copy loop.
pub const READ_CHUNK_SIZE: usize = 1024;

// ── Options ───────────────────────────────────────────────────────────────────

/// Options accumulated by the argument parse, one token at a time.
///
/// `paths` preserves command-line order and admits duplicates; an empty list
/// is legal and means "no input files". `number_all` parses (`-n`) but has no
/// output effect; `show_tabs` and `show_ends` are declared without a flag
/// spelling and are never set.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub number_all: bool,
    pub show_tabs: bool,
    pub show_ends: bool,
    pub paths: Vec<String>,
}

/// Outcome of the argument parse.
#[derive(Debug, PartialEq, Eq)]
pub enum Parsed {
    Run(Options),
    Help,
    Version,
}

// ── Parse state machine ───────────────────────────────────────────────────────

/// Parsing proceeds only while `Normal`; `InvalidArgument` is terminal.
#[derive(Debug, PartialEq, Eq)]
enum ParseState {
    Normal,
    InvalidArgument(BadToken),
}

/// What invalidated the parse: a whole option token or one cluster character.
#[derive(Debug, PartialEq, Eq)]
enum BadToken {
    Option(String),
    Short(char),
}

/// Feeds tokens into `opts` until the stream ends or a token invalidates the
/// parse. Flag effects applied before the offending token (or before the
/// offending character within a cluster) are kept, not rolled back.
fn drain<'a>(first: Arg<'a>, rest: &mut ArgStream<'a>, opts: &mut Options) -> ParseState {
    let mut state = ParseState::Normal;
    let mut pending = Some(first);

    while let Some(arg) = pending.take().or_else(|| rest.next()) {
        match arg {
            // This command recognizes no longhand options.
            Arg::Long(name) => {
                state = ParseState::InvalidArgument(BadToken::Option(format!("--{name}")));
                break;
            }
            Arg::LongWithValue { name, value } => {
                state =
                    ParseState::InvalidArgument(BadToken::Option(format!("--{name}={value}")));
                break;
            }
            Arg::Shorts(cluster) => {
                for flag in cluster {
                    match flag {
                        'n' => opts.number_all = true,
                        other => {
                            state = ParseState::InvalidArgument(BadToken::Short(other));
                            break;
                        }
                    }
                }
                if state != ParseState::Normal {
                    break;
                }
            }
            Arg::Positional(path) => opts.paths.push(path.to_owned()),
        }
    }
    state
}

/// Parse `argv` into a [`Parsed`] outcome, or fail with a usage error naming
/// the offending token. No file is touched during the parse.
pub fn parse(argv: &[String]) -> anyhow::Result<Parsed> {
    let mut args = ArgStream::new(argv);
    let mut opts = Options::default();

    // Zero arguments is valid: no input files, the copy loop is a no-op.
    let first = match args.next_with_help_version() {
        None => return Ok(Parsed::Run(opts)),
        Some(Pull::Help) => return Ok(Parsed::Help),
        Some(Pull::Version) => return Ok(Parsed::Version),
        Some(Pull::Arg(arg)) => arg,
    };

    match drain(first, &mut args, &mut opts) {
        ParseState::Normal => Ok(Parsed::Run(opts)),
        ParseState::InvalidArgument(BadToken::Option(text)) => {
            Err(anyhow!("bad usage: unknown option: {text}"))
        }
        ParseState::InvalidArgument(BadToken::Short(flag)) => {
            Err(anyhow!("bad usage: unknown option: -{flag}"))
        }
    }
}

// ── Streaming copy loop ───────────────────────────────────────────────────────

/// Copy each path's bytes to `out`, in path order, through one reusable
/// fixed-size chunk buffer.
///
/// Open and read failures are reported via `diag` and recovered locally: the
/// offending file is skipped and the run continues. A write failure is fatal
/// and propagates immediately; no further paths are attempted and no extra
/// diagnostic is emitted for it here. Every opened handle is dropped when its
/// path is done, whether by end-of-file or by abandonment.
pub fn copy_paths(
    paths: &[String],
    fs: &dyn Filesystem,
    out: &mut dyn Write,
    diag: &mut Diagnostics<'_>,
) -> io::Result<()> {
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    for path in paths {
        let mut src = match fs.open(path) {
            Ok(src) => src,
            Err(e) => {
                diag.report(format_args!("failed to open '{path}': {e}"));
                continue;
            }
        };
        loop {
            match src.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => out.write_all(&chunk[..n])?,
                Err(e) => {
                    diag.report(format_args!("failed to read '{path}': {e}"));
                    break;
                }
            }
        }
    }
    Ok(())
}

// ── Command entry point ───────────────────────────────────────────────────────

fn run(argv: &[String]) -> i32 {
    let opts = match parse(argv) {
        Ok(Parsed::Help) => {
            help::print_cat_usage();
            return 0;
        }
        Ok(Parsed::Version) => {
            help::print_version();
            return 0;
        }
        Ok(Parsed::Run(opts)) => opts,
        Err(e) => {
            displaylevel!(1, "cat: {}\n", e);
            return 1;
        }
    };

    let fs = OsFilesystem;
    let mut out = stdout_for_streaming();
    let mut stderr = io::stderr();
    let mut diag = Diagnostics::new("cat", &mut stderr);

    let result = copy_paths(&opts.paths, &fs, &mut out, &mut diag).and_then(|()| out.flush());
    match result {
        Ok(()) => 0,
        Err(e) => {
            displaylevel!(1, "cat: {}\n", e);
            1
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn paths(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    /// Filesystem fake built from a closure, so each test injects exactly the
    /// content and failures it needs.
    struct FnFs<F>(F);

    impl<F> Filesystem for FnFs<F>
    where
        F: Fn(&str) -> io::Result<Box<dyn Read>>,
    {
        fn open(&self, path: &str) -> io::Result<Box<dyn Read>> {
            (self.0)(path)
        }
    }

    fn mem_fs(files: &[(&str, &[u8])]) -> impl Filesystem {
        let files: HashMap<String, Vec<u8>> = files
            .iter()
            .map(|(name, content)| (name.to_string(), content.to_vec()))
            .collect();
        FnFs(move |path: &str| match files.get(path) {
            Some(content) => {
                Ok(Box::new(io::Cursor::new(content.clone())) as Box<dyn Read>)
            }
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "No such file or directory",
            )),
        })
    }

    /// Reader that serves at most `step` bytes per call, so chunk reassembly
    /// is exercised with read sizes unrelated to the chunk buffer.
    struct DribbleReader {
        data: Vec<u8>,
        pos: usize,
        step: usize,
    }

    impl Read for DribbleReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    /// Reader that yields its data, then fails instead of reporting EOF.
    struct FailAfterReader {
        data: Vec<u8>,
        pos: usize,
    }

    impl Read for FailAfterReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos < self.data.len() {
                let n = buf.len().min(self.data.len() - self.pos);
                buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
                self.pos += n;
                Ok(n)
            } else {
                Err(io::Error::new(io::ErrorKind::Other, "Input/output error"))
            }
        }
    }

    /// Writer that rejects every byte.
    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "Broken pipe"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn patterned(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    // ── parse ───────────────────────────────────────────────────────────────

    #[test]
    fn parse_no_arguments_is_an_empty_run() {
        let parsed = parse(&argv(&[])).unwrap();
        assert_eq!(parsed, Parsed::Run(Options::default()));
    }

    #[test]
    fn parse_collects_paths_in_order_with_duplicates() {
        let parsed = parse(&argv(&["a", "b", "a"])).unwrap();
        match parsed {
            Parsed::Run(opts) => assert_eq!(opts.paths, paths(&["a", "b", "a"])),
            other => panic!("expected Run, got {:?}", other),
        }
    }

    #[test]
    fn parse_dash_n_sets_number_all_only() {
        let parsed = parse(&argv(&["-n", "file"])).unwrap();
        match parsed {
            Parsed::Run(opts) => {
                assert!(opts.number_all);
                assert!(!opts.show_tabs);
                assert!(!opts.show_ends);
                assert_eq!(opts.paths, paths(&["file"]));
            }
            other => panic!("expected Run, got {:?}", other),
        }
    }

    #[test]
    fn parse_flags_and_paths_interleave() {
        let parsed = parse(&argv(&["a", "-n", "b"])).unwrap();
        match parsed {
            Parsed::Run(opts) => {
                assert!(opts.number_all);
                assert_eq!(opts.paths, paths(&["a", "b"]));
            }
            other => panic!("expected Run, got {:?}", other),
        }
    }

    #[test]
    fn parse_help_first_token_wins() {
        assert_eq!(parse(&argv(&["--help", "file"])).unwrap(), Parsed::Help);
        assert_eq!(parse(&argv(&["-h"])).unwrap(), Parsed::Help);
    }

    #[test]
    fn parse_version_first_token_wins() {
        assert_eq!(parse(&argv(&["--version", "file"])).unwrap(), Parsed::Version);
    }

    #[test]
    fn parse_late_help_is_a_usage_error() {
        // Help is recognized only as the first token.
        let err = parse(&argv(&["file", "--help"])).unwrap_err();
        assert!(err.to_string().contains("--help"), "got: {err}");
    }

    #[test]
    fn parse_unknown_long_option_fails_naming_it() {
        let err = parse(&argv(&["-n", "--bogus", "file.txt"])).unwrap_err();
        assert!(err.to_string().contains("--bogus"), "got: {err}");
    }

    #[test]
    fn parse_unknown_long_with_value_fails_naming_it() {
        let err = parse(&argv(&["--mark=yes"])).unwrap_err();
        assert!(err.to_string().contains("--mark=yes"), "got: {err}");
    }

    #[test]
    fn parse_unknown_short_fails_naming_the_character() {
        let err = parse(&argv(&["-z"])).unwrap_err();
        assert!(err.to_string().contains("-z"), "got: {err}");
    }

    #[test]
    fn parse_bare_dash_has_no_effect() {
        // An empty shorthand cluster: not a path, no flag effects.
        let parsed = parse(&argv(&["-", "file"])).unwrap();
        match parsed {
            Parsed::Run(opts) => {
                assert!(!opts.number_all);
                assert_eq!(opts.paths, paths(&["file"]));
            }
            other => panic!("expected Run, got {:?}", other),
        }
    }

    #[test]
    fn parse_double_dash_is_a_usage_error() {
        // `--` classifies as a longhand with an empty name; cat knows none.
        let err = parse(&argv(&["--", "file"])).unwrap_err();
        assert!(err.to_string().contains("--"), "got: {err}");
    }

    // ── drain (partial application observable before the failure) ───────────

    #[test]
    fn drain_applies_cluster_flags_before_the_bad_character() {
        let args = argv(&["-nz", "file"]);
        let mut stream = ArgStream::new(&args);
        let first = match stream.next_with_help_version() {
            Some(Pull::Arg(arg)) => arg,
            other => panic!("expected Arg, got {:?}", other),
        };
        let mut opts = Options::default();
        let state = drain(first, &mut stream, &mut opts);
        assert!(opts.number_all, "`n` must take effect before `z` halts the loop");
        assert_eq!(state, ParseState::InvalidArgument(BadToken::Short('z')));
    }

    #[test]
    fn drain_stops_consuming_after_the_bad_token() {
        let args = argv(&["--bogus", "later.txt"]);
        let mut stream = ArgStream::new(&args);
        let first = match stream.next_with_help_version() {
            Some(Pull::Arg(arg)) => arg,
            other => panic!("expected Arg, got {:?}", other),
        };
        let mut opts = Options::default();
        let state = drain(first, &mut stream, &mut opts);
        assert_eq!(
            state,
            ParseState::InvalidArgument(BadToken::Option("--bogus".to_owned()))
        );
        // `later.txt` was never consumed as a path.
        assert!(opts.paths.is_empty());
    }

    // ── copy_paths ──────────────────────────────────────────────────────────

    #[test]
    fn copy_no_paths_writes_nothing() {
        let fs = mem_fs(&[]);
        let mut out = Vec::new();
        let mut errs = Vec::new();
        let mut diag = Diagnostics::new("cat", &mut errs);
        copy_paths(&[], &fs, &mut out, &mut diag).unwrap();
        assert!(out.is_empty());
        assert!(errs.is_empty());
    }

    #[test]
    fn copy_preserves_path_order() {
        let fs = mem_fs(&[("a", b"alpha"), ("b", b"beta"), ("c", b"gamma")]);
        let mut out = Vec::new();
        let mut errs = Vec::new();
        let mut diag = Diagnostics::new("cat", &mut errs);
        copy_paths(&paths(&["a", "b", "c"]), &fs, &mut out, &mut diag).unwrap();
        assert_eq!(out, b"alphabetagamma");
        assert!(errs.is_empty());
    }

    #[test]
    fn copy_reconstructs_content_larger_than_one_chunk() {
        // 3000 bytes straddles three chunk reads; the output must match
        // byte-for-byte with no gaps, duplication, or reordering.
        let content = patterned(3 * READ_CHUNK_SIZE - 72);
        let fs = mem_fs(&[("big", content.as_slice())]);
        let mut out = Vec::new();
        let mut errs = Vec::new();
        let mut diag = Diagnostics::new("cat", &mut errs);
        copy_paths(&paths(&["big"]), &fs, &mut out, &mut diag).unwrap();
        assert_eq!(out, content);
    }

    #[test]
    fn copy_reconstructs_across_short_reads() {
        // Reads smaller than the chunk buffer are forwarded as produced.
        let content = patterned(500);
        let inner = content.clone();
        let fs = FnFs(move |_: &str| {
            Ok(Box::new(DribbleReader { data: inner.clone(), pos: 0, step: 7 })
                as Box<dyn Read>)
        });
        let mut out = Vec::new();
        let mut errs = Vec::new();
        let mut diag = Diagnostics::new("cat", &mut errs);
        copy_paths(&paths(&["dribble"]), &fs, &mut out, &mut diag).unwrap();
        assert_eq!(out, content);
    }

    #[test]
    fn copy_skips_unopenable_file_and_continues() {
        let fs = mem_fs(&[("b", b"beta".as_slice())]);
        let mut out = Vec::new();
        let mut errs = Vec::new();
        let mut diag = Diagnostics::new("cat", &mut errs);
        copy_paths(&paths(&["missing", "b"]), &fs, &mut out, &mut diag).unwrap();
        assert_eq!(out, b"beta");
        let text = String::from_utf8(errs).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("failed to open 'missing'"), "got: {text}");
    }

    #[test]
    fn copy_abandons_file_on_read_failure_and_continues() {
        let fs = FnFs(|path: &str| match path {
            "broken" => Ok(Box::new(FailAfterReader { data: b"par".to_vec(), pos: 0 })
                as Box<dyn Read>),
            "b" => Ok(Box::new(io::Cursor::new(b"beta".to_vec())) as Box<dyn Read>),
            _ => Err(io::Error::new(io::ErrorKind::NotFound, "No such file or directory")),
        });
        let mut out = Vec::new();
        let mut errs = Vec::new();
        let mut diag = Diagnostics::new("cat", &mut errs);
        copy_paths(&paths(&["broken", "b"]), &fs, &mut out, &mut diag).unwrap();
        // Bytes read before the failure were already forwarded.
        assert_eq!(out, b"parbeta");
        let text = String::from_utf8(errs).unwrap();
        assert!(text.contains("failed to read 'broken'"), "got: {text}");
    }

    #[test]
    fn copy_write_failure_is_fatal_and_stops_the_run() {
        let opened = RefCell::new(Vec::new());
        let fs = FnFs(|path: &str| {
            opened.borrow_mut().push(path.to_owned());
            Ok(Box::new(io::Cursor::new(b"data".to_vec())) as Box<dyn Read>)
        });
        let mut out = FailingWriter;
        let mut errs = Vec::new();
        let mut diag = Diagnostics::new("cat", &mut errs);
        let err = copy_paths(&paths(&["a", "b"]), &fs, &mut out, &mut diag).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        // No later path is attempted, and the loop emits no diagnostic of its
        // own for the fatal condition.
        assert_eq!(*opened.borrow(), paths(&["a"]));
        assert!(errs.is_empty());
    }

    #[test]
    fn copy_survives_a_failing_diagnostics_sink() {
        // Reporting is best-effort: a dead stderr must not abort recovery.
        struct DeadSink;
        impl Write for DeadSink {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "Broken pipe"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let fs = mem_fs(&[("b", b"beta".as_slice())]);
        let mut out = Vec::new();
        let mut sink = DeadSink;
        let mut diag = Diagnostics::new("cat", &mut sink);
        copy_paths(&paths(&["missing", "b"]), &fs, &mut out, &mut diag).unwrap();
        assert_eq!(out, b"beta");
    }

    #[test]
    fn numbering_flag_parses_but_output_is_verbatim() {
        // `-n` is accepted and recorded, and the copied bytes are untouched:
        // no line numbers are inserted.
        let parsed = parse(&argv(&["-n", "lines"])).unwrap();
        let opts = match parsed {
            Parsed::Run(opts) => opts,
            other => panic!("expected Run, got {:?}", other),
        };
        assert!(opts.number_all);

        let content = b"one\ntwo\nthree\n";
        let fs = mem_fs(&[("lines", content.as_slice())]);
        let mut out = Vec::new();
        let mut errs = Vec::new();
        let mut diag = Diagnostics::new("cat", &mut errs);
        copy_paths(&opts.paths, &fs, &mut out, &mut diag).unwrap();
        assert_eq!(out, content);
    }
}
