//! Argument-token classification shared by every command in the suite.
//!
//! [`ArgStream`] turns the raw argument strings (argv[1..]) into a lazy,
//! finite, non-restartable sequence of [`Arg`] tokens, produced one pull at a
//! time. Classification is purely syntactic — the leading `-`/`--` shape
//! decides the variant, never the set of flags a given command recognizes.
//! Policy (which flags exist, what an unknown one means) belongs to the
//! per-command parsers in [`crate::commands`].
//!
//! Malformed-looking tokens still classify: a bare `-` is a shorthand cluster
//! with no characters, `--` alone is a longhand with an empty name, and an
//! empty string is positional. No classification errors exist at this layer.

/// One classified argument token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg<'a> {
    /// `--name` with no attached value.
    Long(&'a str),
    /// `--name=value`.
    LongWithValue { name: &'a str, value: &'a str },
    /// `-abc`: a cluster of single-letter switches, pulled one `char` at a time.
    Shorts(ShortCluster<'a>),
    /// Anything else; commands treat it as a path argument.
    Positional(&'a str),
}

/// Sub-iterator over the characters of a `-abc` cluster, left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortCluster<'a> {
    rest: &'a str,
}

impl<'a> ShortCluster<'a> {
    /// The characters not yet consumed.
    pub fn as_str(&self) -> &'a str {
        self.rest
    }
}

impl<'a> Iterator for ShortCluster<'a> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let mut chars = self.rest.chars();
        let flag = chars.next()?;
        self.rest = chars.as_str();
        Some(flag)
    }
}

/// Outcome of the first pull, where `-h`/`--help`/`--version` are recognized
/// before generic classification so every command gets uniform handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pull<'a> {
    Help,
    Version,
    Arg(Arg<'a>),
}

fn classify(raw: &str) -> Arg<'_> {
    if let Some(body) = raw.strip_prefix("--") {
        return match body.split_once('=') {
            Some((name, value)) => Arg::LongWithValue { name, value },
            None => Arg::Long(body),
        };
    }
    if let Some(cluster) = raw.strip_prefix('-') {
        return Arg::Shorts(ShortCluster { rest: cluster });
    }
    Arg::Positional(raw)
}

/// Lazy pull-based view over an argument slice. No token is classified until
/// it is requested, and no token is produced twice.
#[derive(Debug)]
pub struct ArgStream<'a> {
    argv: &'a [String],
    cursor: usize,
}

impl<'a> ArgStream<'a> {
    /// A fresh stream over `argv` (the program name already stripped).
    pub fn new(argv: &'a [String]) -> Self {
        ArgStream { argv, cursor: 0 }
    }

    /// First-pull variant: recognizes the literal tokens `-h`, `--help` and
    /// `--version` as distinguished outcomes before generic classification.
    /// Returns `None` when the input is exhausted.
    pub fn next_with_help_version(&mut self) -> Option<Pull<'a>> {
        let raw = self.argv.get(self.cursor)?;
        match raw.as_str() {
            "-h" | "--help" => {
                self.cursor += 1;
                Some(Pull::Help)
            }
            "--version" => {
                self.cursor += 1;
                Some(Pull::Version)
            }
            _ => self.next().map(Pull::Arg),
        }
    }
}

impl<'a> Iterator for ArgStream<'a> {
    type Item = Arg<'a>;

    fn next(&mut self) -> Option<Arg<'a>> {
        let raw = self.argv.get(self.cursor)?;
        self.cursor += 1;
        Some(classify(raw))
    }
}
