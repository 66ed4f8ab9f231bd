//! Filesystem and standard-output collaborators.
//!
//! [`Filesystem`] is the narrow seam through which commands open their
//! inputs: a path string in, a boxed reader out. Production code uses
//! [`OsFilesystem`]; tests substitute in-memory fakes that return crafted
//! content or errors.

use std::fs::File;
use std::io::{self, Read};

/// Read-only filesystem access.
pub trait Filesystem {
    /// Opens `path` for reading.
    fn open(&self, path: &str) -> io::Result<Box<dyn Read>>;
}

/// The real filesystem.
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn open(&self, path: &str) -> io::Result<Box<dyn Read>> {
        let f = File::open(path)?;
        Ok(Box::new(f))
    }
}

/// Locks standard output for byte streaming.
///
/// On Windows the stream is switched to binary mode first, so file bytes pass
/// through without newline translation.
pub fn stdout_for_streaming() -> io::StdoutLock<'static> {
    #[cfg(windows)]
    // SAFETY: calling _setmode on stdout (fd=1) is always valid.
    unsafe {
        libc::_setmode(1, libc::O_BINARY);
    }
    io::stdout().lock()
}
