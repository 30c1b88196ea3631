//! File access for config reads
//!
//! A path yields either the file's text or a not-found signal. Any failure
//! to open or read the file counts as not found; the reader decides what
//! that means through the file-not-found policy.

use std::fs;
use std::io::Read;
use std::path::Path;

/// Contents of a config source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Text of the file, invalid UTF-8 replaced
    Content(String),
    /// The file could not be opened or read
    NotFound { reason: String },
}

/// Opens and reads the file at `path`.
pub fn open(path: &Path) -> Source {
    match fs::read(path) {
        Ok(bytes) => Source::Content(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => Source::NotFound {
            reason: e.to_string(),
        },
    }
}

/// Reads a stream to the end.
pub fn read_stream<R: Read>(mut reader: R) -> Source {
    let mut bytes = Vec::new();
    match reader.read_to_end(&mut bytes) {
        Ok(_) => Source::Content(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => Source::NotFound {
            reason: e.to_string(),
        },
    }
}
