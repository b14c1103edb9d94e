//! Input resolution: read the source document from a file or stdin.
//!
//! The converter works on text, so the only job here is turning a
//! user-supplied location into a `String` and mapping I/O failures onto
//! [`TanaPasteError`] variants a user can act on.

use crate::error::TanaPasteError;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the source document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// `-` selects stdin; anything else is a path.
    pub fn parse(arg: &str) -> Self {
        if arg == "-" {
            Source::Stdin
        } else {
            Source::File(PathBuf::from(arg))
        }
    }

    /// Path used in error messages.
    pub fn display_path(&self) -> PathBuf {
        match self {
            Source::Stdin => PathBuf::from("<stdin>"),
            Source::File(p) => p.clone(),
        }
    }
}

/// Read the whole document as UTF-8 text.
pub fn read_source(source: &Source) -> Result<String, TanaPasteError> {
    match source {
        Source::File(path) => read_file(path),
        Source::Stdin => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .map_err(|e| map_read_error(&source.display_path(), e))?;
            decode(&source.display_path(), bytes)
        }
    }
}

/// Read a local file, validating existence, permissions and encoding.
pub fn read_file(path: &Path) -> Result<String, TanaPasteError> {
    if !path.exists() {
        return Err(TanaPasteError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|e| map_read_error(path, e))?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    decode(path, bytes)
}

fn decode(path: &Path, bytes: Vec<u8>) -> Result<String, TanaPasteError> {
    String::from_utf8(bytes).map_err(|_| TanaPasteError::InvalidEncoding {
        path: path.to_path_buf(),
    })
}

fn map_read_error(path: &Path, e: std::io::Error) -> TanaPasteError {
    let path = path.to_path_buf();
    match e.kind() {
        ErrorKind::NotFound => TanaPasteError::FileNotFound { path },
        ErrorKind::PermissionDenied => TanaPasteError::PermissionDenied { path },
        ErrorKind::InvalidData => TanaPasteError::InvalidEncoding { path },
        _ => TanaPasteError::InputReadFailed { path, source: e },
    }
}
