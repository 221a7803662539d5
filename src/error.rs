//! Error types for NoteKV
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using NoteError
pub type Result<T> = std::result::Result<T, NoteError>;

/// Unified error type for NoteKV operations
#[derive(Debug, Error)]
pub enum NoteError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Load Errors (always fatal)
    // -------------------------------------------------------------------------
    #[error("Invalid file extension: {} (expected .{})", .path.display(), .expected)]
    InvalidExtension { path: PathBuf, expected: &'static str },

    #[error("Invalid line format at line {line_number}: {content:?}")]
    InvalidLineFormat { line_number: usize, content: String },

    // -------------------------------------------------------------------------
    // Write Errors
    // -------------------------------------------------------------------------
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    // -------------------------------------------------------------------------
    // Key Errors (recoverable)
    // -------------------------------------------------------------------------
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Key already exists: {0}")]
    KeyExists(String),

    #[error("Duplicate key: {key} appears on {count} lines")]
    DuplicateKey { key: String, count: usize },
}

impl NoteError {
    /// Whether the error describes the state of a single key rather than a
    /// broken file or backend.
    ///
    /// Recoverable errors are the ones [`Lenient::lenient`] swallows.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::KeyNotFound(_) | Self::KeyExists(_) | Self::DuplicateKey { .. }
        )
    }
}

/// Silences recoverable key errors at the call site.
///
/// ```
/// use notekv::{Lenient, MemoryBackend, Store};
///
/// let store = Store::with_backend(MemoryBackend::new(), true).unwrap();
/// assert_eq!(store.get("missing").lenient().unwrap(), None);
/// ```
pub trait Lenient<T> {
    /// `Ok(v)` becomes `Ok(Some(v))`, recoverable errors become `Ok(None)`,
    /// everything else is propagated.
    fn lenient(self) -> Result<Option<T>>;
}

impl<T> Lenient<T> for Result<T> {
    fn lenient(self) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_recoverable() => {
                tracing::debug!("Ignoring recoverable error: {}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
