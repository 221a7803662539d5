//! Configuration for NoteKV
//!
//! Centralized configuration with sensible defaults.

use std::path::{Path, PathBuf};

use crate::error::{NoteError, Result};

/// File used when no path (or the `default` sentinel) is given
pub const DEFAULT_FILENAME: &str = "notekv.note";

/// Extension every store file must carry
pub const REQUIRED_EXTENSION: &str = "note";

/// Path value that selects [`DEFAULT_FILENAME`] (case-insensitive)
const DEFAULT_SENTINEL: &str = "default";

/// Main configuration for a NoteKV store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Backing file. Must end in `.note`.
    pub file_path: PathBuf,

    // -------------------------------------------------------------------------
    // Read Configuration
    // -------------------------------------------------------------------------
    /// Convert stored strings to inferred values on read
    pub auto_parse: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from(DEFAULT_FILENAME),
            auto_parse: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Backing file with the `default` sentinel applied
    ///
    /// An empty path or `default` (any case) selects [`DEFAULT_FILENAME`].
    pub fn resolved_path(&self) -> PathBuf {
        resolve_path(&self.file_path)
    }

    /// Check that the backing file carries the required extension
    pub fn validate(&self) -> Result<()> {
        let path = self.resolved_path();
        if has_required_extension(&path) {
            Ok(())
        } else {
            Err(NoteError::InvalidExtension {
                path,
                expected: REQUIRED_EXTENSION,
            })
        }
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing file
    ///
    /// An empty path or `default` (any case) selects [`DEFAULT_FILENAME`].
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.file_path = resolve_path(&path.into());
        self
    }

    /// Enable or disable auto-parsing of values on read
    pub fn auto_parse(mut self, enabled: bool) -> Self {
        self.config.auto_parse = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

fn resolve_path(path: &Path) -> PathBuf {
    let is_sentinel = path
        .to_str()
        .map(|s| s.is_empty() || s.eq_ignore_ascii_case(DEFAULT_SENTINEL))
        .unwrap_or(false);

    if is_sentinel {
        PathBuf::from(DEFAULT_FILENAME)
    } else {
        path.to_path_buf()
    }
}

fn has_required_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == REQUIRED_EXTENSION)
        .unwrap_or(false)
}
