//! Storage Backend Module
//!
//! Where the store's text lives.
//!
//! ## Responsibilities
//! - Hand the full file content to the store on load
//! - Replace the full content on every mutation
//!
//! The store never appends or patches: each `persist` is a complete
//! overwrite, so a backend only needs these two primitives.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;

/// Read/write primitives a [`Store`](crate::Store) runs on
pub trait StorageBackend {
    /// Return the full content, creating an empty store if none exists yet
    fn load(&mut self) -> Result<String>;

    /// Replace the full content
    fn persist(&mut self, content: &str) -> Result<()>;

    /// Human-readable location for logs
    fn describe(&self) -> String;
}

// =============================================================================
// File Backend
// =============================================================================

/// Backend over a single file on disk
///
/// Writes go to a sibling `.tmp` file which is synced and then renamed over
/// the target, so a reader sees either the previous or the new content.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Write `content` to `tmp_path`, carry over the target's permissions,
    /// and rename it over the target
    fn write_replacement(&self, tmp_path: &Path, content: &str) -> Result<()> {
        let mut file = File::create(tmp_path)?;
        file.write_all(content.as_bytes())?;
        if let Ok(metadata) = fs::metadata(&self.path) {
            file.set_permissions(metadata.permissions())?;
        }
        file.sync_all()?;
        drop(file);

        fs::rename(tmp_path, &self.path)?;
        Ok(())
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn load(&mut self) -> Result<String> {
        if !self.path.exists() {
            self.ensure_parent()?;
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(false)
                .open(&self.path)?;
            tracing::info!("Created empty store file {}", self.path.display());
            return Ok(String::new());
        }

        Ok(fs::read_to_string(&self.path)?)
    }

    fn persist(&mut self, content: &str) -> Result<()> {
        self.ensure_parent()?;
        let tmp_path = self.tmp_path();

        if let Err(e) = self.write_replacement(&tmp_path, content) {
            // Leave no temp file behind.
            let _ = fs::remove_file(&tmp_path);
            tracing::warn!("Failed to write {}: {}", self.path.display(), e);
            return Err(e);
        }

        tracing::trace!("Wrote {} bytes to {}", content.len(), self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// =============================================================================
// Memory Backend
// =============================================================================

/// In-memory backend
///
/// Clones share one buffer, so a test can keep a handle and inspect exactly
/// what the store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    buffer: Arc<Mutex<String>>,
}

impl MemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-loaded with file content
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(content.into())),
        }
    }

    /// Current content of the shared buffer
    pub fn contents(&self) -> String {
        self.buffer.lock().clone()
    }

    /// Overwrite the buffer behind the store's back (simulates an external edit)
    pub fn replace(&self, content: impl Into<String>) {
        *self.buffer.lock() = content.into();
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&mut self) -> Result<String> {
        Ok(self.buffer.lock().clone())
    }

    fn persist(&mut self, content: &str) -> Result<()> {
        let mut buffer = self.buffer.lock();
        buffer.clear();
        buffer.push_str(content);
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}
