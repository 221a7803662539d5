//! Store Module
//!
//! The key-value store over a line-oriented text file.
//!
//! ## Responsibilities
//! - Load and validate the backing content once, on open
//! - Serve reads from the in-memory line sequence
//! - Rewrite the whole content after every mutation

use serde::{Deserialize, Serialize};

use crate::backend::{FileBackend, StorageBackend};
use crate::config::Config;
use crate::error::{NoteError, Result};
use crate::line::{self, Line};
use crate::value::{self, Value, ValueKind};

/// One key/value pair as returned by [`Store::get_all`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub key: String,
    pub value: Value,
}

/// The store
///
/// ## State Model
/// - `lines` is the only source of truth once the store is open
/// - Every mutating call builds the new line sequence, persists all of it,
///   and only then replaces `lines`; a failed write leaves the store unchanged
/// - Comments stay in place; blank lines are gone after load
///
/// There is no locking. Two stores (or processes) on the same file will
/// overwrite each other; the last writer wins.
pub struct Store<B: StorageBackend = FileBackend> {
    /// Storage the lines are loaded from and written to
    backend: B,

    /// Raw lines in file order (comments and entries)
    lines: Vec<String>,

    /// Run values through the auto-parser on read
    auto_parse: bool,
}

impl Store<FileBackend> {
    /// Open or create a file-backed store
    ///
    /// On open:
    /// 1. Check the file extension
    /// 2. Create the file if it does not exist
    /// 3. Validate every line, drop blanks
    /// 4. Write the compacted content back
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        let backend = FileBackend::new(config.resolved_path());
        Self::with_backend(backend, config.auto_parse)
    }
}

impl<B: StorageBackend> Store<B> {
    /// Open a store over any backend
    pub fn with_backend(backend: B, auto_parse: bool) -> Result<Self> {
        let mut store = Self {
            backend,
            lines: Vec::new(),
            auto_parse,
        };
        store.reload()?;
        Ok(store)
    }

    /// Re-read the backend, validate, compact and write back
    ///
    /// Discards the in-memory lines. If validation or the write-back fails
    /// the store keeps its previous lines.
    pub fn reload(&mut self) -> Result<()> {
        let content = self.backend.load()?;
        let raw = line::split_lines(&content);
        let raw_count = raw.len();

        let compacted = line::validate_and_compact(raw).map_err(|e| {
            tracing::error!("Failed to load {}: {}", self.backend.describe(), e);
            e
        })?;

        tracing::info!(
            "Loaded {}: {} lines kept, {} blank lines dropped",
            self.backend.describe(),
            compacted.len(),
            raw_count - compacted.len()
        );

        self.commit(compacted)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Whether any entry line has this key
    pub fn key_exists(&self, key: &str) -> bool {
        self.lines.iter().any(|raw| line::key_of(raw) == Some(key))
    }

    /// Alias of [`Store::key_exists`]
    pub fn has(&self, key: &str) -> bool {
        self.key_exists(key)
    }

    /// Get the value for a key, auto-parsed if enabled
    ///
    /// Fails with `KeyNotFound` when no line has the key, and with
    /// `DuplicateKey` when more than one does.
    pub fn get(&self, key: &str) -> Result<Value> {
        let raw = self.get_raw(key)?;
        Ok(self.to_value(raw))
    }

    /// Get the stored text for a key, never auto-parsed
    pub fn get_raw(&self, key: &str) -> Result<&str> {
        let mut values = self
            .lines
            .iter()
            .filter(|raw| line::key_of(raw) == Some(key))
            .filter_map(|raw| line::value_of(raw));

        let first = values
            .next()
            .ok_or_else(|| NoteError::KeyNotFound(key.to_string()))?;

        let extra = values.count();
        if extra > 0 {
            tracing::warn!("Key {:?} is stored on {} lines", key, extra + 1);
            return Err(NoteError::DuplicateKey {
                key: key.to_string(),
                count: extra + 1,
            });
        }

        Ok(first)
    }

    /// Runtime type of what [`Store::get`] returns
    pub fn type_of(&self, key: &str) -> Result<ValueKind> {
        self.get(key).map(|v| ValueKind::of(&v))
    }

    /// Whether the key has no usable value
    ///
    /// Missing and duplicated keys count as empty, like an empty string,
    /// an empty array or null.
    pub fn is_empty(&self, key: &str) -> Result<bool> {
        match self.get(key) {
            Ok(v) => Ok(value::is_empty_value(&v)),
            Err(e) if e.is_recoverable() => Ok(true),
            Err(e) => Err(e),
        }
    }

    /// Every entry in file order, comments excluded
    pub fn get_all(&self) -> Vec<Entry> {
        self.lines
            .iter()
            .filter_map(|raw| match Line::classify(raw) {
                Line::Entry { key, value } => Some(Entry {
                    key: key.to_string(),
                    value: self.to_value(value),
                }),
                _ => None,
            })
            .collect()
    }

    /// Every key in file order (duplicates repeated)
    pub fn keys(&self) -> Vec<&str> {
        self.lines.iter().filter_map(|raw| line::key_of(raw)).collect()
    }

    /// Number of entry lines
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    /// Raw in-memory lines, comments included
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Append a new `key=value` line
    ///
    /// Fails with `KeyExists` if the key is already present.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.key_exists(key) {
            return Err(NoteError::KeyExists(key.to_string()));
        }

        let entry = line::format_entry(key, value)?;
        tracing::debug!("set {:?}", key);

        let mut lines = self.lines.clone();
        lines.push(entry);
        self.commit(lines)
    }

    /// Replace the value of every line holding `key`, in place
    ///
    /// Returns the number of lines rewritten.
    pub fn change(&mut self, key: &str, value: &str) -> Result<usize> {
        let positions = self.positions(key);
        if positions.is_empty() {
            return Err(NoteError::KeyNotFound(key.to_string()));
        }

        let entry = line::format_entry(key, value)?;
        tracing::debug!("change {:?} on {} lines", key, positions.len());

        let mut lines = self.lines.clone();
        for i in &positions {
            lines[*i] = entry.clone();
        }
        self.commit(lines)?;

        Ok(positions.len())
    }

    /// Drop every line holding `key`
    ///
    /// Returns the number of lines removed.
    pub fn remove(&mut self, key: &str) -> Result<usize> {
        if !self.key_exists(key) {
            return Err(NoteError::KeyNotFound(key.to_string()));
        }

        let lines: Vec<String> = self
            .lines
            .iter()
            .filter(|raw| line::key_of(raw) != Some(key))
            .cloned()
            .collect();
        let removed = self.lines.len() - lines.len();

        tracing::debug!("remove {:?} ({} lines)", key, removed);
        self.commit(lines)?;

        Ok(removed)
    }

    /// Empty the store, comments included
    pub fn remove_all(&mut self) -> Result<()> {
        tracing::debug!("remove_all ({} lines)", self.lines.len());
        self.commit(Vec::new())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Whether reads auto-parse values
    pub fn auto_parse(&self) -> bool {
        self.auto_parse
    }

    /// Get the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Close the store and hand back its backend
    pub fn into_backend(self) -> B {
        self.backend
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Positions of the entry lines whose key equals `key`
    fn positions(&self, key: &str) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, raw)| line::key_of(raw) == Some(key))
            .map(|(i, _)| i)
            .collect()
    }

    fn to_value(&self, raw: &str) -> Value {
        if self.auto_parse {
            value::auto_parse(raw)
        } else {
            Value::String(raw.to_string())
        }
    }

    /// Persist `lines`, then make them the in-memory state
    fn commit(&mut self, lines: Vec<String>) -> Result<()> {
        let content = line::join_lines(&lines);
        self.backend.persist(&content)?;
        self.lines = lines;
        Ok(())
    }
}
