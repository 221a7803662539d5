//! # NoteKV
//!
//! A tiny embedded key-value store persisted as a flat text file:
//! - One `key=value` pair per line, `#` comments kept verbatim
//! - Validation on load with the 1-based number of the first bad line
//! - Full-file rewrite after every mutation
//! - Optional best-guess typing of values on read
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Store                               │
//! │        get / set / change / remove / remove_all / ...        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Lines    │          │    Value    │
//!   │ (validate)  │          │(auto-parse) │
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │   Backend   │
//!   │ (file/mem)  │
//!   └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use notekv::{MemoryBackend, Store, Value};
//!
//! let backend = MemoryBackend::with_content("# settings\nyears=2021\n");
//! let mut store = Store::with_backend(backend.clone(), true).unwrap();
//!
//! assert_eq!(store.get("years").unwrap(), Value::from(2021));
//! store.change("years", "2022").unwrap();
//! assert_eq!(backend.contents(), "# settings\nyears=2022\n");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod line;
pub mod value;
pub mod backend;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Lenient, NoteError, Result};
pub use config::{Config, DEFAULT_FILENAME, REQUIRED_EXTENSION};
pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use store::{Entry, Store};
pub use value::{Value, ValueKind};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of NoteKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
