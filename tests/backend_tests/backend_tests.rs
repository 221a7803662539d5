//! Tests for storage backends
//!
//! These tests verify:
//! - FileBackend creates missing files and directories
//! - FileBackend overwrites content and leaves no temp file
//! - MemoryBackend shares its buffer between clones

use std::fs;

use notekv::{FileBackend, MemoryBackend, StorageBackend};
use tempfile::TempDir;

// =============================================================================
// FileBackend Tests
// =============================================================================

#[test]
fn test_file_load_creates_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("dir").join("store.note");

    let mut backend = FileBackend::new(&path);
    let content = backend.load().unwrap();

    assert_eq!(content, "");
    assert!(path.exists());
    assert_eq!(backend.path(), path.as_path());
}

#[test]
fn test_file_load_existing_content() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.note");
    fs::write(&path, "a=1\n").unwrap();

    let mut backend = FileBackend::new(&path);
    assert_eq!(backend.load().unwrap(), "a=1\n");
}

#[test]
fn test_file_persist_overwrites() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.note");
    fs::write(&path, "a=1\nb=2\nc=3\n").unwrap();

    let mut backend = FileBackend::new(&path);
    backend.persist("z=9\n").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "z=9\n");
    assert!(!temp_dir.path().join("store.note.tmp").exists());
}

#[test]
fn test_file_persist_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.note");
    fs::write(&path, "a=1\n").unwrap();

    let mut backend = FileBackend::new(&path);
    backend.persist("").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_file_failed_persist_removes_temp_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.note");
    // A directory in the target's place makes the final rename fail
    fs::create_dir(&path).unwrap();
    fs::write(path.join("inside"), "x").unwrap();

    let mut backend = FileBackend::new(&path);
    assert!(backend.persist("a=1\n").is_err());

    assert!(!temp_dir.path().join("store.note.tmp").exists());
    assert!(path.is_dir());
}

#[cfg(unix)]
#[test]
fn test_file_persist_keeps_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.note");
    fs::write(&path, "a=1\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

    let mut backend = FileBackend::new(&path);
    backend.persist("b=2\n").unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(fs::read_to_string(&path).unwrap(), "b=2\n");
}

#[test]
fn test_file_describe() {
    let backend = FileBackend::new("data/store.note");
    assert!(backend.describe().ends_with("store.note"));
}

// =============================================================================
// MemoryBackend Tests
// =============================================================================

#[test]
fn test_memory_roundtrip() {
    let mut backend = MemoryBackend::new();
    assert_eq!(backend.load().unwrap(), "");

    backend.persist("a=1\n").unwrap();
    assert_eq!(backend.load().unwrap(), "a=1\n");
}

#[test]
fn test_memory_clones_share_buffer() {
    let observer = MemoryBackend::with_content("a=1\n");
    let mut writer = observer.clone();

    writer.persist("b=2\n").unwrap();
    assert_eq!(observer.contents(), "b=2\n");

    observer.replace("c=3\n");
    assert_eq!(writer.load().unwrap(), "c=3\n");
}
