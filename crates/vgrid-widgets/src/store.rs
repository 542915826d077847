#![forbid(unsafe_code)]

//! Per-row selection state with write-through persistence.
//!
//! The store maps row indices to one of three choices and mirrors every
//! mutation into a single serialized blob so selections survive restarts.
//! Persistence failures degrade silently: a missing or malformed blob
//! yields an empty store, and write errors never reach the caller.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::warn;

/// One of the three mutually-exclusive per-row choices.
///
/// Serialized as the strings `"1"`, `"2"`, `"3"`; an absent entry means
/// [`Choice::One`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Choice {
    #[default]
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
}

impl Choice {
    /// All choices, in display order.
    pub const ALL: [Self; 3] = [Self::One, Self::Two, Self::Three];

    /// The choice's display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
            Self::Three => "3",
        }
    }

    /// Position of this choice in [`Choice::ALL`].
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::One => 0,
            Self::Two => 1,
            Self::Three => 2,
        }
    }

    /// Inverse of [`Choice::index`].
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::One),
            1 => Some(Self::Two),
            2 => Some(Self::Three),
            _ => None,
        }
    }
}

/// Row index → explicit choice. Absent keys mean the default choice.
pub type SelectionMap = HashMap<u32, Choice, ahash::RandomState>;

/// Storage for the serialized selection blob.
///
/// The store treats the blob as opaque: one key, whole-value reads and
/// writes, removal on reset.
pub trait BlobStore {
    /// Read the blob, if present.
    fn read(&self) -> Option<String>;

    /// Replace the blob.
    fn write(&mut self, blob: &str);

    /// Remove the blob entirely.
    fn clear(&mut self);
}

/// In-memory blob, for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlob {
    blob: Option<String>,
}

impl MemoryBlob {
    /// Create an empty in-memory blob.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a blob pre-seeded with serialized content.
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }

    /// The current blob content.
    #[must_use]
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl BlobStore for MemoryBlob {
    fn read(&self) -> Option<String> {
        self.blob.clone()
    }

    fn write(&mut self, blob: &str) {
        self.blob = Some(blob.to_owned());
    }

    fn clear(&mut self) {
        self.blob = None;
    }
}

/// Blob stored as a file on disk.
#[derive(Debug, Clone)]
pub struct FileBlob {
    path: PathBuf,
}

impl FileBlob {
    /// Create a file-backed blob at the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl BlobStore for FileBlob {
    fn read(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    fn write(&mut self, blob: &str) {
        if let Err(_err) = fs::write(&self.path, blob) {
            #[cfg(feature = "tracing")]
            warn!(path = %self.path.display(), error = %_err, "selection blob write failed");
        }
    }

    fn clear(&mut self) {
        if let Err(_err) = fs::remove_file(&self.path) {
            #[cfg(feature = "tracing")]
            if _err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %_err, "selection blob remove failed");
            }
        }
    }
}

/// Per-row selection store with write-through persistence.
///
/// Entries are never removed individually; [`SelectionStore::clear`]
/// resets everything, removing the blob outright.
#[derive(Debug)]
pub struct SelectionStore<B: BlobStore> {
    entries: SelectionMap,
    backend: B,
}

impl<B: BlobStore> SelectionStore<B> {
    /// Build the store from the backend's current blob.
    ///
    /// A missing or malformed blob yields an empty store.
    #[must_use]
    pub fn load(backend: B) -> Self {
        let entries = match backend.read() {
            Some(blob) => match serde_json::from_str::<SelectionMap>(&blob) {
                Ok(entries) => entries,
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    warn!(error = %_err, "malformed selection blob, starting empty");
                    SelectionMap::default()
                }
            },
            None => SelectionMap::default(),
        };
        Self { entries, backend }
    }

    /// The choice for a row; rows never written resolve to the default.
    #[must_use]
    pub fn get(&self, index: u32) -> Choice {
        self.entries.get(&index).copied().unwrap_or_default()
    }

    /// Record a choice for a row and re-persist the whole mapping.
    pub fn set(&mut self, index: u32, choice: Choice) {
        self.entries.insert(index, choice);
        self.persist();
    }

    /// Reset: empty the mapping and remove the persisted blob. Idempotent.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.backend.clear();
    }

    /// Number of rows with an explicit selection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no row has an explicit selection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The blob backend (primarily for tests).
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn persist(&mut self) {
        match serde_json::to_string(&self.entries) {
            Ok(blob) => self.backend.write(&blob),
            Err(_err) => {
                #[cfg(feature = "tracing")]
                warn!(error = %_err, "selection blob serialize failed");
            }
        }
    }
}

/// Read access to per-row selections, the seam between the store and the
/// row view.
pub trait SelectionSource {
    /// The effective choice for a row.
    fn get(&self, index: u32) -> Choice;
}

impl<B: BlobStore> SelectionSource for SelectionStore<B> {
    fn get(&self, index: u32) -> Choice {
        SelectionStore::get(self, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwritten_index_defaults_to_one() {
        let store = SelectionStore::load(MemoryBlob::new());
        assert_eq!(store.get(42), Choice::One);
        assert!(store.is_empty());
    }

    #[test]
    fn set_then_reload_round_trips() {
        let mut store = SelectionStore::load(MemoryBlob::new());
        store.set(5, Choice::Two);

        // Simulate a reload from the persisted blob.
        let blob = store.backend().clone();
        let reloaded = SelectionStore::load(blob);
        assert_eq!(reloaded.get(5), Choice::Two);
        assert_eq!(reloaded.get(6), Choice::One);
    }

    #[test]
    fn set_persists_immediately() {
        let mut store = SelectionStore::load(MemoryBlob::new());
        store.set(7, Choice::Three);
        let blob = store.backend().blob().unwrap();
        assert_eq!(blob, r#"{"7":"3"}"#);
    }

    #[test]
    fn clear_is_idempotent_and_removes_blob() {
        let mut store = SelectionStore::load(MemoryBlob::new());
        store.set(1, Choice::Two);
        assert!(store.backend().blob().is_some());

        store.clear();
        assert!(store.is_empty());
        assert!(store.backend().blob().is_none());

        store.clear();
        assert!(store.is_empty());
        assert!(store.backend().blob().is_none());
    }

    #[test]
    fn malformed_blob_starts_empty() {
        let store = SelectionStore::load(MemoryBlob::with_blob("not json"));
        assert!(store.is_empty());
        assert_eq!(store.get(1), Choice::One);
    }

    #[test]
    fn invalid_choice_value_starts_empty() {
        let store = SelectionStore::load(MemoryBlob::with_blob(r#"{"3":"9"}"#));
        assert!(store.is_empty());
    }

    #[test]
    fn blob_uses_decimal_string_keys() {
        let mut store = SelectionStore::load(MemoryBlob::new());
        store.set(10_001, Choice::Two);
        let parsed: serde_json::Value =
            serde_json::from_str(store.backend().blob().unwrap()).unwrap();
        assert_eq!(parsed["10001"], "2");
    }

    #[test]
    fn overwrite_replaces_choice() {
        let mut store = SelectionStore::load(MemoryBlob::new());
        store.set(2, Choice::Two);
        store.set(2, Choice::Three);
        assert_eq!(store.get(2), Choice::Three);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn choice_index_round_trips() {
        for choice in Choice::ALL {
            assert_eq!(Choice::from_index(choice.index()), Some(choice));
        }
        assert_eq!(Choice::from_index(3), None);
    }

    #[test]
    fn file_blob_round_trips() {
        let path = std::env::temp_dir().join(format!(
            "vgrid-store-test-{}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        let mut store = SelectionStore::load(FileBlob::new(&path));
        store.set(9, Choice::Two);

        let reloaded = SelectionStore::load(FileBlob::new(&path));
        assert_eq!(reloaded.get(9), Choice::Two);

        let mut reloaded = reloaded;
        reloaded.clear();
        assert!(!path.exists());
    }
}
