//! Preference persistence for table state.
//!
//! Combination-mode choices outlive a single table instance: the last
//! value chosen for each table kind becomes the default the next time a
//! table of that kind is constructed. The store is a plain string
//! key-value collaborator injected explicitly, so tests swap in
//! [`MemoryPreferenceStore`] and production code uses
//! [`FilePreferenceStore`] under the platform config directory. Nothing
//! here is process-global.
//!
//! The contract assumes at most one writer per category at a time; no
//! concurrent-write arbitration is provided.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// String key-value store for per-table preferences.
///
/// `get` is lenient: implementations return `None` for missing entries
/// rather than erroring, and readers fall back to defaults. `set` may
/// fail (the file-backed store writes through on every call), and
/// callers decide whether that failure is fatal; the selection state
/// treats it as best-effort and logs.
pub trait PreferenceStore {
    /// Read the persisted value for a category key, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Persist a value for a category key.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

// ============================================================================
// In-memory store
// ============================================================================

/// `HashMap`-backed store for tests and embedding scenarios with no
/// persistence requirement.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    entries: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================================================
// File-backed store
// ============================================================================

/// Persisted preference document.
///
/// A single JSON object mapping category keys to string values. `BTreeMap`
/// keeps the serialized form stable across writes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PreferenceDocument {
    /// Category key to value entries.
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

/// Preferences persisted as one JSON document on disk.
///
/// Loading is lenient: an unreadable or malformed file yields an empty
/// document rather than an error, mirroring the silent-default policy of
/// the readers. Every `set` writes the document back immediately.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
    document: PreferenceDocument,
}

impl FilePreferenceStore {
    /// Default path under the platform config directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cohort-tables").join("preferences.json"))
    }

    /// Open the store at the default platform location.
    pub fn open_default() -> Result<Self, StoreError> {
        let path = Self::default_path().ok_or(StoreError::NoConfigDir)?;
        Ok(Self::open(path))
    }

    /// Open the store at an explicit path, loading any existing document.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let document = Self::load_document(&path);
        Self { path, document }
    }

    /// Path this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_document(path: &Path) -> PreferenceDocument {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(&self.document)?;
        std::fs::write(&self.path, json).map_err(|e| StoreError::io(&self.path, e))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.document.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.document
            .entries
            .insert(key.to_string(), value.to_string());
        self.save()
    }
}

/// Generate a JSON Schema for the persisted preference document.
///
/// Documents the on-disk format for editors and external tooling.
#[must_use]
pub fn preferences_json_schema() -> String {
    let schema = schemars::schema_for!(PreferenceDocument);
    serde_json::to_string_pretty(&schema).expect("schema serialization should not fail")
}
