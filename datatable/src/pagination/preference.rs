//! Page-size preference persistence.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::config::PageSizeConfig;
use crate::error::PreferenceError;

/// Storage key for the preferred page size.
pub const PAGE_SIZE_KEY: &str = "user-preference-page-size";

/// Backend trait for preference storage.
///
/// Values are JSON-encoded strings; the facade handles typing.
pub trait PreferenceStore: Send + Sync {
    /// Get the raw value for a key.
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Set the raw value for a key.
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let values = self.values.read().map_err(|_| PreferenceError::Unavailable)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.values.write().map_err(|_| PreferenceError::Unavailable)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object file.
///
/// A missing file reads as empty. Every write rewrites the whole file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }
}

/// Typed, validated access to the preferred page size.
///
/// Never fails: storage errors and corrupt values are logged and replaced
/// by the last valid in-memory value (initially the configured default).
pub struct PageSizePreference {
    store: Arc<dyn PreferenceStore>,
    config: PageSizeConfig,
    fallback: RwLock<usize>,
}

impl PageSizePreference {
    pub fn new(store: Arc<dyn PreferenceStore>, config: PageSizeConfig) -> Self {
        let fallback = RwLock::new(config.default);
        Self {
            store,
            config,
            fallback,
        }
    }

    pub fn config(&self) -> &PageSizeConfig {
        &self.config
    }

    fn fallback(&self) -> usize {
        self.fallback
            .read()
            .map(|v| *v)
            .unwrap_or(self.config.default)
    }

    /// The stored page size, or the fallback.
    pub fn get_page_size(&self) -> usize {
        match self.read_stored() {
            Ok(Some(size)) => size,
            Ok(None) => self.fallback(),
            Err(e) => {
                log::warn!("Failed to read page size preference: {}", e);
                self.fallback()
            }
        }
    }

    fn read_stored(&self) -> Result<Option<usize>, PreferenceError> {
        let Some(raw) = self.store.get(PAGE_SIZE_KEY)? else {
            return Ok(None);
        };
        let size: usize = serde_json::from_str(&raw)?;
        self.validate(size)?;
        Ok(Some(size))
    }

    fn validate(&self, size: usize) -> Result<(), PreferenceError> {
        if self.config.is_valid(size) {
            Ok(())
        } else {
            Err(PreferenceError::OutOfRange {
                value: size,
                min: self.config.min,
                max: self.config.max,
            })
        }
    }

    /// Persist `size`. Out-of-range sizes are rejected and leave the stored
    /// value untouched. Returns whether the size was accepted.
    pub fn set_page_size(&self, size: usize) -> bool {
        if let Err(e) = self.validate(size) {
            log::warn!("Rejected page size preference: {}", e);
            return false;
        }

        if let Ok(mut fallback) = self.fallback.write() {
            *fallback = size;
        }
        let written = serde_json::to_string(&size)
            .map_err(PreferenceError::from)
            .and_then(|raw| self.store.set(PAGE_SIZE_KEY, &raw));
        if let Err(e) = written {
            log::warn!("Failed to persist page size preference: {}", e);
        }
        true
    }
}

impl std::fmt::Debug for PageSizePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSizePreference")
            .field("config", &self.config)
            .field("fallback", &self.fallback())
            .finish()
    }
}
