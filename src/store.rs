/// Keyword list persistence
///
/// Saves and loads the raw, unparsed keyword string.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Persistent home for the raw keyword list
pub trait KeywordStore {
    /// Previously saved raw string, `None` if nothing was saved
    fn get(&self) -> Result<Option<String>, StoreError>;

    /// Save the raw string unchanged
    fn set(&mut self, raw: &str) -> Result<(), StoreError>;
}

/// In-memory store, lost when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a raw keyword string
    pub fn with_value(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }
}

impl KeywordStore for MemoryStore {
    fn get(&self) -> Result<Option<String>, StoreError> {
        Ok(self.raw.clone())
    }

    fn set(&mut self, raw: &str) -> Result<(), StoreError> {
        self.raw = Some(raw.to_string());
        Ok(())
    }
}

/// On-disk document
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredKeywords {
    /// Format version (for future migrations)
    version: u32,

    /// Raw comma-separated keyword list
    keywords: String,
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Current file format version
    const VERSION: u32 = 1;

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform default location
    pub fn open_default() -> Result<Self, StoreError> {
        Self::default_path()
            .map(Self::new)
            .ok_or(StoreError::NoConfigDir)
    }

    /// Get default store file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("KeywordWatch").join("keywords.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the store file if present
    pub fn delete(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).map_err(|e| StoreError::WriteFailed {
                path: self.path.display().to_string(),
                source: Box::new(e),
            })?;
            tracing::debug!("Deleted keyword store: {}", self.path.display());
        }
        Ok(())
    }

    fn read_failed(&self, source: impl std::error::Error + Send + Sync + 'static) -> StoreError {
        StoreError::ReadFailed {
            path: self.path.display().to_string(),
            source: Box::new(source),
        }
    }

    fn write_failed(&self, source: impl std::error::Error + Send + Sync + 'static) -> StoreError {
        StoreError::WriteFailed {
            path: self.path.display().to_string(),
            source: Box::new(source),
        }
    }
}

impl KeywordStore for JsonFileStore {
    fn get(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            tracing::debug!("No keyword store at {}, starting empty", self.path.display());
            return Ok(None);
        }

        let json = std::fs::read_to_string(&self.path).map_err(|e| self.read_failed(e))?;
        let stored: StoredKeywords =
            serde_json::from_str(&json).map_err(|e| self.read_failed(e))?;

        if stored.version != Self::VERSION {
            tracing::warn!(
                "Keyword store version mismatch: expected {}, found {}",
                Self::VERSION,
                stored.version
            );
        }

        tracing::debug!("Loaded keywords from: {}", self.path.display());
        Ok(Some(stored.keywords))
    }

    fn set(&mut self, raw: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.write_failed(e))?;
        }

        let stored = StoredKeywords {
            version: Self::VERSION,
            keywords: raw.to_string(),
        };
        let json = serde_json::to_string_pretty(&stored).map_err(|e| self.write_failed(e))?;
        std::fs::write(&self.path, json).map_err(|e| self.write_failed(e))?;

        tracing::debug!("Saved keywords to: {}", self.path.display());
        Ok(())
    }
}
