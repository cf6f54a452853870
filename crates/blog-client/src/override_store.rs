//! Operator-configured fallback address

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Key/value storage for the manual override URL.
pub trait OverrideStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, url: &str) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryOverrideStore {
    value: RwLock<Option<String>>,
}

impl MemoryOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OverrideStore for MemoryOverrideStore {
    fn get(&self) -> Option<String> {
        self.value.read().clone()
    }

    fn set(&self, url: &str) -> Result<(), StoreError> {
        *self.value.write() = Some(url.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.value.write() = None;
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OverrideFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    manual_override: Option<String>,
}

/// Persists the override as `{"manualOverride": "..."}` so it survives
/// restarts. A missing or unreadable file reads as "no override".
#[derive(Debug)]
pub struct FileOverrideStore {
    path: PathBuf,
}

impl FileOverrideStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, file: &OverrideFile) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(file)?)?;
        Ok(())
    }
}

impl OverrideStore for FileOverrideStore {
    fn get(&self) -> Option<String> {
        let raw = std::fs::read(&self.path).ok()?;
        serde_json::from_slice::<OverrideFile>(&raw).ok()?.manual_override
    }

    fn set(&self, url: &str) -> Result<(), StoreError> {
        self.write(&OverrideFile { manual_override: Some(url.to_string()) })
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.write(&OverrideFile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryOverrideStore::new();
        assert_eq!(store.get(), None);
        store.set("https://manual.example.com").unwrap();
        assert_eq!(store.get().as_deref(), Some("https://manual.example.com"));
        store.clear().unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = std::env::temp_dir()
            .join(format!("blog-client-override-{}", std::process::id()))
            .join("override.json");
        let store = FileOverrideStore::new(&path);
        assert_eq!(store.get(), None);

        store.set("https://manual.example.com").unwrap();
        assert_eq!(FileOverrideStore::new(&path).get().as_deref(), Some("https://manual.example.com"));

        store.clear().unwrap();
        assert_eq!(store.get(), None);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
