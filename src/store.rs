use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::Bookmark;

/// Persistence for the bookmark list.
///
/// `load` never fails: missing or unreadable content yields an empty list.
pub trait BookmarkStore {
    fn load(&self) -> Vec<Bookmark>;
    fn save(&self, bookmarks: &[Bookmark]) -> Result<()>;
}

/// XDG-compatible data file: ~/.local/share/ghmark/repositories.json (Linux)
pub fn default_path() -> Option<PathBuf> {
    Some(dirs::data_dir()?.join("ghmark").join("repositories.json"))
}

fn decode(data: &str) -> Vec<Bookmark> {
    match serde_json::from_str(data) {
        Ok(bookmarks) => bookmarks,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unparseable bookmark data");
            Vec::new()
        }
    }
}

/// Stores bookmarks as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BookmarkStore for JsonFileStore {
    fn load(&self) -> Vec<Bookmark> {
        let Ok(data) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        decode(&data)
    }

    fn save(&self, bookmarks: &[Bookmark]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string(bookmarks)?;

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), count = bookmarks.len(), "bookmarks saved");
        Ok(())
    }
}

/// In-memory store holding the serialized text, like a key-value slot.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot with raw content.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: std::sync::Mutex::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

#[cfg(test)]
impl BookmarkStore for MemoryStore {
    fn load(&self) -> Vec<Bookmark> {
        self.raw().map(|data| decode(&data)).unwrap_or_default()
    }

    fn save(&self, bookmarks: &[Bookmark]) -> Result<()> {
        let json = serde_json::to_string(bookmarks)?;
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(json);
        }
        Ok(())
    }
}
