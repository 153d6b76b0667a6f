//! Persisted high score storage
//!
//! The file format is a single decimal integer, optionally followed by a newline.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Reads and writes the best score across runs
pub trait HighScoreStore {
    /// Stored score; a store that has never been written yields 0
    fn load(&mut self) -> Result<u64, StoreError>;

    fn save(&mut self, score: u64) -> Result<(), StoreError>;
}

/// Plaintext file store
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&mut self) -> Result<u64, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let value = contents.trim();
        value.parse().map_err(|source| StoreError::Parse {
            value: value.to_string(),
            source,
        })
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, format!("{score}\n"))?;
        log::debug!("Saved high score {} to {}", score, self.path.display());
        Ok(())
    }
}

/// In-memory store for tests and ephemeral runs
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    pub value: Option<u64>,
    /// Number of successful saves
    pub saves: u32,
}

impl MemoryHighScoreStore {
    pub fn with_value(value: u64) -> Self {
        Self {
            value: Some(value),
            saves: 0,
        }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&mut self) -> Result<u64, StoreError> {
        Ok(self.value.unwrap_or(0))
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        self.value = Some(score);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("skyflap-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_file_is_zero() {
        let mut store = FileHighScoreStore::new(temp_path("missing.txt"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_file_save_then_load() {
        let path = temp_path("save-load.txt");
        let mut store = FileHighScoreStore::new(&path);
        store.save(42).unwrap();
        assert_eq!(store.load().unwrap(), 42);
        assert_eq!(fs::read_to_string(&path).unwrap(), "42\n");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let path = temp_path("corrupt.txt");
        fs::write(&path, "not a number").unwrap();
        let mut store = FileHighScoreStore::new(&path);
        match store.load() {
            Err(StoreError::Parse { value, .. }) => assert_eq!(value, "not a number"),
            other => panic!("expected parse error, got {other:?}"),
        }
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let mut store = MemoryHighScoreStore::default();
        assert_eq!(store.load().unwrap(), 0);
        store.save(5).unwrap();
        store.save(9).unwrap();
        assert_eq!(store.load().unwrap(), 9);
        assert_eq!(store.saves, 2);
    }
}
