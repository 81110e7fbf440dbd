//! Durable and session-scoped key-value storage
//!
//! `Storage` keeps one file per key inside a data directory and overwrites
//! whole values through a temp file and rename. `SessionStorage` lives in
//! process memory and is gone when the server exits.

use crate::error::Result;
use crate::quotes::QuoteBook;
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Key holding the JSON-encoded quote collection
pub const QUOTES_KEY: &str = "quotes";
/// Key holding the last selected category filter as plain text
pub const LAST_CATEGORY_KEY: &str = "lastCategory";
/// Session key holding the text of the last displayed quote
pub const LAST_QUOTE_KEY: &str = "lastQuote";

pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Read a raw value
    ///
    /// # Returns
    /// `Ok(None)` when the key has never been written
    pub fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite a raw value
    ///
    /// Each write goes to its own temp file in the data directory, which is
    /// then renamed over the old value. Readers never see a truncated file and
    /// concurrent writers to the same key never share a temp file.
    pub fn write(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let mut temp = NamedTempFile::new_in(&self.dir)?;
        temp.write_all(value.as_bytes())?;
        temp.persist(self.key_path(key)).map_err(|e| e.error)?;
        Ok(())
    }

    /// Load the persisted quote collection
    ///
    /// Never fails: a missing, unreadable or malformed value is reported as
    /// `None` so the caller can fall back to the seed list.
    pub fn load_quotes(&self) -> Option<QuoteBook> {
        let content = match self.read(QUOTES_KEY) {
            Ok(Some(content)) => content,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read stored quotes, using defaults: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<QuoteBook>(&content) {
            Ok(quotes) => Some(quotes),
            Err(e) => {
                tracing::warn!("Stored quotes are malformed, using defaults: {}", e);
                None
            }
        }
    }

    pub fn save_quotes(&self, quotes: &QuoteBook) -> Result<()> {
        let content = serde_json::to_string(quotes).map_err(std::io::Error::other)?;
        self.write(QUOTES_KEY, &content)
    }

    /// Load the last selected category filter, if any
    pub fn load_last_category(&self) -> Option<String> {
        match self.read(LAST_CATEGORY_KEY) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                tracing::warn!("Failed to read last category: {}", e);
                None
            }
        }
    }

    pub fn save_last_category(&self, category: &str) -> Result<()> {
        self.write(LAST_CATEGORY_KEY, category)
    }
}

/// Key-value storage scoped to one server process
#[derive(Default)]
pub struct SessionStorage {
    values: Mutex<HashMap<String, String>>,
}

impl SessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    pub fn set(&self, key: &str, value: impl Into<String>) {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::Quote;
    use tempfile::TempDir;

    #[test]
    fn test_missing_keys_read_as_none() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path());

        assert!(storage.read(QUOTES_KEY).unwrap().is_none());
        assert!(storage.load_quotes().is_none());
        assert!(storage.load_last_category().is_none());
    }

    #[test]
    fn test_quotes_roundtrip_through_disk() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path());
        let quotes: QuoteBook = vec![Quote::new("a", "X"), Quote::new("b", "Y")].into();

        storage.save_quotes(&quotes).unwrap();
        assert_eq!(storage.load_quotes(), Some(quotes));
        assert!(dir.path().join(QUOTES_KEY).exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_malformed_quotes_are_treated_as_absent() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path());

        storage.write(QUOTES_KEY, "{not json").unwrap();
        assert!(storage.load_quotes().is_none());

        storage.write(QUOTES_KEY, r#"{"text":"a","category":"X"}"#).unwrap();
        assert!(storage.load_quotes().is_none());
    }

    #[test]
    fn test_stored_empty_array_is_kept() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path());

        storage.write(QUOTES_KEY, "[]").unwrap();
        assert_eq!(storage.load_quotes(), Some(QuoteBook::new()));
    }

    #[test]
    fn test_write_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested").join("data");
        let storage = Storage::new(&nested);

        storage.save_last_category("Science").unwrap();
        assert_eq!(storage.load_last_category().as_deref(), Some("Science"));
    }

    #[test]
    fn test_concurrent_category_writes_do_not_collide() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path());
        let categories = ["Life", "Science", "Motivation", "Ethics"];

        let failures: usize = std::thread::scope(|scope| {
            let workers: Vec<_> = categories
                .iter()
                .map(|category| {
                    let storage = &storage;
                    scope.spawn(move || {
                        (0..200)
                            .filter(|_| storage.save_last_category(category).is_err())
                            .count()
                    })
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).sum()
        });

        assert_eq!(failures, 0);
        let stored = storage.load_last_category().unwrap();
        assert!(categories.contains(&stored.as_str()));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_session_storage() {
        let session = SessionStorage::new();
        assert!(session.get(LAST_QUOTE_KEY).is_none());
        session.set(LAST_QUOTE_KEY, "Be kind");
        assert_eq!(session.get(LAST_QUOTE_KEY).as_deref(), Some("Be kind"));
    }
}
