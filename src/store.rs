//! Quote Store: the canonical in-memory collection and its persistence
//!
//! Every mutation holds the collection lock until the new state has been
//! written to durable storage. If the write fails the mutation is undone, so
//! nobody ever observes a collection that is not also on disk.

use crate::error::Result;
use crate::quotes::{self, CategoryFilter, Quote, QuoteBook};
use crate::storage::{LAST_QUOTE_KEY, SessionStorage, Storage};
use crate::validation;
use std::sync::{Mutex, MutexGuard};

pub struct QuoteStore {
    quotes: Mutex<QuoteBook>,
    storage: Storage,
    session: SessionStorage,
}

impl QuoteStore {
    /// Open the store, loading the persisted collection
    ///
    /// Falls back to the built-in seed list when nothing is stored or the
    /// stored value cannot be parsed. Never fails.
    pub fn open(storage: Storage) -> Self {
        let book = match storage.load_quotes() {
            Some(book) => {
                tracing::info!(
                    "Loaded {} quote(s) from {}",
                    book.len(),
                    storage.dir().display()
                );
                book
            }
            None => {
                tracing::info!("No stored quotes found, starting from the seed list");
                QuoteBook::from(quotes::seed_quotes())
            }
        };

        Self {
            quotes: Mutex::new(book),
            storage,
            session: SessionStorage::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QuoteBook> {
        // A panic while holding the lock cannot leave the Vec half-written
        self.quotes.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Apply `mutate` and persist, undoing the mutation if persisting fails
    fn mutate_and_persist<T>(&self, mutate: impl FnOnce(&mut QuoteBook) -> T) -> Result<T> {
        let mut book = self.lock();
        let before = book.len();
        let outcome = mutate(&mut *book);

        if book.len() != before
            && let Err(e) = self.storage.save_quotes(&book)
        {
            book.truncate(before);
            tracing::warn!("Failed to persist quotes, change rolled back: {}", e);
            return Err(e);
        }

        Ok(outcome)
    }

    /// Validate and append a single quote
    ///
    /// # Returns
    /// The quote as stored (trimmed), or a validation/storage error with the
    /// collection left unchanged
    pub fn add(&self, text: &str, category: &str) -> Result<Quote> {
        let quote = validation::validate_new_quote(text, category)?;
        let stored = quote.clone();
        self.mutate_and_persist(move |book| book.push(quote))?;
        Ok(stored)
    }

    /// Append a batch of already shape-checked quotes, persisting once
    ///
    /// # Returns
    /// The number of quotes appended
    pub fn bulk_add(&self, batch: Vec<Quote>) -> Result<usize> {
        self.mutate_and_persist(|book| book.extend(batch))
    }

    /// Append the remote quotes that have no identical local record
    ///
    /// # Returns
    /// The quotes that were appended
    pub fn merge_remote(&self, remote: Vec<Quote>) -> Result<Vec<Quote>> {
        self.mutate_and_persist(|book| book.merge_missing(remote))
    }

    /// Write the current collection to durable storage
    pub fn persist(&self) -> Result<()> {
        let book = self.lock();
        self.storage.save_quotes(&book)
    }

    /// Copy of the current collection
    pub fn snapshot(&self) -> QuoteBook {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// `"all"` followed by the distinct categories in first-seen order
    pub fn categories(&self) -> Vec<String> {
        quotes::categories(&self.lock())
    }

    /// The remembered category filter
    ///
    /// Falls back to `all` when nothing is remembered or when the remembered
    /// category no longer exists in the collection.
    pub fn restore_filter(&self) -> CategoryFilter {
        let Some(stored) = self.storage.load_last_category() else {
            return CategoryFilter::All;
        };

        match stored.parse::<CategoryFilter>().unwrap_or_default() {
            CategoryFilter::Category(name) if !self.has_category(&name) => {
                tracing::debug!("Remembered category '{}' no longer exists", name);
                CategoryFilter::All
            }
            filter => filter,
        }
    }

    fn has_category(&self, name: &str) -> bool {
        self.lock().iter().any(|q| q.category == name)
    }

    /// Remember `filter` as the sticky category selection
    pub fn remember_filter(&self, filter: &CategoryFilter) -> Result<()> {
        self.storage.save_last_category(filter.as_str())
    }

    /// Pick a random quote matching `filter` and record it as last shown
    ///
    /// # Returns
    /// `None` when no quote matches
    pub fn show(&self, filter: &CategoryFilter) -> Option<Quote> {
        let picked = {
            let book = self.lock();
            quotes::pick(&book, filter, &mut rand::thread_rng()).cloned()
        };

        if let Some(ref quote) = picked {
            self.session.set(LAST_QUOTE_KEY, quote.text.clone());
        }
        picked
    }

    /// Text of the last quote shown in this session
    pub fn last_shown(&self) -> Option<String> {
        self.session.get(LAST_QUOTE_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuoteError;
    use crate::storage::QUOTES_KEY;
    use tempfile::TempDir;

    fn open_empty(dir: &TempDir) -> QuoteStore {
        let storage = Storage::new(dir.path());
        storage.write(QUOTES_KEY, "[]").unwrap();
        QuoteStore::open(storage)
    }

    #[test]
    fn test_open_without_data_uses_seed() {
        let dir = TempDir::new().unwrap();
        let store = QuoteStore::open(Storage::new(dir.path()));
        assert_eq!(store.snapshot().into_vec(), quotes::seed_quotes());
    }

    #[test]
    fn test_open_with_corrupt_data_uses_seed() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path());
        storage.write(QUOTES_KEY, "definitely not json").unwrap();

        let store = QuoteStore::open(storage);
        assert_eq!(store.len(), quotes::seed_quotes().len());
    }

    #[test]
    fn test_add_persists_immediately() {
        let dir = TempDir::new().unwrap();
        let store = open_empty(&dir);

        let stored = store.add("  Be kind ", " Ethics ").unwrap();
        assert_eq!(stored, Quote::new("Be kind", "Ethics"));

        let reopened = QuoteStore::open(Storage::new(dir.path()));
        assert_eq!(reopened.snapshot().into_vec(), vec![stored]);
    }

    #[test]
    fn test_add_blank_leaves_collection_unchanged() {
        let dir = TempDir::new().unwrap();
        let store = open_empty(&dir);
        store.add("a", "X").unwrap();

        let result = store.add("   ", "X");
        assert!(matches!(result, Err(QuoteError::Validation(_))));
        let result = store.add("b", "");
        assert!(matches!(result, Err(QuoteError::Validation(_))));

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_failed_persist_rolls_back() {
        let dir = TempDir::new().unwrap();
        // Point storage at a path occupied by a regular file so writes fail
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let store = QuoteStore::open(Storage::new(&blocker));
        let before = store.snapshot();

        let result = store.add("Be kind", "Ethics");
        assert!(matches!(result, Err(QuoteError::Storage(_))));
        assert_eq!(store.snapshot(), before);

        let result = store.bulk_add(vec![Quote::new("a", "X")]);
        assert!(result.is_err());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_restore_filter_defaults() {
        let dir = TempDir::new().unwrap();
        let store = open_empty(&dir);
        store.add("E = mc^2", "Science").unwrap();

        assert_eq!(store.restore_filter(), CategoryFilter::All);

        let science = CategoryFilter::Category("Science".to_string());
        store.remember_filter(&science).unwrap();
        assert_eq!(store.restore_filter(), science);
    }

    #[test]
    fn test_restore_filter_missing_category_falls_back_to_all() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path());
        storage.save_last_category("Science").unwrap();

        let store = QuoteStore::open(storage);
        assert_eq!(store.restore_filter(), CategoryFilter::All);
    }

    #[test]
    fn test_show_records_last_shown() {
        let dir = TempDir::new().unwrap();
        let store = open_empty(&dir);
        assert!(store.show(&CategoryFilter::All).is_none());
        assert!(store.last_shown().is_none());

        store.add("Be kind", "Ethics").unwrap();
        let shown = store.show(&CategoryFilter::All).unwrap();
        assert_eq!(store.last_shown(), Some(shown.text));
    }
}
