use crate::quotes::quote::Quote;
use serde::{Deserialize, Serialize};

/// Ordered collection of quotes
///
/// Insertion order is preserved and duplicate values are allowed. Only
/// `merge_missing` suppresses duplicates; manual adds and imports never do.
///
/// Serialized as a bare JSON array of `{text, category}` objects, which is
/// both the persisted form and the export document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteBook {
    quotes: Vec<Quote>,
}

impl QuoteBook {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Quote> {
        self.quotes.iter()
    }

    pub fn as_slice(&self) -> &[Quote] {
        &self.quotes
    }

    /// Check whether an identical record (same text and same category) exists
    pub fn contains(&self, quote: &Quote) -> bool {
        self.quotes.iter().any(|q| q == quote)
    }

    /// Append a quote at the end of the collection
    pub fn push(&mut self, quote: Quote) {
        self.quotes.push(quote);
    }

    /// Append every quote in order, returning how many were appended
    pub fn extend(&mut self, quotes: impl IntoIterator<Item = Quote>) -> usize {
        let before = self.quotes.len();
        self.quotes.extend(quotes);
        self.quotes.len() - before
    }

    /// Append the remote quotes that have no identical local record
    ///
    /// Additive only: local records are never replaced or removed. Records
    /// repeated inside `remote` are appended once, because each check runs
    /// against the collection as it grows.
    ///
    /// # Returns
    /// The quotes that were appended, in the order they were appended
    pub fn merge_missing(&mut self, remote: impl IntoIterator<Item = Quote>) -> Vec<Quote> {
        let mut inserted = Vec::new();
        for quote in remote {
            if !self.contains(&quote) {
                self.quotes.push(quote.clone());
                inserted.push(quote);
            }
        }
        inserted
    }

    /// Drop everything past `len`; used to undo an append whose write failed
    pub(crate) fn truncate(&mut self, len: usize) {
        self.quotes.truncate(len);
    }

    pub fn into_vec(self) -> Vec<Quote> {
        self.quotes
    }
}

impl From<Vec<Quote>> for QuoteBook {
    fn from(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }
}

impl<'a> IntoIterator for &'a QuoteBook {
    type Item = &'a Quote;
    type IntoIter = std::slice::Iter<'a, Quote>;

    fn into_iter(self) -> Self::IntoIter {
        self.quotes.iter()
    }
}
