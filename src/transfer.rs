//! JSON export and import of the whole quote collection
//!
//! The export document is a JSON array of `{text, category}` objects with
//! two-space indentation. Import accepts the same shape; extra fields on each
//! object are ignored, but every element must be an object carrying string
//! `text` and `category` fields or the whole document is rejected.

use crate::error::{QuoteError, Result};
use crate::quotes::{Quote, QuoteBook};
use crate::store::QuoteStore;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Default file name for exported documents
pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// Render the whole collection as a JSON document
pub fn export_document(quotes: &QuoteBook) -> Result<String> {
    serde_json::to_string_pretty(quotes)
        .map_err(|e| QuoteError::Format(format!("Failed to encode quotes: {}", e)))
}

/// Parse an import document into quotes, without touching any store
///
/// # Returns
/// The quotes in document order, or `QuoteError::Format` describing the first
/// problem found
pub fn parse_document(document: &str) -> Result<Vec<Quote>> {
    let value: Value = serde_json::from_str(document)
        .map_err(|e| QuoteError::Format(format!("Invalid JSON file: {}", e)))?;

    let Value::Array(items) = value else {
        return Err(QuoteError::Format(
            "Expected a JSON array of quotes at the top level".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(QuoteError::Format(format!(
                    "Element {} is not an object",
                    index
                )));
            }
            serde_json::from_value::<Quote>(item).map_err(|e| {
                QuoteError::Format(format!(
                    "Element {} is not a quote with string text and category: {}",
                    index, e
                ))
            })
        })
        .collect()
}

/// Append every quote in `document` to the store
///
/// # Returns
/// The number of quotes imported. Nothing is appended when parsing fails.
pub fn import_document(store: &QuoteStore, document: &str) -> Result<usize> {
    let batch = parse_document(document)?;
    let count = store.bulk_add(batch)?;
    tracing::info!("Imported {} quote(s)", count);
    Ok(count)
}

/// Where an export to `path` lands: `path` itself, or `quotes.json` inside it
/// when `path` is an existing directory
pub fn export_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(EXPORT_FILE_NAME)
    } else {
        path.to_path_buf()
    }
}

/// Write the export document for the store's collection to `path`
///
/// # Returns
/// The number of quotes written
pub fn export_to_file(store: &QuoteStore, path: &Path) -> Result<usize> {
    let path = &export_path(path);
    let quotes = store.snapshot();
    let document = export_document(&quotes)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, document)?;
    tracing::info!("Exported {} quote(s) to {}", quotes.len(), path.display());
    Ok(quotes.len())
}

/// Read `path` and import it into the store
///
/// A missing or unreadable file is the caller's input problem and is
/// reported as `QuoteError::Format`.
pub fn import_from_file(store: &QuoteStore, path: &Path) -> Result<usize> {
    let document = fs::read_to_string(path).map_err(|e| {
        QuoteError::Format(format!("Cannot read import file {}: {}", path.display(), e))
    })?;
    import_document(store, &document)
}
