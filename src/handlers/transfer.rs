//! Export and import handlers for the quote MCP server

use crate::QuoteServerHandler;
use crate::transfer;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};
use std::path::Path;

impl QuoteServerHandler {
    /// Writes the whole collection as a JSON document to `path`, or returns the document when no path is given.
    pub async fn handle_export_quotes(&self, path: Option<String>) -> McpResult<String> {
        match path {
            Some(path) => {
                let target = transfer::export_path(Path::new(&path));
                let count = transfer::export_to_file(&self.store, &target)
                    .map_err(validation::to_mcp_error)?;
                Ok(format!("Exported {} quote(s) to {}", count, target.display()))
            }
            None => {
                let quotes = self.store.snapshot();
                transfer::export_document(&quotes).map_err(validation::to_mcp_error)
            }
        }
    }

    /// Appends every quote from a JSON file or an inline JSON document.
    pub async fn handle_import_quotes(
        &self,
        path: Option<String>,
        document: Option<String>,
    ) -> McpResult<String> {
        let count = match (path, document) {
            (Some(path), None) => transfer::import_from_file(&self.store, Path::new(&path)),
            (None, Some(document)) => transfer::import_document(&self.store, &document),
            (Some(_), Some(_)) => {
                bail_public!(_, "Provide either path or document, not both");
            }
            (None, None) => {
                bail_public!(_, "Provide a path to a JSON file or an inline JSON document");
            }
        }
        .map_err(validation::to_mcp_error)?;

        Ok(format!(
            "Quotes imported successfully! {} quote(s) added, collection now holds {}.",
            count,
            self.store.len()
        ))
    }
}
