//! Add quote handler for the quote MCP server

use crate::QuoteServerHandler;
use crate::validation;
use mcp_attr::Result as McpResult;

impl QuoteServerHandler {
    /// Validates, stores and persists a new quote, then pushes it to the remote sink in the background.
    pub async fn handle_add_quote(&self, text: String, category: String) -> McpResult<String> {
        let quote = self
            .store
            .add(&text, &category)
            .map_err(validation::to_mcp_error)?;

        if let Some(ref sync) = self.sync {
            sync.spawn_push_quote(quote.clone());
        }

        Ok(format!(
            "Quote added: \"{}\" (category: {}). Collection now holds {} quote(s).",
            quote.text,
            quote.category,
            self.store.len()
        ))
    }
}
