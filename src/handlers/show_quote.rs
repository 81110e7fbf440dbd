//! Show quote handlers for the quote MCP server

use crate::QuoteServerHandler;
use crate::formatting;
use crate::quotes::CategoryFilter;
use mcp_attr::Result as McpResult;

impl QuoteServerHandler {
    /// Picks a random quote from the given category, or from the remembered filter when none is given.
    pub async fn handle_show_quote(&self, category: Option<String>) -> McpResult<String> {
        let filter = match category {
            Some(ref name) => name.parse::<CategoryFilter>().unwrap_or_default(),
            None => self.store.restore_filter(),
        };

        let shown = self.store.show(&filter);
        Ok(formatting::format_shown_quote(shown.as_ref()))
    }

    /// Returns the text of the last quote shown during this session.
    pub async fn handle_last_quote(&self) -> McpResult<String> {
        Ok(match self.store.last_shown() {
            Some(text) => format!("Last shown quote: \"{}\"", text),
            None => "No quote has been shown in this session yet.".to_string(),
        })
    }
}
