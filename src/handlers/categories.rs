//! Category handlers for the quote MCP server

use crate::QuoteServerHandler;
use crate::formatting;
use crate::quotes::CategoryFilter;
use crate::validation;
use mcp_attr::Result as McpResult;

impl QuoteServerHandler {
    /// Lists the categories present in the collection and marks the remembered filter.
    pub async fn handle_list_categories(&self) -> McpResult<String> {
        let categories = self.store.categories();
        let active = self.store.restore_filter();
        Ok(formatting::format_categories(&categories, &active))
    }

    /// Remembers the category filter, then shows a random quote from it.
    pub async fn handle_filter_quotes(&self, category: String) -> McpResult<String> {
        let filter = category.parse::<CategoryFilter>().unwrap_or_default();
        self.store
            .remember_filter(&filter)
            .map_err(validation::to_mcp_error)?;

        let shown = self.store.show(&filter);
        Ok(format!(
            "Filter set to '{}'.\n{}",
            filter,
            formatting::format_shown_quote(shown.as_ref())
        ))
    }

    /// Lists quotes in the given category, or in the remembered filter when none is given.
    pub async fn handle_list_quotes(&self, category: Option<String>) -> McpResult<String> {
        let filter = match category {
            Some(ref name) => name.parse::<CategoryFilter>().unwrap_or_default(),
            None => self.store.restore_filter(),
        };
        let quotes = self.store.snapshot();
        Ok(formatting::format_quote_list(&quotes, &filter))
    }
}
