//! Sync handler for the quote MCP server

use crate::QuoteServerHandler;
use crate::formatting;
use crate::sync::CycleOutcome;
use mcp_attr::{Result as McpResult, bail_public};

impl QuoteServerHandler {
    /// Runs one sync cycle now; skipped if a cycle is already running.
    pub async fn handle_sync_quotes(&self) -> McpResult<String> {
        let Some(ref sync) = self.sync else {
            bail_public!(_, "Sync is disabled for this server");
        };

        Ok(match sync.sync_cycle().await {
            CycleOutcome::Completed(report) => formatting::format_sync_report(&report),
            CycleOutcome::Skipped => {
                "A sync cycle is already in progress; this request was skipped.".to_string()
            }
        })
    }
}
