//! Quotebook MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for a
//! categorized quote collection. Quotes are stored on disk, shown at random
//! (optionally restricted to one category), exported and imported as JSON,
//! and periodically reconciled with a remote quote source.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `QuoteServerHandler` - Wires MCP tools to store and sync operations
//! - **Domain Layer**: `quotes`, `store`, `transfer`, `sync` - Collection, selection, import/export, reconciliation
//! - **Persistence Layer**: `storage` - File-based key-value storage, `remote` - HTTP quote source
//!
//! # Example
//!
//! ```no_run
//! use quotebook_mcp::{Config, QuoteServerHandler};
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut handler = QuoteServerHandler::open("quote-data", &Config::default())?;
//!     handler.start_sync();
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod formatting;
pub mod handlers;
pub mod logging;
pub mod quotes;
pub mod remote;
pub mod storage;
pub mod store;
pub mod sync;
pub mod transfer;
pub mod validation;

use anyhow::{Context, Result};
use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

// Re-export commonly used types
pub use config::Config;
pub use error::QuoteError;
pub use quotes::{CategoryFilter, Quote, QuoteBook};
pub use remote::{HttpRemote, RemoteSource};
pub use storage::Storage;
pub use store::QuoteStore;
pub use sync::{CycleOutcome, SyncReconciler, SyncReport};

/// MCP Server handler for the quote collection
///
/// Holds the quote store and, when sync is enabled, the reconciler that
/// shares it. All changes are persisted to the data directory before a tool
/// call returns.
pub struct QuoteServerHandler {
    pub(crate) store: Arc<QuoteStore>,
    pub(crate) sync: Option<Arc<SyncReconciler>>,
    sync_interval: Duration,
    sync_task: Option<JoinHandle<()>>,
}

impl QuoteServerHandler {
    /// Create a handler from an already opened store and optional reconciler
    ///
    /// The periodic sync task is not started; call `start_sync` for that.
    pub fn new(store: Arc<QuoteStore>, sync: Option<Arc<SyncReconciler>>) -> Self {
        Self {
            store,
            sync,
            sync_interval: Duration::from_secs(config::DEFAULT_SYNC_INTERVAL_SECS),
            sync_task: None,
        }
    }

    /// Open the data directory and build the HTTP reconciler if sync is enabled
    ///
    /// # Arguments
    /// * `data_dir` - Directory holding the durable `quotes` and `lastCategory` keys
    /// * `config` - Server configuration
    ///
    /// # Returns
    /// Result containing the handler or an error
    ///
    /// # Example
    /// ```no_run
    /// # use quotebook_mcp::{Config, QuoteServerHandler};
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let handler = QuoteServerHandler::open("quote-data", &Config::default())?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(data_dir: impl AsRef<Path>, config: &Config) -> Result<Self> {
        config.validate()?;

        let store = Arc::new(QuoteStore::open(Storage::new(data_dir)));

        let sync = if config.sync.enabled {
            let remote = HttpRemote::new(&config.sync).context("Failed to set up remote quote source")?;
            tracing::info!("Sync enabled against {}", remote.endpoint());
            Some(Arc::new(SyncReconciler::new(Arc::clone(&store), Arc::new(remote))))
        } else {
            tracing::info!("Sync disabled");
            None
        };

        let mut handler = Self::new(store, sync);
        handler.sync_interval = config.sync.interval();
        Ok(handler)
    }

    /// Start the periodic sync task, if sync is enabled and not yet running
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_sync(&mut self) {
        if self.sync_task.is_some() {
            return;
        }
        if let Some(ref sync) = self.sync {
            self.sync_task = Some(sync.spawn_periodic(self.sync_interval));
        }
    }

    pub fn store(&self) -> &Arc<QuoteStore> {
        &self.store
    }

    pub fn reconciler(&self) -> Option<&Arc<SyncReconciler>> {
        self.sync.as_ref()
    }
}

impl Drop for QuoteServerHandler {
    fn drop(&mut self) {
        if let Some(task) = self.sync_task.take() {
            task.abort();
        }
    }
}

/// Quote collection server: stores categorized quotes and shows them at random.
///
/// Every quote is a text plus a free-text category. A category filter narrows
/// random selection; "all" means no filter. The last chosen filter is
/// remembered across restarts. Quotes can be exported to and imported from
/// JSON, and are periodically merged with a remote quote source (new remote
/// quotes are added, nothing local is ever replaced or removed).
#[mcp_server]
impl McpServer for QuoteServerHandler {
    /// **Show**: Display a random quote. Uses the remembered category filter unless a category is given.
    #[tool]
    async fn show_quote(
        &self,
        /// Category to pick from, "all" for any (optional, default: remembered filter)
        category: Option<String>,
    ) -> McpResult<String> {
        self.handle_show_quote(category).await
    }

    /// **Add**: Store a new quote. Text and category must both be non-empty.
    #[tool]
    async fn add_quote(
        &self,
        /// Quote text
        text: String,
        /// Category (e.g., "Motivation", "Life")
        category: String,
    ) -> McpResult<String> {
        self.handle_add_quote(text, category).await
    }

    /// **List**: List stored quotes, optionally restricted to one category.
    #[tool]
    async fn list_quotes(
        &self,
        /// Category filter, "all" for every quote (optional, default: remembered filter)
        category: Option<String>,
    ) -> McpResult<String> {
        self.handle_list_quotes(category).await
    }

    /// **Categories**: List all categories. The remembered filter is marked with '*'.
    #[tool]
    async fn list_categories(&self) -> McpResult<String> {
        self.handle_list_categories().await
    }

    /// **Filter**: Set and remember the category filter, then show a random quote from it.
    #[tool]
    async fn filter_quotes(
        &self,
        /// Category name, or "all" to clear the filter
        category: String,
    ) -> McpResult<String> {
        self.handle_filter_quotes(category).await
    }

    /// **Last**: Show the text of the last quote displayed in this session.
    #[tool]
    async fn last_quote(&self) -> McpResult<String> {
        self.handle_last_quote().await
    }

    /// **Export**: Export every quote as a JSON array of {text, category} objects.
    #[tool]
    async fn export_quotes(
        &self,
        /// File to write, e.g. "quotes.json" (optional, default: return the document)
        path: Option<String>,
    ) -> McpResult<String> {
        self.handle_export_quotes(path).await
    }

    /// **Import**: Append quotes from a JSON array of {text, category} objects.
    #[tool]
    async fn import_quotes(
        &self,
        /// JSON file to read (optional, give this or document)
        path: Option<String>,
        /// Inline JSON document (optional, give this or path)
        document: Option<String>,
    ) -> McpResult<String> {
        self.handle_import_quotes(path, document).await
    }

    /// **Sync**: Merge new quotes from the remote source now, then push local quotes.
    #[tool]
    async fn sync_quotes(&self) -> McpResult<String> {
        self.handle_sync_quotes().await
    }
}
