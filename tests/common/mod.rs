//! Common test utilities for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use quotebook_mcp::error::{QuoteError, Result};
use quotebook_mcp::storage::QUOTES_KEY;
use quotebook_mcp::{Quote, QuoteServerHandler, QuoteStore, RemoteSource, Storage, SyncReconciler};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::sync::Notify;

/// Build quotes from (text, category) pairs
pub fn quotes(pairs: &[(&str, &str)]) -> Vec<Quote> {
    pairs
        .iter()
        .map(|(text, category)| Quote::new(*text, *category))
        .collect()
}

/// Open a store in a fresh temporary directory holding exactly `initial`
pub fn open_store(initial: &[(&str, &str)]) -> (Arc<QuoteStore>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let storage = Storage::new(temp_dir.path());
    let document = serde_json::to_string(&quotes(initial)).unwrap();
    storage.write(QUOTES_KEY, &document).unwrap();
    (Arc::new(QuoteStore::open(storage)), temp_dir)
}

/// In-memory remote source with switchable failures
#[derive(Default)]
pub struct MockRemote {
    quotes: Mutex<Vec<Quote>>,
    pub fail_fetch: AtomicBool,
    pub fail_push: AtomicBool,
    pub fetch_count: AtomicUsize,
    pushes: Mutex<Vec<Vec<Quote>>>,
    /// When set, fetch signals `entered` and waits for `release`
    gate: Option<(Notify, Notify)>,
}

impl MockRemote {
    pub fn new(remote: &[(&str, &str)]) -> Self {
        Self {
            quotes: Mutex::new(quotes(remote)),
            ..Default::default()
        }
    }

    /// A remote whose fetch blocks until `release_fetch` is called
    pub fn gated(remote: &[(&str, &str)]) -> Self {
        Self {
            quotes: Mutex::new(quotes(remote)),
            gate: Some((Notify::new(), Notify::new())),
            ..Default::default()
        }
    }

    pub async fn wait_fetch_entered(&self) {
        if let Some((entered, _)) = &self.gate {
            entered.notified().await;
        }
    }

    pub fn release_fetch(&self) {
        if let Some((_, release)) = &self.gate {
            release.notify_one();
        }
    }

    pub fn set_quotes(&self, remote: &[(&str, &str)]) {
        *self.quotes.lock().unwrap() = quotes(remote);
    }

    pub fn pushes(&self) -> Vec<Vec<Quote>> {
        self.pushes.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteSource for MockRemote {
    async fn fetch_quotes(&self) -> Result<Vec<Quote>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        if let Some((entered, release)) = &self.gate {
            entered.notify_one();
            release.notified().await;
        }
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(QuoteError::Remote("connection refused".to_string()));
        }
        Ok(self.quotes.lock().unwrap().clone())
    }

    async fn push_quotes(&self, quotes: &[Quote]) -> Result<()> {
        if self.fail_push.load(Ordering::SeqCst) {
            return Err(QuoteError::Remote("connection refused".to_string()));
        }
        self.pushes.lock().unwrap().push(quotes.to_vec());
        Ok(())
    }
}

/// Reconciler over a fresh store and the given mock remote
pub fn reconciler(
    initial: &[(&str, &str)],
    remote: Arc<MockRemote>,
) -> (Arc<SyncReconciler>, Arc<QuoteStore>, TempDir) {
    let (store, temp_dir) = open_store(initial);
    let sync = Arc::new(SyncReconciler::new(Arc::clone(&store), remote));
    (sync, store, temp_dir)
}

/// Handler over a fresh store, with sync against `remote` when given
pub fn get_test_handler(
    initial: &[(&str, &str)],
    remote: Option<Arc<MockRemote>>,
) -> (QuoteServerHandler, TempDir) {
    let (store, temp_dir) = open_store(initial);
    let sync = remote.map(|r| Arc::new(SyncReconciler::new(Arc::clone(&store), r)));
    (QuoteServerHandler::new(store, sync), temp_dir)
}
