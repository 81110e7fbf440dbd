//! Sync Reconciler: keeps the local collection in step with a remote source
//!
//! A cycle pulls the remote list, appends every remote quote that has no
//! identical local record, then pushes the local collection back. Remote
//! quotes only ever add; nothing local is replaced or removed.
//!
//! Cycles never overlap. A cycle requested while another is still running
//! (timer tick or manual trigger) is skipped.

use crate::error::Result;
use crate::quotes::Quote;
use crate::remote::RemoteSource;
use crate::store::QuoteStore;
use chrono::{DateTime, Local};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Result of one completed sync cycle
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    /// Quotes appended locally by the pull
    pub inserted: Vec<Quote>,
    /// Why the pull half failed, if it did
    pub pull_error: Option<String>,
    /// Number of quotes sent by the push, if it succeeded
    pub pushed: Option<usize>,
    /// Why the push half failed, if it did
    pub push_error: Option<String>,
}

impl SyncReport {
    /// Whether the pull changed the local collection
    pub fn updated(&self) -> bool {
        !self.inserted.is_empty()
    }
}

/// What happened when a cycle was requested
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    Completed(SyncReport),
    /// Another cycle was in flight
    Skipped,
}

/// Clears the in-flight flag when a cycle ends, including by panic or cancellation
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct SyncReconciler {
    store: Arc<QuoteStore>,
    remote: Arc<dyn RemoteSource>,
    in_flight: AtomicBool,
    last_report: Mutex<Option<SyncReport>>,
}

impl SyncReconciler {
    pub fn new(store: Arc<QuoteStore>, remote: Arc<dyn RemoteSource>) -> Self {
        Self {
            store,
            remote,
            in_flight: AtomicBool::new(false),
            last_report: Mutex::new(None),
        }
    }

    /// Whether a cycle is currently running
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Report of the most recent completed cycle
    pub fn last_report(&self) -> Option<SyncReport> {
        self.last_report
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Fetch the remote list and append what is missing locally
    ///
    /// # Returns
    /// The quotes that were appended (empty when already in sync)
    pub async fn pull_remote(&self) -> Result<Vec<Quote>> {
        let remote = self.remote.fetch_quotes().await?;
        let fetched = remote.len();
        let inserted = self.store.merge_remote(remote)?;
        tracing::debug!(
            "Pulled {} remote quote(s), {} new",
            fetched,
            inserted.len()
        );
        Ok(inserted)
    }

    /// Send the whole local collection to the remote sink
    ///
    /// # Returns
    /// The number of quotes sent
    pub async fn push_local(&self) -> Result<usize> {
        let quotes = self.store.snapshot().into_vec();
        self.remote.push_quotes(&quotes).await?;
        Ok(quotes.len())
    }

    /// Send one newly added quote; failures are logged and otherwise ignored
    pub async fn push_quote(&self, quote: Quote) {
        if let Err(e) = self.remote.push_quote(&quote).await {
            tracing::warn!("Error posting quote to server: {}", e);
        }
    }

    /// Push `quote` on a detached task without waiting for the result
    pub fn spawn_push_quote(self: &Arc<Self>, quote: Quote) -> JoinHandle<()> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.push_quote(quote).await })
    }

    /// Run one pull-then-push cycle unless another is already running
    ///
    /// A failed pull is logged and skipped; the push is still attempted.
    /// Neither half is retried within the cycle.
    pub async fn sync_cycle(&self) -> CycleOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Sync cycle already in flight, skipping");
            return CycleOutcome::Skipped;
        }
        let _guard = InFlightGuard(&self.in_flight);

        let started_at = Local::now();

        let (inserted, pull_error) = match self.pull_remote().await {
            Ok(inserted) => (inserted, None),
            Err(e) => {
                tracing::warn!("Error fetching quotes from server: {}", e);
                (Vec::new(), Some(e.to_string()))
            }
        };

        let (pushed, push_error) = match self.push_local().await {
            Ok(count) => (Some(count), None),
            Err(e) => {
                tracing::warn!("Error posting quotes to server: {}", e);
                (None, Some(e.to_string()))
            }
        };

        if !inserted.is_empty() {
            tracing::info!("Quotes updated from server: {} new", inserted.len());
        }

        let report = SyncReport {
            started_at,
            finished_at: Local::now(),
            inserted,
            pull_error,
            pushed,
            push_error,
        };
        *self.last_report.lock().unwrap_or_else(|e| e.into_inner()) = Some(report.clone());

        CycleOutcome::Completed(report)
    }

    /// Run `sync_cycle` every `interval`, starting immediately
    ///
    /// Ticks that fall due while a cycle is still running are skipped rather
    /// than queued.
    pub fn spawn_periodic(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                this.sync_cycle().await;
            }
        })
    }
}
