//! Root coordinator for the item list refresh signal
//!
//! The signal is a single slot: writes replace the previous value and there
//! is never more than one outstanding refresh request. It starts raised so
//! the list loads once at startup.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RefreshCoordinator {
    tx: Arc<watch::Sender<bool>>,
    loads: Arc<AtomicU64>,
}

impl Default for RefreshCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(true);
        Self {
            tx: Arc::new(tx),
            loads: Arc::new(AtomicU64::new(0)),
        }
    }

    /// A listing attempt finished; the list needs to be reloaded
    pub fn on_listing_completed(&self) {
        debug!("Listing completed, requesting item list refresh");
        self.request_refresh();
    }

    /// Ask for a reload without a listing, e.g. from a keyboard shortcut
    pub fn request_refresh(&self) {
        self.tx.send_replace(true);
    }

    /// The list finished a fetch attempt
    pub fn on_list_loaded(&self) {
        let load = self.loads.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Item list load #{} settled, clearing refresh request", load);
        self.tx.send_replace(false);
    }

    /// Number of settled list loads reported so far
    pub fn loads_completed(&self) -> u64 {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn needs_refresh(&self) -> bool {
        *self.tx.borrow()
    }

    /// Observe signal changes, e.g. to wake a list view from an async task
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Observer callback that raises the signal, for the listing form
    pub fn completion_callback(&self) -> impl Fn() + Send + Sync + 'static {
        let coordinator = self.clone();
        move || coordinator.on_listing_completed()
    }
}
