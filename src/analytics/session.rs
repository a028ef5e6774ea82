//! Latest-request-wins holder for report results.
//!
//! Every refresh takes a [`RequestTicket`] before it starts fetching. When it
//! finishes, its result is stored only if no newer ticket has been issued in the
//! meantime, so a slow response for an old time range cannot overwrite the report
//! for the range the user picked last.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::debug;

/// Identifies one refresh. Higher ids are newer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// Numeric id
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Holds the most recently requested report.
#[derive(Debug)]
pub struct ReportSession<T> {
    issued: AtomicU64,
    current: Mutex<Option<(RequestTicket, T)>>,
}

impl<T> Default for ReportSession<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ReportSession<T> {
    /// Empty session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            current: Mutex::new(None),
        }
    }

    /// Issues a ticket newer than every previous one.
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is still the newest issued.
    #[must_use]
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Stores `value` if `ticket` is still current. Returns whether it was kept.
    pub async fn publish(&self, ticket: RequestTicket, value: T) -> bool {
        let mut current = self.current.lock().await;
        if !self.is_current(ticket) {
            debug!(ticket = ticket.0, "discarding stale report");
            return false;
        }
        *current = Some((ticket, value));
        true
    }

    /// Runs one refresh: takes a ticket, awaits `work`, publishes the result.
    pub async fn refresh<F>(&self, work: F) -> bool
    where
        F: Future<Output = T>,
    {
        let ticket = self.begin();
        let value = work.await;
        self.publish(ticket, value).await
    }
}

impl<T: Clone> ReportSession<T> {
    /// The last accepted value.
    pub async fn latest(&self) -> Option<T> {
        self.current
            .lock()
            .await
            .as_ref()
            .map(|(_, value)| value.clone())
    }
}
