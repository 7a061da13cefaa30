//! Latest-request-wins sequencing for fetches keyed on route parameters.
//!
//! A page that refetches when its `:id` param changes takes a ticket per
//! fetch and only applies the response if the ticket is still current. Older
//! responses are dropped, not cancelled.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Clone, Debug, Default)]
pub struct RequestSequence {
    latest: Arc<AtomicU64>,
}

impl RequestSequence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request; every earlier ticket goes stale.
    #[must_use]
    pub fn begin(&self) -> RequestTicket {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket { id, latest: Arc::clone(&self.latest) }
    }
}

#[derive(Clone, Debug)]
pub struct RequestTicket {
    id: u64,
    latest: Arc<AtomicU64>,
}

impl RequestTicket {
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_is_current() {
        let seq = RequestSequence::new();
        let first = seq.begin();
        assert!(first.is_current());

        let second = seq.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn clones_share_the_counter() {
        let seq = RequestSequence::new();
        let ticket = seq.begin();
        let _ = seq.clone().begin();
        assert!(!ticket.is_current());
    }
}
