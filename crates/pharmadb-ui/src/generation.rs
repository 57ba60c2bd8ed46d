//! Stale-completion guard for controller operations.
//!
//! Starting an operation advances the generation and hands out a [`Ticket`].
//! When the awaited call finishes, the controller commits its result only if
//! the ticket is still current and the controller is still mounted. A newer
//! operation or an unmount silently turns older completions into no-ops.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct Generation {
    current: AtomicU64,
    mounted: AtomicBool,
}

impl Generation {
    /// A fresh, unmounted generation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: AtomicU64::new(0),
            mounted: AtomicBool::new(false),
        }
    }

    pub fn mount(&self) {
        self.mounted.store(true, Ordering::SeqCst);
    }

    /// Marks the owner as gone and invalidates every outstanding ticket.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
        self.current.fetch_add(1, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Starts a new operation, superseding any in flight.
    pub fn advance(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Ticket for work that belongs to the current operation without
    /// superseding it.
    #[must_use]
    pub fn current(&self) -> Ticket {
        Ticket(self.current.load(Ordering::SeqCst))
    }

    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.is_mounted() && self.current.load(Ordering::SeqCst) == ticket.0
    }
}

impl Default for Generation {
    fn default() -> Self {
        Self::new()
    }
}
