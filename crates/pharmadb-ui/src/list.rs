//! Controller for the saved-pharmacy list page.
//!
//! The displayed records are always either empty or exactly the last
//! successful `list()` response. Mutations are never applied locally; after
//! a delete or register the controller re-reads the store.

use std::sync::{Mutex, MutexGuard, PoisonError};

use pharmadb_client::PharmacyStore;
use pharmadb_core::{NewPharmacy, PharmacyRecord};

use crate::generation::{Generation, Ticket};
use crate::messages;
use crate::prompt::Prompter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    Loaded,
    Error(String),
}

/// Snapshot of the list page for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub phase: ListPhase,
    pub records: Vec<PharmacyRecord>,
}

impl ListView {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            ListPhase::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// How a delete or register request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The user declined the confirmation; nothing was sent.
    Declined,
    Completed,
    Failed,
    /// A newer operation or an unmount made this result irrelevant. Also
    /// returned, with nothing sent, when the page is not mounted.
    Stale,
}

pub struct ListController<S, P> {
    store: S,
    prompter: P,
    state: Mutex<ListView>,
    generation: Generation,
}

impl<S, P> ListController<S, P>
where
    S: PharmacyStore,
    P: Prompter,
{
    pub fn new(store: S, prompter: P) -> Self {
        Self {
            store,
            prompter,
            state: Mutex::new(ListView {
                phase: ListPhase::Idle,
                records: Vec::new(),
            }),
            generation: Generation::new(),
        }
    }

    #[must_use]
    pub fn view(&self) -> ListView {
        self.state().clone()
    }

    /// Mounts the page and loads the list.
    pub async fn mount(&self) {
        self.generation.mount();
        self.refresh().await;
    }

    /// Drops the page; completions still in flight are discarded.
    pub fn unmount(&self) {
        self.generation.unmount();
        let mut state = self.state();
        if state.phase == ListPhase::Loading {
            state.phase = ListPhase::Idle;
        }
    }

    /// Re-reads the full list from the store.
    pub async fn refresh(&self) {
        let ticket = self.begin();
        self.reload(ticket).await;
    }

    /// Deletes `id` after an explicit confirmation, then re-reads the list.
    pub async fn delete(&self, id: i64) -> MutationOutcome {
        if !self.generation.is_mounted() {
            tracing::debug!(id, "delete on unmounted page ignored");
            return MutationOutcome::Stale;
        }
        if !self.prompter.confirm(messages::CONFIRM_DELETE) {
            tracing::debug!(id, "delete declined");
            return MutationOutcome::Declined;
        }

        let ticket = self.begin();
        let result = self.store.delete_by_id(id).await;
        if !self.generation.is_current(ticket) {
            tracing::debug!(id, "discarding stale delete completion");
            return MutationOutcome::Stale;
        }

        match result {
            Ok(()) => {
                tracing::info!(id, "pharmacy deleted");
                self.prompter.notify(messages::DELETED);
                self.reload(ticket).await;
                MutationOutcome::Completed
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "delete failed");
                self.state().phase = ListPhase::Error(messages::DELETE_FAILED.to_owned());
                MutationOutcome::Failed
            }
        }
    }

    /// Stores a new record, then re-reads the list.
    pub async fn register(&self, record: &NewPharmacy) -> MutationOutcome {
        if !self.generation.is_mounted() {
            tracing::debug!(name = %record.name, "register on unmounted page ignored");
            return MutationOutcome::Stale;
        }
        let ticket = self.begin();
        let result = self.store.create(record).await;
        if !self.generation.is_current(ticket) {
            tracing::debug!(name = %record.name, "discarding stale register completion");
            return MutationOutcome::Stale;
        }

        match result {
            Ok(stored) => {
                tracing::info!(id = stored.id, name = %stored.name, "pharmacy registered");
                self.prompter.notify(messages::REGISTERED);
                self.reload(ticket).await;
                MutationOutcome::Completed
            }
            Err(err) => {
                tracing::warn!(name = %record.name, error = %err, "register failed");
                self.state().phase = ListPhase::Error(messages::REGISTER_FAILED.to_owned());
                MutationOutcome::Failed
            }
        }
    }

    fn begin(&self) -> Ticket {
        let ticket = self.generation.advance();
        if self.generation.is_mounted() {
            self.state().phase = ListPhase::Loading;
        }
        ticket
    }

    /// Fetches the list and commits it if `ticket` is still current. On
    /// failure the previously displayed records are kept.
    async fn reload(&self, ticket: Ticket) {
        let result = self.store.list().await;
        if !self.generation.is_current(ticket) {
            tracing::debug!("discarding stale list completion");
            return;
        }

        let mut state = self.state();
        match result {
            Ok(records) => {
                tracing::debug!(count = records.len(), "pharmacy list loaded");
                state.records = records;
                state.phase = ListPhase::Loaded;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load pharmacy list");
                state.phase = ListPhase::Error(messages::LOAD_FAILED.to_owned());
            }
        }
    }

    fn state(&self) -> MutexGuard<'_, ListView> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
