//! Controller for the address search page.
//!
//! Search results are transient: they live only in this controller and are
//! replaced by the next search. Saving a single result has its own
//! per-result status, so one failed save does not discard the result list.

use std::sync::{Mutex, MutexGuard, PoisonError};

use pharmadb_client::PharmacyStore;
use pharmadb_core::{Coordinate, PharmacyRecord, SearchResult, DEFAULT_MAP_LEVEL};

use crate::generation::{Generation, Ticket};
use crate::map::{MapService, Marker};
use crate::messages;
use crate::prompt::Prompter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Searching,
    Results,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Idle,
    Saving,
    Saved { id: i64 },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchEntry {
    pub result: SearchResult,
    pub save: SaveStatus,
}

/// Snapshot of the search page for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub phase: SearchPhase,
    pub entries: Vec<SearchEntry>,
    /// Current map center, independent of the markers.
    pub focal: Coordinate,
}

impl SearchView {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Searching
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            SearchPhase::Error(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn results(&self) -> Vec<&SearchResult> {
        self.entries.iter().map(|e| &e.result).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(usize),
    Empty,
    Failed,
    /// Superseded by a newer search, or the page was not mounted.
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(PharmacyRecord),
    Failed,
    /// No result at that index, or a save for it is already in flight.
    Ignored,
    Stale,
}

pub struct SearchController<S, M: MapService, P> {
    store: S,
    maps: M,
    prompter: P,
    state: Mutex<SearchView>,
    map: Mutex<Option<M::Map>>,
    generation: Generation,
}

impl<S, M, P> SearchController<S, M, P>
where
    S: PharmacyStore,
    M: MapService,
    P: Prompter,
{
    pub fn new(store: S, maps: M, prompter: P) -> Self {
        Self {
            store,
            maps,
            prompter,
            state: Mutex::new(SearchView {
                phase: SearchPhase::Idle,
                entries: Vec::new(),
                focal: Coordinate::default(),
            }),
            map: Mutex::new(None),
            generation: Generation::new(),
        }
    }

    #[must_use]
    pub fn view(&self) -> SearchView {
        self.state().clone()
    }

    /// The most recently drawn map, if any.
    #[must_use]
    pub fn map(&self) -> Option<M::Map>
    where
        M::Map: Clone,
    {
        self.map.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Mounts the page and draws the map at the current focal point.
    pub fn mount(&self) {
        self.generation.mount();
        let view = self.view();
        self.render(view.focal, &view.entries);
    }

    /// Drops the page; a search or save still in flight is discarded.
    pub fn unmount(&self) {
        self.generation.unmount();
        let mut state = self.state();
        if state.phase == SearchPhase::Searching {
            state.phase = SearchPhase::Idle;
        }
    }

    /// Asks the store to find and persist the pharmacies near `address`.
    ///
    /// Clears any prior error, results and markers first. On a non-empty
    /// answer the focal point moves to the first result; on an empty one it
    /// stays put. Nothing is sent while the page is not mounted.
    pub async fn search(&self, address: &str) -> SearchOutcome {
        if !self.generation.is_mounted() {
            tracing::debug!(address, "search on unmounted page ignored");
            return SearchOutcome::Stale;
        }

        let address = address.trim();
        let ticket = self.begin();
        if address.is_empty() {
            self.state().phase = SearchPhase::Error(messages::EMPTY_ADDRESS.to_owned());
            return SearchOutcome::Failed;
        }

        let result = self.store.search_and_persist(address).await;
        if !self.generation.is_current(ticket) {
            tracing::debug!(address, "discarding stale search completion");
            return SearchOutcome::Stale;
        }

        match result {
            Ok(results) => self.commit_results(address, results),
            Err(err) => {
                tracing::warn!(address, error = %err, "search failed");
                self.state().phase = SearchPhase::Error(messages::SEARCH_FAILED.to_owned());
                SearchOutcome::Failed
            }
        }
    }

    /// Persists the result at `index` as an individual record.
    ///
    /// Runs under the current search generation: if a new search starts
    /// before the store answers, the outcome is dropped.
    pub async fn save_one(&self, index: usize) -> SaveOutcome {
        let ticket = self.generation.current();
        if !self.generation.is_current(ticket) {
            return SaveOutcome::Stale;
        }

        let result = {
            let mut state = self.state();
            let Some(entry) = state.entries.get_mut(index) else {
                return SaveOutcome::Ignored;
            };
            if entry.save == SaveStatus::Saving {
                return SaveOutcome::Ignored;
            }
            entry.save = SaveStatus::Saving;
            entry.result.clone()
        };

        let record = match result.to_new_pharmacy() {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(
                    name = %result.name,
                    error = %err,
                    "search result cannot be saved"
                );
                self.set_save_status(
                    ticket,
                    index,
                    SaveStatus::Failed(messages::save_failed(&result.name)),
                );
                return SaveOutcome::Failed;
            }
        };

        let created = self.store.create(&record).await;
        if !self.generation.is_current(ticket) {
            tracing::debug!(name = %record.name, "discarding stale save completion");
            return SaveOutcome::Stale;
        }

        match created {
            Ok(stored) => {
                tracing::info!(id = stored.id, name = %stored.name, "search result saved");
                self.set_save_status(ticket, index, SaveStatus::Saved { id: stored.id });
                self.prompter.notify(&messages::saved(&stored.name));
                SaveOutcome::Saved(stored)
            }
            Err(err) => {
                tracing::warn!(name = %record.name, error = %err, "save failed");
                self.set_save_status(
                    ticket,
                    index,
                    SaveStatus::Failed(messages::save_failed(&result.name)),
                );
                SaveOutcome::Failed
            }
        }
    }

    /// Geocodes `address` through the map capability and recenters the map
    /// there without touching the results.
    pub async fn locate(&self, address: &str) -> Option<Coordinate> {
        let ticket = self.generation.current();
        let position = match self.maps.geocode(address).await {
            Ok(Some(position)) => position,
            Ok(None) => {
                tracing::info!(address, "address not found by geocoder");
                return None;
            }
            Err(err) => {
                tracing::warn!(address, error = %err, "geocoding failed");
                return None;
            }
        };
        if !self.generation.is_current(ticket) {
            return None;
        }

        let entries = {
            let mut state = self.state();
            state.focal = position;
            state.entries.clone()
        };
        self.render(position, &entries);
        Some(position)
    }

    fn begin(&self) -> Ticket {
        let ticket = self.generation.advance();
        if self.generation.is_mounted() {
            let focal = {
                let mut state = self.state();
                state.entries.clear();
                state.phase = SearchPhase::Searching;
                state.focal
            };
            self.render(focal, &[]);
        }
        ticket
    }

    fn commit_results(&self, address: &str, results: Vec<SearchResult>) -> SearchOutcome {
        let count = results.len();
        let (focal, entries) = {
            let mut state = self.state();
            if let Some(first) = results.first() {
                match first.coordinate() {
                    Some(position) => state.focal = position,
                    None => tracing::warn!(
                        name = %first.name,
                        "first result has no coordinates; focal point unchanged"
                    ),
                }
            }
            state.entries = results
                .into_iter()
                .map(|result| SearchEntry {
                    result,
                    save: SaveStatus::Idle,
                })
                .collect();
            state.phase = SearchPhase::Results;
            (state.focal, state.entries.clone())
        };

        self.render(focal, &entries);

        if count == 0 {
            tracing::info!(address, "no pharmacies found");
            self.prompter.notify(&messages::search_empty(address));
            SearchOutcome::Empty
        } else {
            tracing::info!(address, count, "pharmacies found and persisted");
            self.prompter.notify(&messages::search_found(address, count));
            SearchOutcome::Found(count)
        }
    }

    fn set_save_status(&self, ticket: Ticket, index: usize, status: SaveStatus) {
        if !self.generation.is_current(ticket) {
            return;
        }
        if let Some(entry) = self.state().entries.get_mut(index) {
            entry.save = status;
        }
    }

    fn render(&self, focal: Coordinate, entries: &[SearchEntry]) {
        let mut map = self.maps.create_map(focal, DEFAULT_MAP_LEVEL);
        for entry in entries {
            if let Some(position) = entry.result.coordinate() {
                self.maps.create_marker(
                    &mut map,
                    Marker {
                        position,
                        title: entry.result.name.clone(),
                    },
                );
            }
        }
        *self.map.lock().unwrap_or_else(PoisonError::into_inner) = Some(map);
    }

    fn state(&self) -> MutexGuard<'_, SearchView> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
