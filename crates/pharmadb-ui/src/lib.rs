//! Page controllers for the pharmacy records app.
//!
//! Each controller owns its own view state and talks to the remote store
//! through [`pharmadb_client::PharmacyStore`]. The two controllers never
//! share state; they stay consistent only by re-reading the store.

pub mod generation;
pub mod list;
pub mod map;
pub mod messages;
pub mod prompt;
pub mod search;

pub use generation::{Generation, Ticket};
pub use list::{ListController, ListPhase, ListView, MutationOutcome};
pub use map::{MapError, MapService, Marker, RenderedMap, TextMap};
pub use prompt::Prompter;
pub use search::{
    SaveOutcome, SaveStatus, SearchController, SearchEntry, SearchOutcome, SearchPhase, SearchView,
};
