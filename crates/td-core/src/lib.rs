//! Core state management for the talentdesk table console
//!
//! This crate owns the declarative table state controller: the view-state
//! record, the query-string codec, the location synchronization step, the
//! row-selection store and the result-count announcer. Rendering and data
//! fetching are collaborators living in other crates.

pub mod announce;
pub mod codec;
pub mod controller;
pub mod events;
pub mod selection;
pub mod state;
pub mod sync;

// Re-export commonly used types
pub use announce::{CountAnnouncer, ANNOUNCE_DELAY};
pub use controller::{TableController, TableOptions};
pub use selection::RowSelectionStore;
pub use state::{
    FilterState, PaginationState, PartialTableState, SearchState, SortRule, StateChange,
    StateUpdate, TableState, TableStateListener, TableViewState, DEFAULT_PAGE_SIZE, PAGE_SIZES,
};
pub use sync::{Location, MemoryLocation, PaginationMode, SyncController};
