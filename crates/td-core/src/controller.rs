//! Table controller
//!
//! Wires one table instance together: seeds the store from the caller's
//! initial state overlaid with whatever the location's query string says,
//! registers the page-reset effect, and drives the synchronization step.

use std::sync::{Arc, Weak};

use crate::codec::{self, QueryParams};
use crate::selection::RowSelectionStore;
use crate::state::{
    PaginationState, StateChange, StateUpdate, TableState, TableStateListener, TableViewState,
};
use crate::sync::{Location, PaginationMode, SortChangeFn, SyncController};

/// Per-table behavior switches.
pub struct TableOptions {
    /// Mirror state into the location's query string.
    pub url_sync: bool,
    /// Whether the table computes page windows client-side. External
    /// pagination is reflected via [`TableController::maintain_external`].
    pub internal_pagination: bool,
    /// Invoked with the resolved sort state whenever it changes.
    pub on_sort_change: Option<SortChangeFn>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            url_sync: true,
            internal_pagination: true,
            on_sort_change: None,
        }
    }
}

/// Everything one mounted table needs: the five-cell store, the selection
/// store and the location synchronization.
pub struct TableController {
    state: Arc<TableState>,
    selection: Arc<RowSelectionStore>,
    sync: SyncController,
    internal_pagination: bool,
    // Effects are registered with the store by weak reference; the strong
    // references live here for the lifetime of the mount.
    _effects: Vec<Arc<dyn TableStateListener>>,
}

impl TableController {
    /// Mount a table.
    ///
    /// The store is seeded by overlaying query-string fields onto `initial`
    /// (query wins per field). The same `initial` stays the reference point
    /// for diff-only encoding for the whole mount.
    pub fn mount(
        initial: TableViewState,
        location: Arc<dyn Location>,
        options: TableOptions,
    ) -> Self {
        let decoded = codec::decode(&QueryParams::parse(&location.query()));
        let state = Arc::new(TableState::new(initial.clone().overlaid_with(decoded)));

        let mut effects: Vec<Arc<dyn TableStateListener>> = Vec::new();
        if options.internal_pagination {
            let reset = Arc::new(PageResetOnFilterChange {
                state: Arc::downgrade(&state),
            });
            state.add_listener(reset.clone());
            effects.push(reset);
        }

        let mut sync = SyncController::new(location, initial, options.url_sync);
        if let Some(callback) = options.on_sort_change {
            sync = sync.on_sort_change(callback);
        }

        Self {
            state,
            selection: Arc::new(RowSelectionStore::new()),
            sync,
            internal_pagination: options.internal_pagination,
            _effects: effects,
        }
    }

    pub fn state(&self) -> &Arc<TableState> {
        &self.state
    }

    pub fn selection(&self) -> &Arc<RowSelectionStore> {
        &self.selection
    }

    pub fn internal_pagination(&self) -> bool {
        self.internal_pagination
    }

    /// Run the synchronization step against the current snapshot. Call once
    /// per frame after input handling; compare-then-replace makes repeat
    /// calls free.
    pub fn maintain(&self) {
        self.sync
            .run(&self.state.snapshot(), PaginationMode::Internal);
    }

    /// Synchronization step for externally-managed pagination. `page` is the
    /// collaborator's one-based page number.
    pub fn maintain_external(&self, page: usize, page_size: usize) {
        self.sync
            .run(&self.state.snapshot(), PaginationMode::External { page, page_size });
    }
}

/// Resets to the first page whenever the filter payload changes.
///
/// Registered only for internally-paginated tables; a collaborator that owns
/// pagination is expected to own this policy too. Reacts to the change
/// event itself, not to a value comparison against past payloads.
struct PageResetOnFilterChange {
    state: Weak<TableState>,
}

impl TableStateListener for PageResetOnFilterChange {
    fn on_state_change(&self, change: &StateChange, _state: &TableViewState) {
        if matches!(change, StateChange::Filters(_)) {
            if let Some(state) = self.state.upgrade() {
                state.update_pagination(StateUpdate::with(|p: &PaginationState| p.first_page()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SearchState, SortRule};
    use crate::sync::MemoryLocation;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn mount(location: Arc<MemoryLocation>) -> TableController {
        TableController::mount(
            TableViewState::default(),
            location,
            TableOptions::default(),
        )
    }

    #[test]
    fn mount_overlays_query_state_onto_initial() {
        let location = Arc::new(MemoryLocation::with_query("st=Sam&ps=50&cv=notes"));
        let controller = mount(location);

        let state = controller.state().snapshot();
        assert_eq!(state.search_state.term, "Sam");
        assert_eq!(state.pagination_state.page_size, 50);
        assert_eq!(
            state.hidden_column_ids,
            BTreeSet::from(["notes".to_string()])
        );
    }

    #[test]
    fn filter_change_resets_internal_pagination() {
        let location = Arc::new(MemoryLocation::new());
        let controller = mount(location);
        let state = controller.state();

        state.update_pagination(StateUpdate::Set(PaginationState {
            page_index: 4,
            page_size: 10,
        }));

        state.update_filters(StateUpdate::Set(Some(json!({"pool": "IT"}))));
        assert_eq!(state.pagination().page_index, 0);

        // Changing back to an earlier payload is still a change event.
        state.update_pagination(StateUpdate::Set(PaginationState {
            page_index: 2,
            page_size: 10,
        }));
        state.update_filters(StateUpdate::Set(None));
        assert_eq!(state.pagination().page_index, 0);
    }

    #[test]
    fn external_pagination_owns_the_reset_policy() {
        let location = Arc::new(MemoryLocation::new());
        let controller = TableController::mount(
            TableViewState::default(),
            location,
            TableOptions {
                internal_pagination: false,
                ..Default::default()
            },
        );
        let state = controller.state();

        state.update_pagination(StateUpdate::Set(PaginationState {
            page_index: 4,
            page_size: 10,
        }));
        state.update_filters(StateUpdate::Set(Some(json!({"pool": "IT"}))));

        // No automatic reset: the collaborator decides.
        assert_eq!(state.pagination().page_index, 4);
    }

    #[test]
    fn maintain_mirrors_state_into_the_location() {
        let location = Arc::new(MemoryLocation::new());
        let controller = mount(location.clone());

        controller.state().update_search(StateUpdate::Set(SearchState {
            term: "Sa".into(),
            column_id: None,
        }));
        controller.maintain();
        controller.maintain();

        assert_eq!(location.query(), "st=Sa");
        assert_eq!(location.replace_count(), 1);
    }

    #[test]
    fn selection_survives_sort_changes() {
        let location = Arc::new(MemoryLocation::new());
        let controller = mount(location);

        controller.selection().toggle("42");
        controller
            .state()
            .update_sort(StateUpdate::Set(vec![SortRule::desc("name")]));
        controller.maintain();

        assert!(controller.selection().is_selected("42"));
    }
}
