//! The controlled-state store
//!
//! Five independent cells (search, filters, hidden columns, sort,
//! pagination), each updated through the same value-or-updater contract.
//! Cells are independent: setting the sort never clamps pagination. The
//! page-reset-on-filter-change policy is a separate listener wired up by the
//! table controller.

use std::collections::BTreeSet;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use super::{FilterState, PaginationState, SearchState, SortRule, TableViewState};

/// A state transition: either a replacement value or a function of the
/// previous value.
///
/// Updater functions are applied to the latest value under the store's lock,
/// so chained updates never observe a stale snapshot.
pub enum StateUpdate<T> {
    Set(T),
    With(Box<dyn FnOnce(&T) -> T + Send>),
}

impl<T> StateUpdate<T> {
    /// Update from a function of the previous value.
    pub fn with<F>(f: F) -> Self
    where
        F: FnOnce(&T) -> T + Send + 'static,
    {
        StateUpdate::With(Box::new(f))
    }

    fn resolve(self, previous: &T) -> T {
        match self {
            StateUpdate::Set(value) => value,
            StateUpdate::With(f) => f(previous),
        }
    }
}

/// Which cell was updated, carrying the resolved new value.
#[derive(Debug, Clone)]
pub enum StateChange {
    Search(SearchState),
    Filters(FilterState),
    HiddenColumns(BTreeSet<String>),
    Sort(Vec<SortRule>),
    Pagination(PaginationState),
}

/// Listener invoked after a cell update with the resolved new value and a
/// fresh snapshot of the whole state.
pub trait TableStateListener: Send + Sync {
    fn on_state_change(&self, change: &StateChange, state: &TableViewState);
}

/// Owns the five state cells for one table instance.
pub struct TableState {
    search: RwLock<SearchState>,
    filters: RwLock<FilterState>,
    hidden_columns: RwLock<BTreeSet<String>>,
    sort: RwLock<Vec<SortRule>>,
    pagination: RwLock<PaginationState>,
    listeners: RwLock<Vec<Weak<dyn TableStateListener>>>,
}

impl TableState {
    /// Create a store seeded with an initial state.
    pub fn new(initial: TableViewState) -> Self {
        Self {
            search: RwLock::new(initial.search_state),
            filters: RwLock::new(initial.filter_state),
            hidden_columns: RwLock::new(initial.hidden_column_ids),
            sort: RwLock::new(initial.sort_state),
            pagination: RwLock::new(initial.pagination_state),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Snapshot every cell into one record.
    pub fn snapshot(&self) -> TableViewState {
        TableViewState {
            hidden_column_ids: self.hidden_columns.read().clone(),
            sort_state: self.sort.read().clone(),
            pagination_state: *self.pagination.read(),
            search_state: self.search.read().clone(),
            filter_state: self.filters.read().clone(),
        }
    }

    pub fn search(&self) -> SearchState {
        self.search.read().clone()
    }

    pub fn filters(&self) -> FilterState {
        self.filters.read().clone()
    }

    pub fn hidden_columns(&self) -> BTreeSet<String> {
        self.hidden_columns.read().clone()
    }

    pub fn sort(&self) -> Vec<SortRule> {
        self.sort.read().clone()
    }

    pub fn pagination(&self) -> PaginationState {
        *self.pagination.read()
    }

    pub fn is_column_hidden(&self, column_id: &str) -> bool {
        self.hidden_columns.read().contains(column_id)
    }

    pub fn update_search(&self, update: StateUpdate<SearchState>) {
        let resolved = {
            let mut cell = self.search.write();
            let next = update.resolve(&cell);
            *cell = next.clone();
            next
        };
        self.notify(StateChange::Search(resolved));
    }

    pub fn update_filters(&self, update: StateUpdate<FilterState>) {
        let resolved = {
            let mut cell = self.filters.write();
            let next = update.resolve(&cell);
            *cell = next.clone();
            next
        };
        self.notify(StateChange::Filters(resolved));
    }

    pub fn update_hidden_columns(&self, update: StateUpdate<BTreeSet<String>>) {
        let resolved = {
            let mut cell = self.hidden_columns.write();
            let next = update.resolve(&cell);
            *cell = next.clone();
            next
        };
        self.notify(StateChange::HiddenColumns(resolved));
    }

    pub fn update_sort(&self, update: StateUpdate<Vec<SortRule>>) {
        let resolved = {
            let mut cell = self.sort.write();
            let next = update.resolve(&cell);
            *cell = next.clone();
            next
        };
        self.notify(StateChange::Sort(resolved));
    }

    pub fn update_pagination(&self, update: StateUpdate<PaginationState>) {
        let resolved = {
            let mut cell = self.pagination.write();
            let next = update.resolve(&cell);
            *cell = next;
            next
        };
        self.notify(StateChange::Pagination(resolved));
    }

    /// Register a listener. The store keeps a weak reference; dropping the
    /// listener unregisters it.
    pub fn add_listener(&self, listener: Arc<dyn TableStateListener>) {
        self.listeners.write().push(Arc::downgrade(&listener));
    }

    fn notify(&self, change: StateChange) {
        let snapshot = self.snapshot();

        // Dispatch outside the listener lock so a listener may itself update
        // a cell (the page-reset effect does exactly that).
        let listeners: Vec<_> = {
            let mut listeners = self.listeners.write();
            listeners.retain(|weak| weak.strong_count() > 0);
            listeners.clone()
        };

        for weak in listeners {
            if let Some(listener) = weak.upgrade() {
                listener.on_state_change(&change, &snapshot);
            }
        }
    }
}
