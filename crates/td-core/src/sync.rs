//! Location synchronization
//!
//! The navigable location (the address bar in a browser deployment, an
//! in-memory slot in the desktop console) is a single shared resource. Every
//! write to it funnels through one compare-then-replace step, so state
//! changes landing in the same frame produce at most one replacement and an
//! unchanged state produces none.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::codec::{self, QueryParams};
use crate::state::{PaginationState, SortRule, TableViewState};

/// The navigable location the view state is mirrored into.
pub trait Location: Send + Sync {
    /// Current query string, without the leading `?`.
    fn query(&self) -> String;

    /// Replace the query string in place, without growing history.
    fn replace_query(&self, query: &str);
}

/// In-memory location used by the desktop console and tests.
#[derive(Default)]
pub struct MemoryLocation {
    query: RwLock<String>,
    replaces: AtomicUsize,
}

impl MemoryLocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing query string, as when a view link is opened.
    pub fn with_query(query: &str) -> Self {
        Self {
            query: RwLock::new(query.strip_prefix('?').unwrap_or(query).to_string()),
            replaces: AtomicUsize::new(0),
        }
    }

    /// How many times the query has been replaced.
    pub fn replace_count(&self) -> usize {
        self.replaces.load(Ordering::Relaxed)
    }
}

impl Location for MemoryLocation {
    fn query(&self) -> String {
        self.query.read().clone()
    }

    fn replace_query(&self, query: &str) {
        *self.query.write() = query.to_string();
        self.replaces.fetch_add(1, Ordering::Relaxed);
    }
}

/// How pagination is resolved for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode {
    /// The table computes page windows client-side.
    Internal,
    /// A collaborator owns windowing; `page` is its one-based page number.
    External { page: usize, page_size: usize },
}

impl PaginationMode {
    pub fn is_internal(&self) -> bool {
        matches!(self, PaginationMode::Internal)
    }
}

/// Callback invoked with the resolved sort state whenever it changes.
pub type SortChangeFn = Box<dyn Fn(&[SortRule]) + Send + Sync>;

/// Mirrors table state into a `Location`.
///
/// `run` is idempotent: calling it twice with the same state performs no
/// second write. The sort-change notification is decoupled from location
/// sync and fires even when sync is disabled.
pub struct SyncController {
    location: Arc<dyn Location>,
    initial: TableViewState,
    url_sync: bool,
    last_sort: Mutex<Vec<SortRule>>,
    on_sort_change: Option<SortChangeFn>,
}

impl SyncController {
    pub fn new(location: Arc<dyn Location>, initial: TableViewState, url_sync: bool) -> Self {
        let last_sort = Mutex::new(initial.sort_state.clone());
        Self {
            location,
            initial,
            url_sync,
            last_sort,
            on_sort_change: None,
        }
    }

    /// Register the sort-change callback.
    pub fn on_sort_change(mut self, callback: impl Fn(&[SortRule]) + Send + Sync + 'static) -> Self {
        self.on_sort_change = Some(Box::new(callback));
        self
    }

    /// Reconcile the location with the current state.
    pub fn run(&self, state: &TableViewState, pagination: PaginationMode) {
        self.notify_sort(&state.sort_state);

        if !self.url_sync {
            return;
        }

        let effective = effective_state(state, pagination);
        let current = QueryParams::parse(&self.location.query());
        let mut next = current.clone();
        codec::apply(&effective, &self.initial, &mut next);

        if !current.same_entries(&next) {
            let query = next.to_query_string();
            tracing::debug!(%query, "replacing location query");
            self.location.replace_query(&query);
        }
    }

    fn notify_sort(&self, sort: &[SortRule]) {
        let changed = {
            let mut last = self.last_sort.lock();
            if last.as_slice() == sort {
                false
            } else {
                *last = sort.to_vec();
                true
            }
        };
        if changed {
            if let Some(callback) = &self.on_sort_change {
                callback(sort);
            }
        }
    }
}

/// Substitute externally-managed pagination into the snapshot.
///
/// External page numbers are one-based; the comparison uses `page - 1`
/// clamped to zero.
fn effective_state(state: &TableViewState, pagination: PaginationMode) -> TableViewState {
    match pagination {
        PaginationMode::Internal => state.clone(),
        PaginationMode::External { page, page_size } => {
            let mut state = state.clone();
            state.pagination_state = PaginationState {
                page_index: page.saturating_sub(1),
                page_size,
            };
            state
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SearchState;
    use std::sync::atomic::AtomicBool;

    fn searched(term: &str) -> TableViewState {
        TableViewState {
            search_state: SearchState {
                term: term.into(),
                column_id: None,
            },
            ..Default::default()
        }
    }

    #[test]
    fn running_twice_with_unchanged_state_writes_once() {
        let location = Arc::new(MemoryLocation::new());
        let sync = SyncController::new(location.clone(), TableViewState::default(), true);

        let state = searched("Sa");
        sync.run(&state, PaginationMode::Internal);
        sync.run(&state, PaginationMode::Internal);

        assert_eq!(location.query(), "st=Sa");
        assert_eq!(location.replace_count(), 1);
    }

    #[test]
    fn default_state_clears_table_keys() {
        let location = Arc::new(MemoryLocation::with_query("st=Sa&tab=candidates"));
        let sync = SyncController::new(location.clone(), TableViewState::default(), true);

        sync.run(&TableViewState::default(), PaginationMode::Internal);

        // The table's own key goes away; foreign keys survive.
        assert_eq!(location.query(), "tab=candidates");
    }

    #[test]
    fn disabled_sync_never_touches_the_location() {
        let location = Arc::new(MemoryLocation::new());
        let sync = SyncController::new(location.clone(), TableViewState::default(), false);

        sync.run(&searched("Sa"), PaginationMode::Internal);
        assert_eq!(location.query(), "");
        assert_eq!(location.replace_count(), 0);
    }

    #[test]
    fn external_pages_are_one_based_and_clamped() {
        let location = Arc::new(MemoryLocation::new());
        let sync = SyncController::new(location.clone(), TableViewState::default(), true);

        let state = TableViewState::default();
        sync.run(
            &state,
            PaginationMode::External {
                page: 3,
                page_size: 10,
            },
        );
        assert_eq!(location.query(), "p=3");

        // Page zero from a confused collaborator clamps to the first page,
        // which is the default and therefore absent.
        sync.run(
            &state,
            PaginationMode::External {
                page: 0,
                page_size: 10,
            },
        );
        assert_eq!(location.query(), "");
    }

    #[test]
    fn sort_callback_fires_on_change_even_without_url_sync() {
        let fired = Arc::new(AtomicBool::new(false));
        let observed = fired.clone();
        let location = Arc::new(MemoryLocation::new());
        let sync = SyncController::new(location, TableViewState::default(), false)
            .on_sort_change(move |sort| {
                assert_eq!(sort.len(), 1);
                observed.store(true, Ordering::Relaxed);
            });

        // Unchanged sort: no callback.
        sync.run(&TableViewState::default(), PaginationMode::Internal);
        assert!(!fired.load(Ordering::Relaxed));

        let mut sorted = TableViewState::default();
        sorted.sort_state = vec![SortRule::asc("name")];
        sync.run(&sorted, PaginationMode::Internal);
        assert!(fired.load(Ordering::Relaxed));
    }

    #[test]
    fn end_to_end_search_then_page_size_then_clear() {
        // Mirrors a user session: search, grow the page, clear the search.
        let location = Arc::new(MemoryLocation::new());
        let initial = TableViewState::default();
        let sync = SyncController::new(location.clone(), initial.clone(), true);

        let mut state = initial;
        state.search_state.term = "Sa".into();
        sync.run(&state, PaginationMode::Internal);
        assert_eq!(location.query(), "st=Sa");

        state.pagination_state.page_size = 20;
        sync.run(&state, PaginationMode::Internal);
        let params = QueryParams::parse(&location.query());
        assert_eq!(params.get("st"), Some("Sa"));
        assert_eq!(params.get("ps"), Some("20"));

        state.search_state.term.clear();
        sync.run(&state, PaginationMode::Internal);
        assert_eq!(location.query(), "ps=20");
    }
}
