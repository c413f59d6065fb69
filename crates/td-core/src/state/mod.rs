//! Table view state types
//!
//! One `TableViewState` records everything about how a single table instance
//! is currently displayed: search, sort, filters, pagination and column
//! visibility. Row selection is kept in its own store (see the `selection`
//! module) because it is keyed by row id rather than derived from the view.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

mod store;
pub use store::{StateChange, StateUpdate, TableState, TableStateListener};

/// Page size used when the caller supplies none.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered by the pagination bar.
pub const PAGE_SIZES: [usize; 5] = [10, 20, 50, 100, 500];

/// A single sort rule; `desc` false means ascending.
///
/// The order of rules in a sort state is the sort priority. The serialized
/// form (`{"id": ..., "desc": ...}`) is part of the view-link format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRule {
    pub id: String,
    #[serde(default)]
    pub desc: bool,
}

impl SortRule {
    /// Ascending rule for a column.
    pub fn asc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: false,
        }
    }

    /// Descending rule for a column.
    pub fn desc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: true,
        }
    }
}

/// Pagination window.
///
/// `page_index` is zero-based internally; anything user-facing (the
/// pagination bar, the `p` query key, external collaborators) is one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationState {
    /// The first page, keeping the current page size.
    pub fn first_page(&self) -> Self {
        Self {
            page_index: 0,
            page_size: self.page_size,
        }
    }
}

/// Search box state.
///
/// A missing `column_id` means the term applies to every searchable column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchState {
    pub term: String,
    pub column_id: Option<String>,
}

impl SearchState {
    /// An empty term means the search is inactive, whatever the column.
    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }
}

/// Opaque filter payload.
///
/// The core never inspects the shape; only equality with the initial payload
/// matters. `None` means no filters are applied.
pub type FilterState = Option<serde_json::Value>;

/// The composite view state for one table instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableViewState {
    pub hidden_column_ids: BTreeSet<String>,
    pub sort_state: Vec<SortRule>,
    pub pagination_state: PaginationState,
    pub search_state: SearchState,
    pub filter_state: FilterState,
}

/// Fields recovered from a query string.
///
/// `None` means the key was absent (or unreadable) and the caller's initial
/// value should stand. Page size and page number decode independently, so
/// they are separate fields here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialTableState {
    pub hidden_column_ids: Option<BTreeSet<String>>,
    pub sort_state: Option<Vec<SortRule>>,
    pub page_index: Option<usize>,
    pub page_size: Option<usize>,
    pub search_state: Option<SearchState>,
    pub filter_state: Option<serde_json::Value>,
}

impl TableViewState {
    /// Overlay query-string fields on top of an initial state.
    ///
    /// Query values win per field when present; everything else keeps the
    /// caller's initial value.
    pub fn overlaid_with(mut self, overlay: PartialTableState) -> Self {
        if let Some(hidden) = overlay.hidden_column_ids {
            self.hidden_column_ids = hidden;
        }
        if let Some(sort) = overlay.sort_state {
            self.sort_state = sort;
        }
        if let Some(page_index) = overlay.page_index {
            self.pagination_state.page_index = page_index;
        }
        if let Some(page_size) = overlay.page_size {
            self.pagination_state.page_size = page_size;
        }
        if let Some(search) = overlay.search_state {
            self.search_state = search;
        }
        if let Some(filters) = overlay.filter_state {
            self.filter_state = Some(filters);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_prefers_query_values_per_field() {
        let initial = TableViewState {
            hidden_column_ids: BTreeSet::from(["notes".to_string()]),
            sort_state: vec![SortRule::desc("submitted_at")],
            ..Default::default()
        };

        let overlay = PartialTableState {
            page_size: Some(50),
            search_state: Some(SearchState {
                term: "Sam".into(),
                column_id: None,
            }),
            ..Default::default()
        };

        let merged = initial.clone().overlaid_with(overlay);
        assert_eq!(merged.pagination_state.page_size, 50);
        assert_eq!(merged.search_state.term, "Sam");
        // Untouched fields keep the caller's initial values.
        assert_eq!(merged.hidden_column_ids, initial.hidden_column_ids);
        assert_eq!(merged.sort_state, initial.sort_state);
    }

    #[test]
    fn overlay_of_empty_partial_is_identity() {
        let initial = TableViewState {
            sort_state: vec![SortRule::asc("name")],
            ..Default::default()
        };
        let merged = initial.clone().overlaid_with(PartialTableState::default());
        assert_eq!(merged, initial);
    }
}
