//! Query-string codec
//!
//! Converts between `TableViewState` and the query-string portion of a view
//! link. Encoding is diff-only: a field equal to its initial value (or
//! empty) contributes no key, so default views produce clean, short links
//! and the address never churns when callers pass equivalent initial states.
//!
//! Decoding is best-effort. A key that is absent leaves its field alone; a
//! value that cannot be read is dropped with a warning. View links are
//! shareable and hand-editable, so a bad value must never take the table
//! down.

use std::collections::BTreeSet;

use url::form_urlencoded;

use crate::state::{PartialTableState, SearchState, SortRule, TableViewState};

/// Query keys understood by the codec.
pub mod keys {
    /// Search term.
    pub const SEARCH_TERM: &str = "st";
    /// Column id the search is restricted to.
    pub const SEARCH_COLUMN: &str = "sc";
    /// Comma-joined hidden column ids.
    pub const COLUMN_VISIBILITY: &str = "cv";
    /// JSON array of sort rules.
    pub const SORT_RULES: &str = "sr";
    /// Page size.
    pub const PAGE_SIZE: &str = "ps";
    /// One-based page number.
    pub const PAGE: &str = "p";
    /// JSON filter payload; shape owned by the caller.
    pub const FILTERS: &str = "f";
}

/// An ordered list of query parameters.
///
/// Order is kept for stable serialization, but comparisons treat parameters
/// as a key/value set: two query strings that differ only in ordering are
/// the same location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse a query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key` to `value`, replacing an existing entry in place so the
    /// parameter keeps its position in the string.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.pairs.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value;
        } else {
            self.pairs.push((key.to_string(), value));
        }
    }

    pub fn delete(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Structural equality as key/value sets, ignoring parameter order.
    pub fn same_entries(&self, other: &QueryParams) -> bool {
        let mut ours = self.pairs.clone();
        let mut theirs = other.pairs.clone();
        ours.sort();
        theirs.sort();
        ours == theirs
    }

    /// Serialize back to `k=v&...` form with percent-encoding.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (k, v) in &self.pairs {
            serializer.append_pair(k, v);
        }
        serializer.finish()
    }
}

/// Read every recognized key out of `params`.
///
/// Absent keys leave the corresponding field `None`; unreadable values are
/// dropped with a warning instead of being carried or propagated.
pub fn decode(params: &QueryParams) -> PartialTableState {
    let mut state = PartialTableState::default();

    let term = params.get(keys::SEARCH_TERM);
    let column = params.get(keys::SEARCH_COLUMN);
    if term.is_some() || column.is_some() {
        state.search_state = Some(SearchState {
            term: term.unwrap_or_default().to_string(),
            column_id: column.map(str::to_string),
        });
    }

    if let Some(joined) = params.get(keys::COLUMN_VISIBILITY) {
        state.hidden_column_ids = Some(
            joined
                .split(',')
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect::<BTreeSet<_>>(),
        );
    }

    if let Some(raw) = params.get(keys::SORT_RULES) {
        match serde_json::from_str::<Vec<SortRule>>(raw) {
            Ok(rules) => state.sort_state = Some(rules),
            Err(err) => tracing::warn!(%err, "ignoring unreadable sort rules in query string"),
        }
    }

    if let Some(size) = parse_count(params, keys::PAGE_SIZE) {
        if size > 0 {
            state.page_size = Some(size);
        } else {
            tracing::warn!("ignoring zero page size in query string");
        }
    }

    // `p` is one-based on the wire; zero is not a page.
    if let Some(page) = parse_count(params, keys::PAGE) {
        match page.checked_sub(1) {
            Some(index) => state.page_index = Some(index),
            None => tracing::warn!("ignoring zero page number in query string"),
        }
    }

    if let Some(raw) = params.get(keys::FILTERS) {
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(value) => state.filter_state = Some(value),
            Err(err) => tracing::warn!(%err, "ignoring unreadable filter payload in query string"),
        }
    }

    state
}

fn parse_count(params: &QueryParams, key: &str) -> Option<usize> {
    let raw = params.get(key)?;
    match raw.parse::<usize>() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!(key, value = raw, "ignoring non-numeric count in query string");
            None
        }
    }
}

/// Apply the delete-or-set rule for every field onto `params`.
///
/// Keys the codec does not own are left untouched, so table state can share
/// a query string with unrelated parameters.
pub fn apply(state: &TableViewState, initial: &TableViewState, params: &mut QueryParams) {
    if state.sort_state == initial.sort_state {
        params.delete(keys::SORT_RULES);
    } else {
        params.set(
            keys::SORT_RULES,
            serde_json::to_string(&state.sort_state).unwrap_or_default(),
        );
    }

    if state.hidden_column_ids == initial.hidden_column_ids {
        params.delete(keys::COLUMN_VISIBILITY);
    } else {
        let joined = state
            .hidden_column_ids
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(",");
        params.set(keys::COLUMN_VISIBILITY, joined);
    }

    if state.pagination_state.page_size == initial.pagination_state.page_size {
        params.delete(keys::PAGE_SIZE);
    } else {
        params.set(keys::PAGE_SIZE, state.pagination_state.page_size.to_string());
    }

    if state.pagination_state.page_index == initial.pagination_state.page_index {
        params.delete(keys::PAGE);
    } else {
        params.set(keys::PAGE, (state.pagination_state.page_index + 1).to_string());
    }

    if state.search_state.is_empty() || state.search_state == initial.search_state {
        params.delete(keys::SEARCH_TERM);
        params.delete(keys::SEARCH_COLUMN);
    } else {
        params.set(keys::SEARCH_TERM, state.search_state.term.clone());
        match &state.search_state.column_id {
            Some(column) => params.set(keys::SEARCH_COLUMN, column.clone()),
            None => params.delete(keys::SEARCH_COLUMN),
        }
    }

    if state.filter_state == initial.filter_state {
        params.delete(keys::FILTERS);
    } else {
        match &state.filter_state {
            Some(value) => params.set(keys::FILTERS, value.to_string()),
            None => params.delete(keys::FILTERS),
        }
    }
}

/// Encode the diff between `state` and `initial` as a fresh set of params.
pub fn encode(state: &TableViewState, initial: &TableViewState) -> QueryParams {
    let mut params = QueryParams::default();
    apply(state, initial, &mut params);
    params
}
