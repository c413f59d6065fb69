//! Row and query-result contracts between the data layer and the table core

/// A row the table can display.
///
/// `row_id` must be stable across sorting, filtering and pagination, since
/// row selection is keyed by it. `cell_text` is the plain-text rendition
/// of a cell, used for client-side search, sort and export; columns a row
/// does not have simply return `None`.
pub trait TableRow {
    fn row_id(&self) -> String;

    fn cell_text(&self, column_id: &str) -> Option<String>;

    /// Text used for ordering. Defaults to the cell text; override for
    /// columns whose display form does not sort naturally.
    fn sort_text(&self, column_id: &str) -> Option<String> {
        self.cell_text(column_id)
    }
}

/// The `{data, is_loading}` shape produced by a data-fetching collaborator.
#[derive(Debug, Clone)]
pub struct QueryResult<T> {
    pub rows: Vec<T>,
    pub is_loading: bool,
}

impl<T> Default for QueryResult<T> {
    fn default() -> Self {
        Self::loading()
    }
}

impl<T> QueryResult<T> {
    /// A fetch is in flight and nothing is available yet.
    pub fn loading() -> Self {
        Self {
            rows: Vec::new(),
            is_loading: true,
        }
    }

    /// A fetch settled with these rows.
    pub fn ready(rows: Vec<T>) -> Self {
        Self {
            rows,
            is_loading: false,
        }
    }

    /// No rows and nothing in flight: the basis for the empty-state message.
    /// An empty result and a failed fetch look the same here; error
    /// surfacing belongs to the collaborator.
    pub fn is_settled_and_empty(&self) -> bool {
        !self.is_loading && self.rows.is_empty()
    }
}
