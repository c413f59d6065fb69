//! Client-side query engine
//!
//! For internally-managed tables the whole dataset lives in memory and the
//! view is computed here: opaque filter, then search, then multi-rule sort,
//! then pagination windowing. Externally-managed tables skip this entirely
//! and reflect whatever their collaborator returns.

use td_core::state::TableViewState;

use crate::row::TableRow;

/// Caller-supplied predicate giving meaning to the opaque filter payload.
pub type RowPredicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// One computed page of the view, plus the counts the chrome needs.
#[derive(Debug)]
pub struct ViewRows<'a, T> {
    /// Rows of the current page, in display order.
    pub rows: Vec<&'a T>,
    /// Rows surviving filter and search, before windowing.
    pub filtered_count: usize,
    /// Total pages at the current page size, at least 1.
    pub page_count: usize,
    /// The page actually shown; differs from the requested index only when
    /// that index points past the end.
    pub page_index: usize,
}

/// Lowercase, trim and collapse runs of whitespace, so "De  Santis " and
/// "de santis" compare equal for search and sort.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Compute the visible page for an internally-managed table.
///
/// `search_columns` are the ids a global search runs over; a column-scoped
/// search uses its column directly. The filter predicate runs first so
/// searching never resurrects filtered-out rows.
pub fn apply_view<'a, T: TableRow>(
    rows: &'a [T],
    state: &TableViewState,
    search_columns: &[&str],
    filter: Option<&RowPredicate<T>>,
) -> ViewRows<'a, T> {
    let mut visible: Vec<&T> = match filter {
        Some(predicate) => rows.iter().filter(|row| predicate(row)).collect(),
        None => rows.iter().collect(),
    };

    if !state.search_state.is_empty() {
        let needle = normalize_text(&state.search_state.term);
        visible.retain(|row| match &state.search_state.column_id {
            Some(column) => cell_matches(*row, column, &needle),
            None => search_columns
                .iter()
                .any(|column| cell_matches(*row, column, &needle)),
        });
    }

    if !state.sort_state.is_empty() {
        // Stable sort: rows tied on every rule keep their roster order.
        visible.sort_by(|a, b| {
            for rule in &state.sort_state {
                let left = normalized_sort_text(*a, &rule.id);
                let right = normalized_sort_text(*b, &rule.id);
                let ordering = if rule.desc {
                    right.cmp(&left)
                } else {
                    left.cmp(&right)
                };
                if ordering != std::cmp::Ordering::Equal {
                    return ordering;
                }
            }
            std::cmp::Ordering::Equal
        });
    }

    let filtered_count = visible.len();
    let page_size = state.pagination_state.page_size.max(1);
    let page_count = filtered_count.div_ceil(page_size).max(1);
    // A page index past the end (say, after a filter shrank the set without
    // a reset) clamps to the last page instead of showing nothing.
    let page_index = state.pagination_state.page_index.min(page_count - 1);

    let start = page_index * page_size;
    let rows = visible
        .into_iter()
        .skip(start)
        .take(page_size)
        .collect();

    ViewRows {
        rows,
        filtered_count,
        page_count,
        page_index,
    }
}

fn cell_matches<T: TableRow>(row: &T, column: &str, needle: &str) -> bool {
    row.cell_text(column)
        .map(|text| normalize_text(&text).contains(needle))
        .unwrap_or(false)
}

fn normalized_sort_text<T: TableRow>(row: &T, column: &str) -> String {
    row.sort_text(column)
        .map(|text| normalize_text(&text))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use td_core::state::{PaginationState, SearchState, SortRule};

    struct Fruit {
        id: &'static str,
        name: &'static str,
        color: &'static str,
    }

    impl TableRow for Fruit {
        fn row_id(&self) -> String {
            self.id.to_string()
        }

        fn cell_text(&self, column_id: &str) -> Option<String> {
            match column_id {
                "name" => Some(self.name.to_string()),
                "color" => Some(self.color.to_string()),
                _ => None,
            }
        }
    }

    fn fruits() -> Vec<Fruit> {
        vec![
            Fruit { id: "1", name: "Banana", color: "yellow" },
            Fruit { id: "2", name: "Apple", color: "red" },
            Fruit { id: "3", name: "Cherry", color: "red" },
            Fruit { id: "4", name: "apricot", color: "orange" },
        ]
    }

    const SEARCHABLE: [&str; 2] = ["name", "color"];

    #[test]
    fn default_state_shows_everything_in_roster_order() {
        let rows = fruits();
        let view = apply_view(&rows, &TableViewState::default(), &SEARCHABLE, None);
        assert_eq!(view.filtered_count, 4);
        assert_eq!(view.page_count, 1);
        let names: Vec<_> = view.rows.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Banana", "Apple", "Cherry", "apricot"]);
    }

    #[test]
    fn global_search_is_case_insensitive_across_columns() {
        let rows = fruits();
        let state = TableViewState {
            search_state: SearchState {
                term: "RED".into(),
                column_id: None,
            },
            ..Default::default()
        };
        let view = apply_view(&rows, &state, &SEARCHABLE, None);
        let names: Vec<_> = view.rows.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Apple", "Cherry"]);
    }

    #[test]
    fn column_scoped_search_ignores_other_columns() {
        let rows = fruits();
        let state = TableViewState {
            search_state: SearchState {
                term: "red".into(),
                column_id: Some("name".into()),
            },
            ..Default::default()
        };
        let view = apply_view(&rows, &state, &SEARCHABLE, None);
        assert_eq!(view.filtered_count, 0);
    }

    #[test]
    fn sort_uses_normalized_text_and_direction() {
        let rows = fruits();
        let state = TableViewState {
            sort_state: vec![SortRule::asc("name")],
            ..Default::default()
        };
        let view = apply_view(&rows, &state, &SEARCHABLE, None);
        let names: Vec<_> = view.rows.iter().map(|r| r.name).collect();
        // "apricot" sorts with the capitalized names, not after them.
        assert_eq!(names, vec!["Apple", "apricot", "Banana", "Cherry"]);

        let state = TableViewState {
            sort_state: vec![SortRule::desc("name")],
            ..Default::default()
        };
        let view = apply_view(&rows, &state, &SEARCHABLE, None);
        assert_eq!(view.rows.first().map(|r| r.name), Some("Cherry"));
    }

    #[test]
    fn secondary_rules_break_ties_in_priority_order() {
        let rows = fruits();
        let state = TableViewState {
            sort_state: vec![SortRule::asc("color"), SortRule::asc("name")],
            ..Default::default()
        };
        let view = apply_view(&rows, &state, &SEARCHABLE, None);
        let names: Vec<_> = view.rows.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["apricot", "Apple", "Cherry", "Banana"]);
    }

    #[test]
    fn filter_runs_before_search() {
        let rows = fruits();
        let reds_only: RowPredicate<Fruit> = Box::new(|fruit| fruit.color == "red");
        let state = TableViewState {
            search_state: SearchState {
                term: "a".into(),
                column_id: Some("name".into()),
            },
            ..Default::default()
        };
        let view = apply_view(&rows, &state, &SEARCHABLE, Some(&reds_only));
        let names: Vec<_> = view.rows.iter().map(|r| r.name).collect();
        // Banana and apricot match "a" but were filtered out first.
        assert_eq!(names, vec!["Apple"]);
    }

    #[test]
    fn windowing_clamps_a_page_index_past_the_end() {
        let rows = fruits();
        let state = TableViewState {
            pagination_state: PaginationState {
                page_index: 9,
                page_size: 2,
            },
            ..Default::default()
        };
        let view = apply_view(&rows, &state, &SEARCHABLE, None);
        assert_eq!(view.page_count, 2);
        assert_eq!(view.page_index, 1);
        assert_eq!(view.rows.len(), 2);
    }

    #[test]
    fn an_empty_result_still_reports_one_page() {
        let rows = fruits();
        let state = TableViewState {
            search_state: SearchState {
                term: "zzz".into(),
                column_id: None,
            },
            ..Default::default()
        };
        let view = apply_view(&rows, &state, &SEARCHABLE, None);
        assert_eq!(view.filtered_count, 0);
        assert_eq!(view.page_count, 1);
        assert_eq!(view.page_index, 0);
    }

    #[test]
    fn whitespace_is_collapsed_for_matching() {
        assert_eq!(normalize_text("  De   Santis "), "de santis");
    }
}
