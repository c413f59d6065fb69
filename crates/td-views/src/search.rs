//! Search form
//!
//! A debounced text input plus a "search by" column dropdown. Keystrokes
//! land in a local buffer; the search cell only updates after ~300 ms of
//! quiescence, so the engine and the view link are not churned on every
//! character. Changing the search column applies immediately.

use std::time::{Duration, Instant};

use td_core::state::{SearchState, StateUpdate, TableState};

use crate::column::ColumnDef;

const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Persistent state of the search form; keep one per mounted table.
pub struct SearchForm {
    buffer: String,
    column_id: Option<String>,
    pending_since: Option<Instant>,
    debounce: Duration,
    initialized: bool,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchForm {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            column_id: None,
            pending_since: None,
            debounce: SEARCH_DEBOUNCE,
            initialized: false,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Render the form and flush any quiesced edit into the search cell.
    pub fn show(&mut self, ui: &mut egui::Ui, state: &TableState, columns: &[ColumnDef]) {
        if !self.initialized {
            // The store may have been seeded from a view link.
            let seeded = state.search();
            self.buffer = seeded.term;
            self.column_id = seeded.column_id;
            self.initialized = true;
        }

        ui.horizontal(|ui| {
            let selected_label = self
                .column_id
                .as_ref()
                .and_then(|id| columns.iter().find(|c| &c.id == id))
                .map(|c| c.header.clone())
                .unwrap_or_else(|| "Anything".to_string());

            let mut column_changed = false;
            egui::ComboBox::from_id_source("search_column")
                .selected_text(selected_label)
                .show_ui(ui, |ui| {
                    if ui
                        .selectable_label(self.column_id.is_none(), "Anything")
                        .clicked()
                    {
                        self.column_id = None;
                        column_changed = true;
                    }
                    for column in columns.iter().filter(|c| c.searchable) {
                        let selected = self.column_id.as_deref() == Some(column.id.as_str());
                        if ui.selectable_label(selected, &column.header).clicked() {
                            self.column_id = Some(column.id.clone());
                            column_changed = true;
                        }
                    }
                });

            let response = ui.add(
                egui::TextEdit::singleline(&mut self.buffer)
                    .hint_text("Search")
                    .desired_width(220.0),
            );
            if response.changed() {
                self.pending_since = Some(Instant::now());
            }

            if !self.buffer.is_empty() {
                let clear = td_ui::icon_button(ui, td_ui::icons::CLEAR, "Clear search");
                if clear.clicked() {
                    self.buffer.clear();
                    column_changed = true;
                }
            }

            if column_changed {
                // Apply immediately, cancelling any pending debounce.
                self.pending_since = None;
                self.commit(state);
            }
        });

        self.flush_if_quiet(state, Instant::now());

        if self.pending_since.is_some() {
            // Make sure a frame arrives once the quiet window has elapsed.
            ui.ctx().request_repaint_after(self.debounce);
        }
    }

    fn flush_if_quiet(&mut self, state: &TableState, now: Instant) {
        if let Some(since) = self.pending_since {
            if now.duration_since(since) >= self.debounce {
                self.pending_since = None;
                self.commit(state);
            }
        }
    }

    fn commit(&self, state: &TableState) {
        let next = SearchState {
            term: self.buffer.clone(),
            column_id: if self.buffer.is_empty() {
                None
            } else {
                self.column_id.clone()
            },
        };
        state.update_search(StateUpdate::Set(next));
    }
}
