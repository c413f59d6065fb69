//! Table rendering
//!
//! Draws the candidate table from the core state: sortable headers, the
//! row-selection column, striped rows, and the loading and empty states.
//! All interaction goes straight back into the state stores.

use egui::{ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use td_core::controller::TableController;
use td_core::selection::RowSelectionStore;
use td_core::state::{SortRule, StateUpdate};
use td_data::{TableRow, ViewRows};

use crate::column::{visible_columns, ColumnDef};
use crate::download::DownloadTrigger;

/// Everything one frame of the table needs.
pub struct TableFrame<'a, T> {
    pub columns: &'a [ColumnDef],
    pub view: &'a ViewRows<'a, T>,
    pub is_loading: bool,
    pub empty_message: &'a str,
}

/// Render the table body for this frame.
pub fn show_table<T: TableRow>(ui: &mut Ui, controller: &TableController, frame: &TableFrame<T>) {
    if frame.is_loading {
        ui.centered_and_justified(|ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading…");
            });
        });
        return;
    }

    if frame.view.filtered_count == 0 {
        ui.centered_and_justified(|ui| {
            ui.label(frame.empty_message);
        });
        return;
    }

    let hidden = controller.state().hidden_columns();
    let visible = visible_columns(frame.columns, &hidden);
    let sort = controller.state().sort();
    let selection = controller.selection();

    let text_height = egui::TextStyle::Body.resolve(ui.style()).size * 1.5;
    let page_ids: Vec<String> = frame.view.rows.iter().map(|row| row.row_id()).collect();

    ScrollArea::horizontal().show(ui, |ui| {
        let mut builder = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .min_scrolled_height(0.0)
            .vscroll(true)
            .column(Column::exact(24.0));

        for _ in 0..visible.len() {
            builder = builder.column(
                Column::initial(150.0)
                    .at_least(80.0)
                    .at_most(400.0)
                    .clip(true),
            );
        }

        builder
            .header(20.0, |mut header| {
                header.col(|ui| {
                    select_all_control(ui, selection, &page_ids);
                });

                for column in &visible {
                    let state = controller.state();
                    header.col(|ui| {
                        if column.sortable {
                            let rule = sort.iter().find(|r| r.id == column.id);
                            let label = match rule {
                                Some(rule) if rule.desc => {
                                    format!("{} {}", column.header, td_ui::icons::SORT_DESC)
                                }
                                Some(_) => format!("{} {}", column.header, td_ui::icons::SORT_ASC),
                                None => column.header.clone(),
                            };
                            let response = ui.button(egui::RichText::new(label).strong());
                            if response.clicked() {
                                let next = next_sort(rule, &column.id);
                                state.update_sort(StateUpdate::Set(next));
                            }
                        } else {
                            ui.strong(&column.header);
                        }
                    });
                }
            })
            .body(|body| {
                body.rows(text_height, frame.view.rows.len(), |row_index, mut table_row| {
                    let row = frame.view.rows[row_index];
                    let row_id = row.row_id();

                    table_row.col(|ui| {
                        let mut checked = selection.is_selected(&row_id);
                        if ui.checkbox(&mut checked, "").changed() {
                            selection.toggle(&row_id);
                        }
                    });

                    for column in &visible {
                        table_row.col(|ui| {
                            let value = row.cell_text(&column.id).unwrap_or_default();
                            // Clip very long cells; the full value is a hover away.
                            match value.char_indices().nth(80) {
                                Some((cut, _)) => {
                                    ui.label(format!("{}…", &value[..cut]))
                                        .on_hover_text(value);
                                }
                                None => {
                                    ui.label(value);
                                }
                            }
                        });
                    }
                });
            });
    });
}

/// Single-column sort cycle: none → ascending → descending → none.
fn next_sort(current: Option<&SortRule>, column_id: &str) -> Vec<SortRule> {
    match current {
        None => vec![SortRule::asc(column_id)],
        Some(rule) if !rule.desc => vec![SortRule::desc(column_id)],
        Some(_) => Vec::new(),
    }
}

/// Select-all over the rows currently shown.
fn select_all_control(ui: &mut Ui, selection: &RowSelectionStore, page_ids: &[String]) {
    let selected_here = page_ids
        .iter()
        .filter(|id| selection.is_selected(id.as_str()))
        .count();
    let all = !page_ids.is_empty() && selected_here == page_ids.len();
    let icon = if all {
        "☑"
    } else if selected_here > 0 {
        "▣"
    } else {
        "☐"
    };

    let response = ui
        .add(egui::Button::new(icon).frame(false))
        .on_hover_text("Toggle all");
    if response.clicked() {
        selection.set_all(page_ids.to_vec(), !all);
    }
}

/// Count caption, clear button and the download trigger.
///
/// Returns true when the download trigger was clicked; the caller decides
/// what a download with nothing selected should do.
pub fn selection_bar(
    ui: &mut Ui,
    selection: &RowSelectionStore,
    download: &DownloadTrigger,
) -> bool {
    let mut clicked = false;
    ui.horizontal(|ui| {
        let count = selection.count();
        ui.label(format!("{count} selected"));

        if ui
            .add_enabled(count > 0, egui::Button::new("Clear selection"))
            .clicked()
        {
            selection.clear();
        }

        clicked = download.show(ui);
    });
    clicked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_cycle_goes_asc_desc_none() {
        let first = next_sort(None, "name");
        assert_eq!(first, vec![SortRule::asc("name")]);

        let second = next_sort(first.first(), "name");
        assert_eq!(second, vec![SortRule::desc("name")]);

        let third = next_sort(second.first(), "name");
        assert!(third.is_empty());
    }
}
