//! Pagination bar
//!
//! One-based page display over the zero-based pagination cell. Changing the
//! page size jumps back to the first page; the new size would re-window the
//! data anyway, so keeping the old index would land the user somewhere
//! arbitrary.

use td_core::state::{PaginationState, StateUpdate, TableState, PAGE_SIZES};

/// Counts the bar needs from the computed view. `page_index` is the page
/// actually shown, which may have been clamped by the engine.
#[derive(Debug, Clone, Copy)]
pub struct PageInfo {
    pub filtered_count: usize,
    pub page_count: usize,
    pub page_index: usize,
}

impl PageInfo {
    pub fn from_view<T>(view: &td_data::ViewRows<'_, T>) -> Self {
        Self {
            filtered_count: view.filtered_count,
            page_count: view.page_count,
            page_index: view.page_index,
        }
    }
}

/// Render the pagination bar and apply any interaction to the store.
pub fn pagination_bar(ui: &mut egui::Ui, state: &TableState, info: &PageInfo) {
    let pagination = state.pagination();
    let page_size = pagination.page_size;

    ui.horizontal(|ui| {
        // Result range, e.g. "21-30 of 87".
        if info.filtered_count == 0 {
            ui.label("0 results");
        } else {
            let start = info.page_index * page_size + 1;
            let end = ((info.page_index + 1) * page_size).min(info.filtered_count);
            ui.label(format!("{start}-{end} of {} results", info.filtered_count));
        }

        ui.separator();

        let at_first = info.page_index == 0;
        if ui.add_enabled(!at_first, egui::Button::new("<")).clicked() {
            let target = info.page_index.saturating_sub(1);
            state.update_pagination(StateUpdate::with(move |p: &PaginationState| {
                PaginationState {
                    page_index: target,
                    ..*p
                }
            }));
        }

        ui.label(format!("Page {} of {}", info.page_index + 1, info.page_count));

        let at_last = info.page_index + 1 >= info.page_count;
        if ui.add_enabled(!at_last, egui::Button::new(">")).clicked() {
            let target = info.page_index + 1;
            state.update_pagination(StateUpdate::with(move |p: &PaginationState| {
                PaginationState {
                    page_index: target,
                    ..*p
                }
            }));
        }

        ui.separator();

        egui::ComboBox::from_id_source("page_size")
            .selected_text(format!("{page_size} per page"))
            .show_ui(ui, |ui| {
                for size in PAGE_SIZES {
                    if ui
                        .selectable_label(size == page_size, size.to_string())
                        .clicked()
                        && size != page_size
                    {
                        state.update_pagination(StateUpdate::Set(PaginationState {
                            page_index: 0,
                            page_size: size,
                        }));
                    }
                }
            });
    });
}
