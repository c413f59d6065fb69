//! Column definitions and the column-visibility control

use std::collections::BTreeSet;

use td_core::state::{StateUpdate, TableState};
use td_data::ExportColumn;

/// One table column as the presentation layer sees it.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub id: String,
    pub header: String,
    pub sortable: bool,
    pub searchable: bool,
    pub hideable: bool,
}

impl ColumnDef {
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            sortable: true,
            searchable: true,
            hideable: true,
        }
    }

    /// Keep the column out of sort toggles.
    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Keep the column out of global search.
    pub fn not_searchable(mut self) -> Self {
        self.searchable = false;
        self
    }

    /// Always visible; omitted from the columns menu.
    pub fn always_visible(mut self) -> Self {
        self.hideable = false;
        self
    }
}

/// Columns currently shown, in definition order.
pub fn visible_columns<'a>(
    columns: &'a [ColumnDef],
    hidden: &BTreeSet<String>,
) -> Vec<&'a ColumnDef> {
    columns
        .iter()
        .filter(|c| !hidden.contains(&c.id))
        .collect()
}

/// Ids a global search runs over.
pub fn search_column_ids(columns: &[ColumnDef]) -> Vec<&str> {
    columns
        .iter()
        .filter(|c| c.searchable)
        .map(|c| c.id.as_str())
        .collect()
}

/// Export descriptors for the currently visible columns.
pub fn export_columns(columns: &[ColumnDef], hidden: &BTreeSet<String>) -> Vec<ExportColumn> {
    visible_columns(columns, hidden)
        .into_iter()
        .map(|c| ExportColumn::new(c.id.clone(), c.header.clone()))
        .collect()
}

/// The "Columns" menu: checkboxes for every hideable column plus toggle-all.
pub fn column_visibility_menu(ui: &mut egui::Ui, state: &TableState, columns: &[ColumnDef]) {
    ui.menu_button(format!("{} Columns", td_ui::icons::COLUMNS), |ui| {
        let hidden = state.hidden_columns();
        let hideable: Vec<&ColumnDef> = columns.iter().filter(|c| c.hideable).collect();
        let all_visible = hideable.iter().all(|c| !hidden.contains(&c.id));

        let mut toggle_all = all_visible;
        if ui.checkbox(&mut toggle_all, "Toggle all").clicked() {
            let ids: Vec<String> = hideable.iter().map(|c| c.id.clone()).collect();
            state.update_hidden_columns(StateUpdate::with(move |_: &BTreeSet<String>| {
                if toggle_all {
                    BTreeSet::new()
                } else {
                    ids.into_iter().collect()
                }
            }));
        }

        ui.separator();

        for column in hideable {
            let mut visible = !hidden.contains(&column.id);
            if ui.checkbox(&mut visible, &column.header).clicked() {
                let id = column.id.clone();
                state.update_hidden_columns(StateUpdate::with(move |previous: &BTreeSet<String>| {
                    let mut next = previous.clone();
                    if visible {
                        next.remove(&id);
                    } else {
                        next.insert(id);
                    }
                    next
                }));
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("name", "Name").always_visible(),
            ColumnDef::new("email", "Email"),
            ColumnDef::new("notes", "Notes").not_searchable(),
        ]
    }

    #[test]
    fn hidden_columns_are_filtered_out_in_order() {
        let hidden = BTreeSet::from(["email".to_string()]);
        let all_columns = columns();
        let visible = visible_columns(&all_columns, &hidden);
        let ids: Vec<_> = visible.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["name", "notes"]);
    }

    #[test]
    fn search_skips_unsearchable_columns() {
        assert_eq!(search_column_ids(&columns()), vec!["name", "email"]);
    }

    #[test]
    fn exports_follow_visibility() {
        let hidden = BTreeSet::from(["notes".to_string()]);
        let export = export_columns(&columns(), &hidden);
        let headers: Vec<_> = export.iter().map(|c| c.header.as_str()).collect();
        assert_eq!(headers, vec!["Name", "Email"]);
    }
}
