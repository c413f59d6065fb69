//! Row selection store
//!
//! Selection is keyed by stable row id, never by row position, so a
//! selection survives re-sorting and page changes. Clearing is always an
//! explicit action; a data change never silently drops what the user picked.

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::state::StateUpdate;

/// Collaborator notified with the resolved list of selected ids.
pub type SelectionFn = Box<dyn Fn(&[String]) + Send + Sync>;

/// Maps selected row ids to flags and reports resolved selections.
pub struct RowSelectionStore {
    selected: RwLock<AHashMap<String, bool>>,
    on_selection: RwLock<Option<SelectionFn>>,
}

impl Default for RowSelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RowSelectionStore {
    pub fn new() -> Self {
        Self {
            selected: RwLock::new(AHashMap::new()),
            on_selection: RwLock::new(None),
        }
    }

    /// Register the collaborator receiving resolved selections. Fired after
    /// every change, fire-and-forget.
    pub fn on_selection(&self, callback: impl Fn(&[String]) + Send + Sync + 'static) {
        *self.on_selection.write() = Some(Box::new(callback));
    }

    /// Apply a raw map update. Select-all, select-one and clear all funnel
    /// through here, so the value-or-updater contract holds everywhere.
    pub fn update(&self, update: StateUpdate<AHashMap<String, bool>>) {
        let resolved = {
            let mut cell = self.selected.write();
            let next = match update {
                StateUpdate::Set(value) => value,
                StateUpdate::With(f) => f(&cell),
            };
            *cell = next.clone();
            next
        };
        self.notify(&resolved);
    }

    /// Toggle a single row.
    pub fn toggle(&self, row_id: &str) {
        let row_id = row_id.to_string();
        self.update(StateUpdate::with(move |previous: &AHashMap<String, bool>| {
            let mut next = previous.clone();
            let flag = next.entry(row_id).or_insert(false);
            *flag = !*flag;
            next
        }));
    }

    /// Set a single row's flag.
    pub fn set_row(&self, row_id: &str, selected: bool) {
        let row_id = row_id.to_string();
        self.update(StateUpdate::with(move |previous: &AHashMap<String, bool>| {
            let mut next = previous.clone();
            next.insert(row_id, selected);
            next
        }));
    }

    /// Select or deselect every given row (the select-all control).
    pub fn set_all<I>(&self, row_ids: I, selected: bool)
    where
        I: IntoIterator<Item = String>,
    {
        let row_ids: Vec<String> = row_ids.into_iter().collect();
        self.update(StateUpdate::with(move |previous: &AHashMap<String, bool>| {
            let mut next = previous.clone();
            for id in row_ids {
                next.insert(id, selected);
            }
            next
        }));
    }

    /// Explicitly drop the whole selection.
    pub fn clear(&self) {
        self.update(StateUpdate::Set(AHashMap::new()));
    }

    /// Ids currently selected, sorted for deterministic consumers.
    pub fn selected_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .selected
            .read()
            .iter()
            .filter(|(_, on)| **on)
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    pub fn is_selected(&self, row_id: &str) -> bool {
        self.selected.read().get(row_id).copied().unwrap_or(false)
    }

    pub fn count(&self) -> usize {
        self.selected.read().values().filter(|on| **on).count()
    }

    pub fn has_selected(&self) -> bool {
        self.count() > 0
    }

    fn notify(&self, resolved: &AHashMap<String, bool>) {
        if let Some(callback) = self.on_selection.read().as_ref() {
            let mut ids: Vec<String> = resolved
                .iter()
                .filter(|(_, on)| **on)
                .map(|(id, _)| id.clone())
                .collect();
            ids.sort();
            callback(&ids);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn selection_is_keyed_by_id_not_position() {
        let store = RowSelectionStore::new();
        store.toggle("42");
        // Re-sorting or paging moves rows around, but ids do not change.
        assert!(store.is_selected("42"));
        assert!(!store.is_selected("7"));
        assert_eq!(store.selected_ids(), vec!["42".to_string()]);
    }

    #[test]
    fn toggle_twice_deselects() {
        let store = RowSelectionStore::new();
        store.toggle("42");
        store.toggle("42");
        assert!(!store.has_selected());
    }

    #[test]
    fn select_all_and_clear() {
        let store = RowSelectionStore::new();
        store.set_all(["1".to_string(), "2".to_string(), "3".to_string()], true);
        assert_eq!(store.count(), 3);

        store.set_all(["2".to_string()], false);
        assert_eq!(store.selected_ids(), vec!["1".to_string(), "3".to_string()]);

        store.clear();
        assert!(!store.has_selected());
    }

    #[test]
    fn callback_receives_resolved_ids_on_every_change() {
        let seen: Arc<Mutex<Vec<Vec<String>>>> = Arc::new(Mutex::new(Vec::new()));
        let store = RowSelectionStore::new();
        let sink = seen.clone();
        store.on_selection(move |ids| sink.lock().push(ids.to_vec()));

        store.toggle("b");
        store.toggle("a");
        store.toggle("b");

        let seen = seen.lock();
        assert_eq!(
            *seen,
            vec![
                vec!["b".to_string()],
                vec!["a".to_string(), "b".to_string()],
                vec!["a".to_string()],
            ]
        );
    }

    #[test]
    fn stale_ids_survive_until_explicit_clear() {
        // A search that removes row "42" from the result set does not touch
        // the selection; only the clear action does.
        let store = RowSelectionStore::new();
        store.toggle("42");
        assert!(store.is_selected("42"));
        store.clear();
        assert!(!store.is_selected("42"));
    }
}
