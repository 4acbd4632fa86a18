//! Cross-page row selection
//!
//! [`SelectionStore`] keeps a sparse id → selected map that is independent of
//! which page is loaded. Entries are never pruned: an id selected on page 3
//! is still selected after moving to page 1.

mod parse;

pub use parse::*;

use std::collections::BTreeMap;

use crate::model::RecordId;

/// Mapping from record id to selected state. A missing id is unselected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionMap {
    entries: BTreeMap<RecordId, bool>,
}

impl SelectionMap {
    /// Returns `true` iff the map holds `true` for `id`.
    pub fn is_selected(&self, id: RecordId) -> bool {
        self.entries.get(&id).copied().unwrap_or(false)
    }

    /// Returns the explicit entry for `id`, if any.
    pub fn get(&self, id: RecordId) -> Option<bool> {
        self.entries.get(&id).copied()
    }

    /// Returns the selected ids in ascending order.
    pub fn selected_ids(&self) -> Vec<RecordId> {
        self.entries
            .iter()
            .filter_map(|(id, selected)| selected.then_some(*id))
            .collect()
    }

    /// Returns the number of ids mapped to `true`.
    pub fn selected_count(&self) -> usize {
        self.entries.values().filter(|selected| **selected).count()
    }

    /// Returns the number of explicit entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entry was ever written.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn set(&mut self, id: RecordId, checked: bool) {
        self.entries.insert(id, checked);
    }
}

/// Owns the [`SelectionMap`] and the operations that mutate it.
///
/// All operations are synchronous and may be called while a page load is
/// pending.
///
/// # Example
///
/// ```
/// use artgrid_lib::model::RecordId;
/// use artgrid_lib::selection::SelectionStore;
///
/// let mut store = SelectionStore::new();
/// let visible = [RecordId(1), RecordId(2)];
///
/// store.select_all_visible(&visible, true);
/// assert!(store.is_all_visible_selected(&visible));
///
/// store.bulk_select_by_ids("2, 40, nope");
/// assert_eq!(store.selected_ids(), vec![RecordId(1), RecordId(2), RecordId(40)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    map: SelectionMap,
}

impl SelectionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current map.
    pub fn map(&self) -> &SelectionMap {
        &self.map
    }

    /// Returns `true` iff `id` is selected.
    pub fn is_selected(&self, id: RecordId) -> bool {
        self.map.is_selected(id)
    }

    /// Sets the entry for `id` and nothing else.
    pub fn toggle(&mut self, id: RecordId, checked: bool) -> &SelectionMap {
        self.map.set(id, checked);
        &self.map
    }

    /// Sets every id in `visible_ids` to `checked`.
    ///
    /// This is "select all on this page": ids outside `visible_ids` are left
    /// as they are.
    pub fn select_all_visible(&mut self, visible_ids: &[RecordId], checked: bool) -> &SelectionMap {
        for id in visible_ids {
            self.map.set(*id, checked);
        }
        &self.map
    }

    /// Selects every id parsed from `raw_text`, visible or not.
    ///
    /// See [`parse_id_list`] for the accepted syntax. Unparseable tokens are
    /// dropped silently. Never deselects anything.
    pub fn bulk_select_by_ids(&mut self, raw_text: &str) -> &SelectionMap {
        let ids = parse_id_list(raw_text);
        log::debug!("Bulk selecting {} ids", ids.len());
        for id in ids {
            self.map.set(id, true);
        }
        &self.map
    }

    /// Returns `true` iff every id in `visible_ids` is selected.
    ///
    /// An empty page is never "all selected".
    pub fn is_all_visible_selected(&self, visible_ids: &[RecordId]) -> bool {
        !visible_ids.is_empty() && visible_ids.iter().all(|id| self.map.is_selected(*id))
    }

    /// Returns the selected ids in ascending order.
    pub fn selected_ids(&self) -> Vec<RecordId> {
        self.map.selected_ids()
    }

    /// Returns the number of selected ids.
    pub fn selected_count(&self) -> usize {
        self.map.selected_count()
    }
}
