//! # Selection State Machine
//!
//! Finder-style multi-selection over board items.
//!
//! There is a single implicit state: the current selection plus an optional
//! anchor. Every transition is a pure, total function of
//! `(selection, anchor, target item, action)` and yields a new
//! [`SelectionState`]; nothing here can fail.
//!
//! | Action | Gesture |
//! |--------|---------|
//! | [`SelectionAction::PlainSelect`] | click |
//! | [`SelectionAction::ToggleInGroup`] | ctrl/cmd-click, touch |
//! | [`SelectionAction::RangeSelectTo`] | shift-click |
//! | [`SelectionAction::CollapseToSingleOnDragStart`] | drag begins |
//! | [`SelectionAction::ClearAll`] | click outside, Escape |

use crate::{EntityStore, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// SELECTION STATE
// =============================================================================

/// Selected items (in selection order) and the range-select anchor.
///
/// The anchor is the last item plainly clicked. It is the fixed end of a
/// shift-click range and need not itself be selected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub selected_ids: Vec<ItemId>,
    pub anchor_id: Option<ItemId>,
}

/// A request to change the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "id", rename_all = "snake_case")]
pub enum SelectionAction {
    PlainSelect(ItemId),
    ToggleInGroup(ItemId),
    RangeSelectTo(ItemId),
    CollapseToSingleOnDragStart(ItemId),
    ClearAll,
}

impl SelectionState {
    /// Create an empty selection with no anchor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selection of `ids` with no anchor.
    #[must_use]
    pub fn of(ids: impl IntoIterator<Item = ItemId>) -> Self {
        Self {
            selected_ids: ids.into_iter().collect(),
            anchor_id: None,
        }
    }

    /// Check if an item is selected.
    ///
    /// Linear in the selection size. Use [`SelectionLookup`] when asking for
    /// many items against the same selection.
    #[must_use]
    pub fn is_selected(&self, item: &ItemId) -> bool {
        self.selected_ids.contains(item)
    }

    /// Number of selected items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected_ids.len()
    }

    /// Check if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected_ids.is_empty()
    }

    /// Build a membership lookup for this selection.
    #[must_use]
    pub fn lookup(&self) -> SelectionLookup {
        SelectionLookup {
            ids: self.selected_ids.iter().cloned().collect(),
        }
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    /// Plain click on an item.
    ///
    /// - Not selected: becomes the only selected item and the anchor.
    /// - The only selected item: selection and anchor are cleared.
    /// - Part of a larger group: collapses to just this item, which becomes
    ///   the anchor.
    #[must_use]
    pub fn plain_select(&self, item: &ItemId) -> Self {
        let was_selected = self.is_selected(item);

        if was_selected && self.selected_ids.len() == 1 {
            return Self::new();
        }

        Self {
            selected_ids: vec![item.clone()],
            anchor_id: Some(item.clone()),
        }
    }

    /// Ctrl/cmd-click: add or remove one item, keeping the others in order.
    ///
    /// The anchor is not touched.
    #[must_use]
    pub fn toggle_in_group(&self, item: &ItemId) -> Self {
        let selected_ids = match self.selected_ids.iter().position(|id| id == item) {
            Some(index) => {
                let mut remaining = self.selected_ids.clone();
                remaining.remove(index);
                remaining
            }
            None => {
                let mut extended = self.selected_ids.clone();
                extended.push(item.clone());
                extended
            }
        };

        Self {
            selected_ids,
            anchor_id: self.anchor_id.clone(),
        }
    }

    /// Shift-click: select the closed run between the anchor and `item`.
    ///
    /// Returns `None` (selection unchanged) when there is no anchor, when
    /// either end is not on the board, or when `item` is in a different column
    /// than the anchor. Otherwise the result holds exactly the run in column
    /// order and the anchor stays fixed.
    #[must_use]
    pub fn range_select_to(&self, store: &EntityStore, item: &ItemId) -> Option<Self> {
        let anchor = self.anchor_id.as_ref()?;
        let column = store.column_of(anchor)?;
        let from = column.position(anchor)?;
        let to = column.position(item)?;

        let (start, end) = if from <= to { (from, to) } else { (to, from) };
        let run = column.item_ids.get(start..=end)?;

        Some(Self {
            selected_ids: run.to_vec(),
            anchor_id: Some(anchor.clone()),
        })
    }

    /// Drag start on `item`.
    ///
    /// Dragging an unselected item discards the current selection and drags
    /// that item alone; it becomes the anchor as if it had been clicked.
    /// Dragging a selected item keeps the whole group.
    #[must_use]
    pub fn collapse_to_single_on_drag_start(&self, item: &ItemId) -> Self {
        if self.is_selected(item) {
            return self.clone();
        }

        Self {
            selected_ids: vec![item.clone()],
            anchor_id: Some(item.clone()),
        }
    }

    /// Empty the selection and forget the anchor.
    #[must_use]
    pub fn clear_all(&self) -> Self {
        Self::new()
    }

    // =========================================================================
    // REDUCER
    // =========================================================================

    /// Apply an action, returning the next selection.
    ///
    /// A range select that cannot apply leaves the selection unchanged.
    #[must_use]
    pub fn reduce(&self, store: &EntityStore, action: &SelectionAction) -> Self {
        match action {
            SelectionAction::PlainSelect(item) => self.plain_select(item),
            SelectionAction::ToggleInGroup(item) => self.toggle_in_group(item),
            SelectionAction::RangeSelectTo(item) => self
                .range_select_to(store, item)
                .unwrap_or_else(|| self.clone()),
            SelectionAction::CollapseToSingleOnDragStart(item) => {
                self.collapse_to_single_on_drag_start(item)
            }
            SelectionAction::ClearAll => self.clear_all(),
        }
    }
}

// =============================================================================
// MEMBERSHIP LOOKUP
// =============================================================================

/// Set view of a selection for repeated membership checks.
///
/// Derived from a [`SelectionState`]; rebuild it whenever the selection
/// changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionLookup {
    ids: BTreeSet<ItemId>,
}

impl SelectionLookup {
    /// Check if an item is selected.
    #[must_use]
    pub fn contains(&self, item: &ItemId) -> bool {
        self.ids.contains(item)
    }

    /// Number of selected items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Column, Item};

    fn id(s: &str) -> ItemId {
        ItemId::new(s)
    }

    fn ids(raw: &[&str]) -> Vec<ItemId> {
        raw.iter().map(|s| id(s)).collect()
    }

    fn board() -> EntityStore {
        let left = ["a", "b", "c", "d", "e"];
        let right = ["p", "q"];
        EntityStore::from_parts(
            vec![
                Column::new("left", "Left", ids(&left)),
                Column::new("right", "Right", ids(&right)),
            ],
            left.iter()
                .chain(right.iter())
                .map(|s| Item::new(*s, s.to_uppercase()))
                .collect(),
        )
    }

    fn anchored(selected: &[&str], anchor: &str) -> SelectionState {
        SelectionState {
            selected_ids: ids(selected),
            anchor_id: Some(id(anchor)),
        }
    }

    #[test]
    fn plain_select_unselected_item() {
        let next = SelectionState::of(ids(&["a", "b"])).plain_select(&id("c"));
        assert_eq!(next, anchored(&["c"], "c"));
    }

    #[test]
    fn plain_select_sole_item_deselects() {
        let next = anchored(&["c"], "c").plain_select(&id("c"));
        assert!(next.is_empty());
        assert_eq!(next.anchor_id, None);
    }

    #[test]
    fn plain_select_member_of_group_collapses() {
        let next = anchored(&["a", "b", "c"], "a").plain_select(&id("b"));
        assert_eq!(next, anchored(&["b"], "b"));
    }

    #[test]
    fn toggle_appends_and_removes_in_order() {
        let start = anchored(&["a", "c"], "a");

        let added = start.toggle_in_group(&id("e"));
        assert_eq!(added.selected_ids, ids(&["a", "c", "e"]));
        assert_eq!(added.anchor_id, Some(id("a")));

        let removed = added.toggle_in_group(&id("a"));
        assert_eq!(removed.selected_ids, ids(&["c", "e"]));
        assert_eq!(removed.anchor_id, Some(id("a")));
    }

    #[test]
    fn range_select_downwards() {
        let next = anchored(&["b"], "b")
            .range_select_to(&board(), &id("d"))
            .expect("same column");
        assert_eq!(next, anchored(&["b", "c", "d"], "b"));
    }

    #[test]
    fn range_select_upwards() {
        let next = anchored(&["b"], "b")
            .range_select_to(&board(), &id("a"))
            .expect("same column");
        assert_eq!(next, anchored(&["a", "b"], "b"));
    }

    #[test]
    fn range_select_replaces_previous_run() {
        let wide = anchored(&["b", "c", "d", "e"], "b");
        let next = wide.range_select_to(&board(), &id("c")).expect("range");
        assert_eq!(next.selected_ids, ids(&["b", "c"]));
    }

    #[test]
    fn range_select_to_anchor_selects_anchor() {
        let next = SelectionState {
            selected_ids: Vec::new(),
            anchor_id: Some(id("c")),
        }
        .range_select_to(&board(), &id("c"))
        .expect("range");
        assert_eq!(next, anchored(&["c"], "c"));
    }

    #[test]
    fn range_select_without_anchor_is_noop() {
        let state = SelectionState::of(ids(&["a"]));
        assert_eq!(state.range_select_to(&board(), &id("c")), None);
        assert_eq!(
            state.reduce(&board(), &SelectionAction::RangeSelectTo(id("c"))),
            state
        );
    }

    #[test]
    fn range_select_across_columns_is_noop() {
        let state = anchored(&["b"], "b");
        assert_eq!(state.range_select_to(&board(), &id("p")), None);
    }

    #[test]
    fn drag_start_on_unselected_collapses() {
        let next = anchored(&["a", "b", "c"], "a").collapse_to_single_on_drag_start(&id("d"));
        assert_eq!(next.selected_ids, ids(&["d"]));
    }

    #[test]
    fn drag_start_on_selected_keeps_group() {
        let state = anchored(&["a", "b", "c"], "a");
        assert_eq!(state.collapse_to_single_on_drag_start(&id("b")), state);
    }

    #[test]
    fn clear_all_forgets_anchor() {
        let next = anchored(&["a", "b"], "a").reduce(&board(), &SelectionAction::ClearAll);
        assert_eq!(next, SelectionState::new());
    }

    #[test]
    fn lookup_matches_selection() {
        let state = SelectionState::of(ids(&["a", "c"]));
        let lookup = state.lookup();
        assert!(lookup.contains(&id("a")));
        assert!(!lookup.contains(&id("b")));
        assert_eq!(lookup.len(), 2);
    }

    #[test]
    fn action_serializes_tagged() {
        let json = serde_json::to_string(&SelectionAction::ToggleInGroup(id("a"))).expect("json");
        assert_eq!(json, r#"{"action":"toggle_in_group","id":"a"}"#);
    }
}
