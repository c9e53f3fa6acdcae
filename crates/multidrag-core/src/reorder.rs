//! # Reorder Engine
//!
//! Computes the board after a completed drag of one or many items.
//!
//! ## Moved Set
//!
//! The moved set is the dragged item plus every selected item that sits in
//! the source column at drop time. Selected items living in other columns
//! stay where they are. The moved set is always taken in source column
//! order, never in selection order.
//!
//! ## Destination Index
//!
//! The drag collaborator reports the destination index against the list the
//! user was looking at, which is the source column with only the dragged item
//! lifted out (for a same-column drop) or the untouched destination column
//! (for a cross-column drop). For a same-column drop the other moved items are
//! still counted in that list, so the engine subtracts the moved items that
//! sit in front of the drop gap. The first moved item then lands exactly in
//! the gap the user targeted.

use crate::{BoardError, DraggableLocation, EntityStore, ItemId, SelectionState};
use serde::{Deserialize, Serialize};

/// Board and selection after a drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderResult {
    pub entities: EntityStore,
    pub selection: SelectionState,
}

/// The ReorderEngine consolidates all drop computations.
pub struct ReorderEngine;

impl ReorderEngine {
    /// Move the dragged item, and any selected items sharing its column, from
    /// `source` to `destination`.
    ///
    /// Dropping onto the source location returns the input unchanged. A
    /// destination index past the end of the target list appends.
    ///
    /// # Errors
    /// - `BoardError::ColumnNotFound` if either location names an unknown column
    /// - `BoardError::IndexOutOfRange` if `source.index` addresses no item
    pub fn reorder(
        entities: &EntityStore,
        selection: &SelectionState,
        source: &DraggableLocation,
        destination: &DraggableLocation,
    ) -> Result<ReorderResult, BoardError> {
        let home = entities.column(&source.column_id)?;
        let dragged = entities.item_at(source)?;
        let foreign = entities.column(&destination.column_id)?;

        if source == destination {
            tracing::trace!(item = %dragged, "dropped on its own location");
            return Ok(ReorderResult {
                entities: entities.clone(),
                selection: selection.clone(),
            });
        }

        let moved = Self::moved_set(entities, selection, source)?;
        let remaining: Vec<ItemId> = home
            .item_ids
            .iter()
            .filter(|id| !moved.contains(id))
            .cloned()
            .collect();

        let updated = if home.id == foreign.id {
            let insert_at = Self::same_column_insert_index(
                &home.item_ids,
                dragged,
                &moved,
                destination.index,
            );
            let item_ids = insert_block(remaining, insert_at, &moved);

            tracing::debug!(
                column = %home.id,
                moved = moved.len(),
                insert_at,
                "reordered within column"
            );
            entities.with_column(home.with_item_ids(item_ids))
        } else {
            let insert_at = destination.index.min(foreign.len());
            let item_ids = insert_block(foreign.item_ids.clone(), insert_at, &moved);

            tracing::debug!(
                from = %home.id,
                to = %foreign.id,
                moved = moved.len(),
                insert_at,
                "moved between columns"
            );
            entities
                .with_column(home.with_item_ids(remaining))
                .with_column(foreign.with_item_ids(item_ids))
        };

        Ok(ReorderResult {
            entities: updated,
            selection: selection.clone(),
        })
    }

    /// Items that travel with a drag starting at `source`, in source column
    /// order.
    pub fn moved_set(
        entities: &EntityStore,
        selection: &SelectionState,
        source: &DraggableLocation,
    ) -> Result<Vec<ItemId>, BoardError> {
        let home = entities.column(&source.column_id)?;
        let dragged = entities.item_at(source)?;
        let lookup = selection.lookup();

        Ok(home
            .item_ids
            .iter()
            .filter(|id| *id == dragged || lookup.contains(id))
            .cloned()
            .collect())
    }

    /// Index into the column-without-moved-items where the moved block starts.
    fn same_column_insert_index(
        column: &[ItemId],
        dragged: &ItemId,
        moved: &[ItemId],
        destination: usize,
    ) -> usize {
        let lifted: Vec<&ItemId> = column.iter().filter(|id| *id != dragged).collect();
        let gap = destination.min(lifted.len());
        let moved_before_gap = lifted
            .iter()
            .take(gap)
            .filter(|id| moved.contains(id))
            .count();
        gap - moved_before_gap
    }
}

/// Splice `block` into `list` starting at `index`.
fn insert_block(mut list: Vec<ItemId>, index: usize, block: &[ItemId]) -> Vec<ItemId> {
    let at = index.min(list.len());
    list.splice(at..at, block.iter().cloned());
    list
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Column, ColumnId, Item};

    fn ids(raw: &[&str]) -> Vec<ItemId> {
        raw.iter().map(|s| ItemId::new(*s)).collect()
    }

    fn board(columns: Vec<(&str, Vec<&str>)>) -> EntityStore {
        let items = columns
            .iter()
            .flat_map(|(_, members)| members.iter())
            .map(|id| Item::new(*id, format!("content of {}", id)))
            .collect();
        EntityStore::from_parts(
            columns
                .iter()
                .map(|(id, members)| Column::new(*id, id.to_uppercase(), ids(members)))
                .collect(),
            items,
        )
    }

    fn column_ids(store: &EntityStore, column: &str) -> Vec<ItemId> {
        store
            .column(&ColumnId::new(column))
            .expect("column")
            .item_ids
            .clone()
    }

    #[test]
    fn single_item_within_column_moves_down() {
        let store = board(vec![("todo", vec!["a", "b", "c"])]);
        let result = ReorderEngine::reorder(
            &store,
            &SelectionState::of(ids(&["a"])),
            &DraggableLocation::new("todo", 0),
            &DraggableLocation::new("todo", 2),
        )
        .expect("reorder");

        assert_eq!(column_ids(&result.entities, "todo"), ids(&["b", "c", "a"]));
    }

    #[test]
    fn single_item_within_column_moves_up() {
        let store = board(vec![("todo", vec!["a", "b", "c", "d"])]);
        let result = ReorderEngine::reorder(
            &store,
            &SelectionState::new(),
            &DraggableLocation::new("todo", 3),
            &DraggableLocation::new("todo", 1),
        )
        .expect("reorder");

        assert_eq!(column_ids(&result.entities, "todo"), ids(&["a", "d", "b", "c"]));
        assert!(result.selection.is_empty());
    }

    #[test]
    fn identical_location_is_noop() {
        let store = board(vec![("todo", vec!["a", "b", "c", "d"])]);
        let selection = SelectionState::of(ids(&["a", "c"]));
        let result = ReorderEngine::reorder(
            &store,
            &selection,
            &DraggableLocation::new("todo", 2),
            &DraggableLocation::new("todo", 2),
        )
        .expect("reorder");

        assert_eq!(result.entities, store);
        assert_eq!(result.selection, selection);
    }

    #[test]
    fn group_gathers_at_top() {
        let store = board(vec![("todo", vec!["t1", "t2", "t3", "t4", "t5"])]);
        let selection = SelectionState::of(ids(&["t4", "t2"]));
        let result = ReorderEngine::reorder(
            &store,
            &selection,
            &DraggableLocation::new("todo", 3),
            &DraggableLocation::new("todo", 0),
        )
        .expect("reorder");

        assert_eq!(
            column_ids(&result.entities, "todo"),
            ids(&["t2", "t4", "t1", "t3", "t5"])
        );
        assert_eq!(result.selection, selection);
    }

    #[test]
    fn group_lands_in_targeted_gap_below() {
        // Dragging t2 into the gap between t4 and t5 (index 3 once t2 is lifted).
        let store = board(vec![("todo", vec!["t1", "t2", "t3", "t4", "t5"])]);
        let result = ReorderEngine::reorder(
            &store,
            &SelectionState::of(ids(&["t2", "t4"])),
            &DraggableLocation::new("todo", 1),
            &DraggableLocation::new("todo", 3),
        )
        .expect("reorder");

        assert_eq!(
            column_ids(&result.entities, "todo"),
            ids(&["t1", "t3", "t2", "t4", "t5"])
        );
    }

    #[test]
    fn cross_column_keeps_source_order() {
        let store = board(vec![("colA", vec!["x1", "x2", "x3"]), ("colB", vec![])]);
        let selection = SelectionState::of(ids(&["x3", "x1"]));
        let result = ReorderEngine::reorder(
            &store,
            &selection,
            &DraggableLocation::new("colA", 0),
            &DraggableLocation::new("colB", 0),
        )
        .expect("reorder");

        assert_eq!(column_ids(&result.entities, "colA"), ids(&["x2"]));
        assert_eq!(column_ids(&result.entities, "colB"), ids(&["x1", "x3"]));
        assert_eq!(result.selection, selection);
    }

    #[test]
    fn selected_items_elsewhere_stay_put() {
        let store = board(vec![("a", vec!["a1", "a2"]), ("b", vec!["b1"]), ("c", vec!["c1"])]);
        let result = ReorderEngine::reorder(
            &store,
            &SelectionState::of(ids(&["a1", "c1"])),
            &DraggableLocation::new("a", 0),
            &DraggableLocation::new("b", 1),
        )
        .expect("reorder");

        assert_eq!(column_ids(&result.entities, "a"), ids(&["a2"]));
        assert_eq!(column_ids(&result.entities, "b"), ids(&["b1", "a1"]));
        assert_eq!(column_ids(&result.entities, "c"), ids(&["c1"]));
    }

    #[test]
    fn emptied_column_survives() {
        let store = board(vec![("a", vec!["only"]), ("b", vec!["b1"])]);
        let result = ReorderEngine::reorder(
            &store,
            &SelectionState::of(ids(&["only"])),
            &DraggableLocation::new("a", 0),
            &DraggableLocation::new("b", 0),
        )
        .expect("reorder");

        assert!(column_ids(&result.entities, "a").is_empty());
        assert_eq!(result.entities.column_order, store.column_order);
        assert_eq!(column_ids(&result.entities, "b"), ids(&["only", "b1"]));
    }

    #[test]
    fn destination_past_end_appends() {
        let store = board(vec![("a", vec!["a1"]), ("b", vec!["b1", "b2"])]);
        let result = ReorderEngine::reorder(
            &store,
            &SelectionState::new(),
            &DraggableLocation::new("a", 0),
            &DraggableLocation::new("b", 99),
        )
        .expect("reorder");

        assert_eq!(column_ids(&result.entities, "b"), ids(&["b1", "b2", "a1"]));
    }

    #[test]
    fn untouched_columns_and_items_are_equal() {
        let store = board(vec![("a", vec!["a1"]), ("b", vec![]), ("c", vec!["c1", "c2"])]);
        let result = ReorderEngine::reorder(
            &store,
            &SelectionState::new(),
            &DraggableLocation::new("a", 0),
            &DraggableLocation::new("b", 0),
        )
        .expect("reorder");

        assert_eq!(
            result.entities.column(&ColumnId::new("c")).expect("c"),
            store.column(&ColumnId::new("c")).expect("c")
        );
        assert_eq!(result.entities.items, store.items);
    }

    #[test]
    fn unknown_column_is_reported() {
        let store = board(vec![("a", vec!["a1"])]);
        let result = ReorderEngine::reorder(
            &store,
            &SelectionState::new(),
            &DraggableLocation::new("a", 0),
            &DraggableLocation::new("missing", 0),
        );
        assert!(matches!(result, Err(BoardError::ColumnNotFound(_))));
    }

    #[test]
    fn source_index_out_of_range_is_reported() {
        let store = board(vec![("a", vec!["a1"])]);
        let result = ReorderEngine::reorder(
            &store,
            &SelectionState::new(),
            &DraggableLocation::new("a", 4),
            &DraggableLocation::new("a", 0),
        );
        assert!(matches!(result, Err(BoardError::IndexOutOfRange { .. })));
    }

    #[test]
    fn moved_set_includes_unselected_dragged_item() {
        let store = board(vec![("a", vec!["a1", "a2", "a3"])]);
        let moved = ReorderEngine::moved_set(
            &store,
            &SelectionState::of(ids(&["a3"])),
            &DraggableLocation::new("a", 0),
        )
        .expect("moved");
        assert_eq!(moved, ids(&["a1", "a3"]));
    }
}
