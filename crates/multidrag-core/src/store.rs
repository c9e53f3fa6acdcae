//! # Entity Store
//!
//! The board's data model: global column order, the columns keyed by id, and
//! the flat item lookup table.
//!
//! The store is treated as an immutable snapshot. Operations that change the
//! board (see [`crate::reorder`]) build a new store and leave the input as it
//! was.
//!
//! ## Invariants
//!
//! - Every id in every `item_ids` list appears in exactly one column.
//! - `column_order` contains exactly the key set of `columns`.
//! - `items` contains every id referenced by a column.
//!
//! The pure operations assume these hold. [`EntityStore::validate`] exists for
//! hosts that want to check untrusted data at the boundary.

use crate::{BoardError, Column, ColumnId, DraggableLocation, Item, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Columns, their order, and the items they reference.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityStore {
    pub column_order: Vec<ColumnId>,
    pub columns: BTreeMap<ColumnId, Column>,
    pub items: BTreeMap<ItemId, Item>,
}

impl EntityStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from columns (in display order) and items.
    #[must_use]
    pub fn from_parts(columns: Vec<Column>, items: Vec<Item>) -> Self {
        let column_order = columns.iter().map(|c| c.id.clone()).collect();
        Self {
            column_order,
            columns: columns.into_iter().map(|c| (c.id.clone(), c)).collect(),
            items: items.into_iter().map(|i| (i.id.clone(), i)).collect(),
        }
    }

    // =========================================================================
    // LOOKUPS
    // =========================================================================

    /// Get a column by id.
    pub fn column(&self, id: &ColumnId) -> Result<&Column, BoardError> {
        self.columns
            .get(id)
            .ok_or_else(|| BoardError::ColumnNotFound(id.clone()))
    }

    /// Get an item by id.
    pub fn item(&self, id: &ItemId) -> Result<&Item, BoardError> {
        self.items
            .get(id)
            .ok_or_else(|| BoardError::ItemNotFound(id.clone()))
    }

    /// Columns in display order.
    ///
    /// Ids in `column_order` without a matching column are skipped.
    pub fn ordered_columns(&self) -> impl Iterator<Item = &Column> {
        self.column_order.iter().filter_map(|id| self.columns.get(id))
    }

    /// The column an item currently lives in.
    #[must_use]
    pub fn column_of(&self, item: &ItemId) -> Option<&Column> {
        self.ordered_columns().find(|column| column.contains(item))
    }

    /// Column and index of an item.
    #[must_use]
    pub fn locate(&self, item: &ItemId) -> Option<DraggableLocation> {
        self.ordered_columns().find_map(|column| {
            column.position(item).map(|index| DraggableLocation {
                column_id: column.id.clone(),
                index,
            })
        })
    }

    /// Resolve a column's `item_ids` into item records.
    ///
    /// Ids with no item record are skipped.
    pub fn items_in(&self, id: &ColumnId) -> Result<Vec<&Item>, BoardError> {
        let column = self.column(id)?;
        Ok(column
            .item_ids
            .iter()
            .filter_map(|item| self.items.get(item))
            .collect())
    }

    /// Item id at a location, if the location addresses an item.
    pub fn item_at(&self, location: &DraggableLocation) -> Result<&ItemId, BoardError> {
        let column = self.column(&location.column_id)?;
        column
            .item_ids
            .get(location.index)
            .ok_or_else(|| BoardError::IndexOutOfRange {
                column: column.id.clone(),
                index: location.index,
                len: column.len(),
            })
    }

    /// Total number of placed items across all columns.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.columns.values().map(Column::len).sum()
    }

    // =========================================================================
    // UPDATES
    // =========================================================================

    /// Return a store with `column` replacing the column of the same id.
    #[must_use]
    pub fn with_column(&self, column: Column) -> Self {
        let mut columns = self.columns.clone();
        columns.insert(column.id.clone(), column);
        Self {
            column_order: self.column_order.clone(),
            columns,
            items: self.items.clone(),
        }
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Check the store invariants.
    ///
    /// Returns `BoardError::InvariantViolation` describing the first breach.
    pub fn validate(&self) -> Result<(), BoardError> {
        let ordered: BTreeSet<&ColumnId> = self.column_order.iter().collect();
        if ordered.len() != self.column_order.len() {
            return Err(BoardError::InvariantViolation(
                "column order lists a column more than once".to_string(),
            ));
        }

        let keys: BTreeSet<&ColumnId> = self.columns.keys().collect();
        if ordered != keys {
            return Err(BoardError::InvariantViolation(
                "column order does not match the column set".to_string(),
            ));
        }

        let mut seen: BTreeMap<&ItemId, &ColumnId> = BTreeMap::new();
        for (key, column) in &self.columns {
            if &column.id != key {
                return Err(BoardError::InvariantViolation(format!(
                    "column stored under {} has id {}",
                    key, column.id
                )));
            }

            for item in &column.item_ids {
                if let Some(home) = seen.insert(item, &column.id) {
                    return Err(BoardError::InvariantViolation(format!(
                        "item {} appears in both {} and {}",
                        item, home, column.id
                    )));
                }
                if !self.items.contains_key(item) {
                    return Err(BoardError::InvariantViolation(format!(
                        "column {} references unknown item {}",
                        column.id, item
                    )));
                }
            }
        }

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
