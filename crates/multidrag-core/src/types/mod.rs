//! # Core Type Definitions
//!
//! This module contains the plain data types shared by every part of the core:
//! - Identifiers (`ItemId`, `ColumnId`)
//! - Board records (`Item`, `Column`)
//! - Drag locations (`DraggableLocation`)
//! - Error types (`BoardError`)
//!
//! ## Determinism Guarantees
//!
//! All identifier types implement `Ord` so they can key `BTreeMap`/`BTreeSet`
//! and iterate in a stable order.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of an item (a draggable, selectable card).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Create a new item id.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier of a column (one droppable lane).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(pub String);

impl ColumnId {
    /// Create a new column id.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// =============================================================================
// ITEM
// =============================================================================

/// An immutable board item.
///
/// Identity is the id; `content` is an opaque payload the core never reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub content: String,
}

impl Item {
    /// Create a new item.
    #[must_use]
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            content: content.into(),
        }
    }
}

// =============================================================================
// COLUMN
// =============================================================================

/// A column: a titled, ordered list of item ids.
///
/// Columns are never patched in place by the engine. A reorder produces a new
/// `Column` value through [`Column::with_item_ids`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Display and drag order within the column.
    pub item_ids: Vec<ItemId>,
}

impl Column {
    /// Create a new column.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, item_ids: Vec<ItemId>) -> Self {
        Self {
            id: ColumnId::new(id),
            title: title.into(),
            item_ids,
        }
    }

    /// Produce a copy of this column carrying a new `item_ids` list.
    #[must_use]
    pub fn with_item_ids(&self, item_ids: Vec<ItemId>) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            item_ids,
        }
    }

    /// Position of `item` within this column, if present.
    #[must_use]
    pub fn position(&self, item: &ItemId) -> Option<usize> {
        self.item_ids.iter().position(|id| id == item)
    }

    /// Check if `item` lives in this column.
    #[must_use]
    pub fn contains(&self, item: &ItemId) -> bool {
        self.item_ids.contains(item)
    }

    /// Number of items in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.item_ids.len()
    }

    /// Check if the column has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.item_ids.is_empty()
    }
}

// =============================================================================
// DRAG LOCATION
// =============================================================================

/// A position on the board as reported by the drag collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraggableLocation {
    pub column_id: ColumnId,
    pub index: usize,
}

impl DraggableLocation {
    /// Create a new location.
    #[must_use]
    pub fn new(column_id: impl Into<String>, index: usize) -> Self {
        Self {
            column_id: ColumnId::new(column_id),
            index,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the multidrag system.
///
/// Only precondition violations and host-side I/O produce errors. No-op
/// outcomes (identical drop location, range select across columns) are
/// ordinary `Ok` results.
#[derive(Debug, Error)]
pub enum BoardError {
    /// A location or lookup named a column the store does not have.
    #[error("Column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// A lookup named an item the store does not have.
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// An index does not address an item in the column.
    #[error("Index {index} out of range for column {column} (len {len})")]
    IndexOutOfRange {
        column: ColumnId,
        index: usize,
        len: usize,
    },

    /// Host-supplied data breaks an Entity Store invariant.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_position_and_contains() {
        let column = Column::new("todo", "To do", vec!["a".into(), "b".into()]);

        assert_eq!(column.position(&"b".into()), Some(1));
        assert_eq!(column.position(&"z".into()), None);
        assert!(column.contains(&"a".into()));
        assert_eq!(column.len(), 2);
        assert!(!column.is_empty());
    }

    #[test]
    fn with_item_ids_keeps_identity() {
        let column = Column::new("todo", "To do", vec!["a".into()]);
        let replaced = column.with_item_ids(Vec::new());

        assert_eq!(replaced.id, column.id);
        assert_eq!(replaced.title, column.title);
        assert!(replaced.is_empty());
    }

    #[test]
    fn column_serializes_camel_case() {
        let column = Column::new("todo", "To do", vec!["a".into()]);
        let json = serde_json::to_string(&column).expect("serialize");

        assert!(json.contains("\"itemIds\":[\"a\"]"));
        assert!(json.contains("\"id\":\"todo\""));
    }

    #[test]
    fn error_messages() {
        let err = BoardError::IndexOutOfRange {
            column: ColumnId::new("todo"),
            index: 7,
            len: 3,
        };
        assert_eq!(
            err.to_string(),
            "Index 7 out of range for column todo (len 3)"
        );
    }
}
