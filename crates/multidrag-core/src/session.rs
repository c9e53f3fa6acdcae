//! # Board Session
//!
//! Host-side drag lifecycle coordination.
//!
//! A [`BoardSession`] owns the current `(EntityStore, SelectionState)` pair and
//! the ephemeral [`DragSession`]. Every event replaces the pair with the next
//! snapshot produced by the selection reducer or the reorder engine; nothing
//! is patched in place.
//!
//! ## Drag Lifecycle
//!
//! - drag start: collapse the selection to the dragged item unless it is
//!   already selected, then remember the dragged id
//! - drag end with a destination: run the reorder engine on the current
//!   selection and adopt its output
//! - drag end without destination, or cancelled: forget the dragged id and
//!   keep the selection as it is
//!
//! The dragged id only drives render hints ([`BoardSession::is_ghosting`],
//! [`BoardSession::selection_badge`]); it never affects the store.

use crate::gesture::{GestureMapper, ItemGesture, OutsideGesture, Platform};
use crate::primitives::BADGE_MIN_SELECTION;
use crate::reorder::ReorderEngine;
use crate::selection::{SelectionAction, SelectionLookup, SelectionState};
use crate::{BoardError, Column, ColumnId, DraggableLocation, EntityStore, Item, ItemId};
use serde::{Deserialize, Serialize};

// =============================================================================
// DRAG EVENTS
// =============================================================================

/// Ephemeral drag state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragSession {
    pub dragging_id: Option<ItemId>,
}

/// Reported by the drag collaborator when a drag begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragStart {
    pub draggable_id: ItemId,
    pub source: DraggableLocation,
}

/// Why a drag ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DropReason {
    #[default]
    Drop,
    Cancel,
}

/// Reported by the drag collaborator when a drag ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropResult {
    pub draggable_id: ItemId,
    pub source: DraggableLocation,
    #[serde(default)]
    pub destination: Option<DraggableLocation>,
    #[serde(default)]
    pub reason: DropReason,
}

// =============================================================================
// RENDER HINTS
// =============================================================================

/// Render hints for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView<'a> {
    pub item: &'a Item,
    pub index: usize,
    pub is_selected: bool,
    /// Selected, but left behind while another selected item is dragged.
    pub is_ghosting: bool,
    /// Count badge on the dragged item when a group is dragged.
    pub selection_badge: Option<usize>,
}

/// Render hints for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView<'a> {
    pub column: &'a Column,
    pub items: Vec<ItemView<'a>>,
}

// =============================================================================
// SESSION
// =============================================================================

/// The board state a host owns between events.
#[derive(Debug, Clone)]
pub struct BoardSession {
    entities: EntityStore,
    selection: SelectionState,
    /// Rebuilt whenever `selection` changes.
    lookup: SelectionLookup,
    drag: DragSession,
    gestures: GestureMapper,
}

impl BoardSession {
    /// Create a session over `entities` for the running platform.
    #[must_use]
    pub fn new(entities: EntityStore) -> Self {
        Self::with_platform(entities, Platform::current())
    }

    /// Create a session over `entities` for an explicit platform.
    #[must_use]
    pub fn with_platform(entities: EntityStore, platform: Platform) -> Self {
        Self {
            entities,
            selection: SelectionState::new(),
            lookup: SelectionLookup::default(),
            drag: DragSession::default(),
            gestures: GestureMapper::new(platform),
        }
    }

    /// Current board.
    #[must_use]
    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Current drag state.
    #[must_use]
    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    /// Platform used to interpret modifier keys.
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.gestures.platform()
    }

    /// Check if a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.dragging_id.is_some()
    }

    // =========================================================================
    // SELECTION EVENTS
    // =========================================================================

    /// Run a selection action. Returns whether the selection changed.
    pub fn dispatch(&mut self, action: &SelectionAction) -> bool {
        let next = self.selection.reduce(&self.entities, action);
        self.adopt_selection(next)
    }

    /// Handle a gesture on an item.
    ///
    /// Returns `true` when the gesture was consumed; the host must then not
    /// forward the same event as an outside gesture.
    pub fn on_item_gesture(&mut self, item: &ItemId, gesture: &ItemGesture) -> bool {
        match self.gestures.item_action(item, gesture) {
            Some(action) => {
                tracing::trace!(item = %item, ?action, "item gesture");
                self.dispatch(&action);
                true
            }
            None => false,
        }
    }

    /// Handle a gesture that did not land on any item.
    pub fn on_outside_gesture(&mut self, gesture: &OutsideGesture) {
        if let Some(action) = self.gestures.outside_action(gesture) {
            if self.dispatch(&action) {
                tracing::debug!(?gesture, "selection cleared by outside interaction");
            }
        }
    }

    // =========================================================================
    // DRAG EVENTS
    // =========================================================================

    /// A drag began.
    pub fn on_drag_start(&mut self, start: &DragStart) {
        self.dispatch(&SelectionAction::CollapseToSingleOnDragStart(
            start.draggable_id.clone(),
        ));
        self.drag = DragSession {
            dragging_id: Some(start.draggable_id.clone()),
        };

        tracing::debug!(
            item = %start.draggable_id,
            selected = self.selection.len(),
            "drag started"
        );
    }

    /// A drag ended.
    ///
    /// The drag state is cleared even when the reorder reports an error.
    pub fn on_drag_end(&mut self, result: &DropResult) -> Result<(), BoardError> {
        self.drag = DragSession::default();

        let destination = match (&result.destination, result.reason) {
            (Some(destination), DropReason::Drop) => destination,
            _ => {
                tracing::debug!(item = %result.draggable_id, "drag cancelled");
                return Ok(());
            }
        };

        let processed = ReorderEngine::reorder(
            &self.entities,
            &self.selection,
            &result.source,
            destination,
        )?;

        self.entities = processed.entities;
        self.adopt_selection(processed.selection);

        tracing::debug!(
            item = %result.draggable_id,
            column = %destination.column_id,
            index = destination.index,
            "drag completed"
        );
        Ok(())
    }

    // =========================================================================
    // RENDER HINTS
    // =========================================================================

    /// Check if an item is selected.
    #[must_use]
    pub fn is_selected(&self, item: &ItemId) -> bool {
        self.lookup.contains(item)
    }

    /// Check if an item should render as a ghost of the dragged group.
    #[must_use]
    pub fn is_ghosting(&self, item: &ItemId) -> bool {
        match &self.drag.dragging_id {
            Some(dragging) => dragging != item && self.lookup.contains(item),
            None => false,
        }
    }

    /// Count badge for the dragged item when more than one item is selected.
    #[must_use]
    pub fn selection_badge(&self, item: &ItemId) -> Option<usize> {
        let count = self.selection.len();
        match &self.drag.dragging_id {
            Some(dragging) if dragging == item && count >= BADGE_MIN_SELECTION => Some(count),
            _ => None,
        }
    }

    /// Render hints for one column.
    pub fn column_view(&self, id: &ColumnId) -> Result<ColumnView<'_>, BoardError> {
        let column = self.entities.column(id)?;
        let items = self
            .entities
            .items_in(id)?
            .into_iter()
            .enumerate()
            .map(|(index, item)| ItemView {
                item,
                index,
                is_selected: self.is_selected(&item.id),
                is_ghosting: self.is_ghosting(&item.id),
                selection_badge: self.selection_badge(&item.id),
            })
            .collect();
        Ok(ColumnView { column, items })
    }

    /// Render hints for every column in display order.
    pub fn board_view(&self) -> Result<Vec<ColumnView<'_>>, BoardError> {
        self.entities
            .column_order
            .iter()
            .map(|id| self.column_view(id))
            .collect()
    }

    fn adopt_selection(&mut self, next: SelectionState) -> bool {
        if next == self.selection {
            return false;
        }
        self.lookup = next.lookup();
        self.selection = next;
        true
    }
}

// =============================================================================
// TESTS
// =============================================================================
