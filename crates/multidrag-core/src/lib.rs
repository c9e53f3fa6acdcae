//! # multidrag-core
//!
//! Selection and reorder engine for a multi-column task board - THE LOGIC.
//!
//! The crate covers the two parts of a drag-and-drop board that carry real
//! invariants:
//! - a Finder-style multi-selection state machine ([`selection`])
//! - a reorder engine that moves one item or a whole selected group between
//!   ordered columns ([`reorder`])
//!
//! Rendering, pointer tracking and event registration belong to the host. The
//! host feeds plain data in and adopts the plain data that comes back;
//! [`session::BoardSession`] is a ready-made host-side owner for that state.
//!
//! ## Architectural Constraints
//!
//! - Pure and synchronous: no I/O, no async, no global state
//! - Every operation takes a snapshot by reference and returns a new snapshot
//! - Deterministic collections only (`BTreeMap`/`BTreeSet`)
//! - No panics: precondition violations surface as [`BoardError`]
//!
//! ## Example
//!
//! ```
//! use multidrag_core::{DraggableLocation, ItemId, ReorderEngine, SelectionState, seed};
//!
//! let board = seed::demo_board();
//! let selection = SelectionState::new()
//!     .plain_select(&"task-1".into())
//!     .toggle_in_group(&"task-3".into());
//!
//! let result = ReorderEngine::reorder(
//!     &board,
//!     &selection,
//!     &DraggableLocation::new("todo", 1),
//!     &DraggableLocation::new("done", 0),
//! )
//! .expect("valid drop");
//!
//! let done = result.entities.column(&"done".into()).expect("column");
//! assert_eq!(done.item_ids, vec![ItemId::new("task-1"), ItemId::new("task-3")]);
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod gesture;
pub mod primitives;
pub mod reorder;
pub mod seed;
pub mod selection;
pub mod session;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{BoardError, Column, ColumnId, DraggableLocation, Item, ItemId};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use gesture::{GestureMapper, ItemGesture, Modifiers, OutsideGesture, Platform};
pub use reorder::{ReorderEngine, ReorderResult};
pub use selection::{SelectionAction, SelectionLookup, SelectionState};
pub use session::{
    BoardSession, ColumnView, DragSession, DragStart, DropReason, DropResult, ItemView,
};
pub use store::EntityStore;
