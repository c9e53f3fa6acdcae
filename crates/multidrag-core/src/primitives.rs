//! # Primitives
//!
//! Compiled-in constants for the multidrag core.

/// Mouse button number of the primary button.
///
/// Item clicks with any other button never change the selection.
pub const PRIMARY_BUTTON: u16 = 0;

/// Key name that triggers selection from the keyboard on a focused item.
pub const SELECT_KEY: &str = "Enter";

/// Key name that clears the selection when pressed anywhere.
pub const CLEAR_KEY: &str = "Escape";

/// Minimum selection size for the dragged item to show a count badge.
pub const BADGE_MIN_SELECTION: usize = 2;

/// Number of items on the demo board.
pub const DEMO_ITEM_COUNT: usize = 20;

/// Prefix of demo item ids (`task-0`, `task-1`, ...).
pub const DEMO_ITEM_PREFIX: &str = "task-";

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum number of items accepted in a host-supplied board.
///
/// Boards larger than this are rejected at the boundary by the host.
pub const MAX_BOARD_ITEMS: usize = 100_000;

/// Maximum number of columns accepted in a host-supplied board.
pub const MAX_BOARD_COLUMNS: usize = 1000;
