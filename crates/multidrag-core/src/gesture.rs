//! # Gesture Dispatch
//!
//! Maps raw pointer, keyboard and touch input into [`SelectionAction`]s.
//!
//! Item gestures:
//! - Primary click or Enter with the group key held → toggle in group
//! - ... with Shift held → range select
//! - ... otherwise → plain select
//! - Touch end on an item → toggle in group
//!
//! The group key is Ctrl on Windows and Meta (Cmd) everywhere else.
//!
//! Outside gestures (pointer down or touch end away from any item, Escape)
//! clear the selection. An item gesture that maps to an action is consumed:
//! the host must not also report it as an outside gesture.

use crate::primitives::{CLEAR_KEY, PRIMARY_BUTTON, SELECT_KEY};
use crate::{ItemId, SelectionAction};
use serde::{Deserialize, Serialize};

// =============================================================================
// PLATFORM
// =============================================================================

/// Host platform, which decides the group-toggle modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Mac,
    #[default]
    Linux,
}

impl Platform {
    /// Platform of the running process.
    #[must_use]
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS name (as in `std::env::consts::OS`) to a platform.
    #[must_use]
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Self::Windows,
            "macos" | "ios" => Self::Mac,
            _ => Self::Linux,
        }
    }

    /// Check if the platform's group-toggle key is held.
    #[must_use]
    pub fn group_key_held(self, modifiers: Modifiers) -> bool {
        match self {
            Self::Windows => modifiers.ctrl,
            Self::Mac | Self::Linux => modifiers.meta,
        }
    }
}

// =============================================================================
// INPUT
// =============================================================================

/// Modifier keys held during a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            shift: false,
            ctrl: false,
            meta: false,
        }
    }

    /// Shift held.
    #[must_use]
    pub const fn shift() -> Self {
        Self {
            shift: true,
            ctrl: false,
            meta: false,
        }
    }

    /// Ctrl held.
    #[must_use]
    pub const fn ctrl() -> Self {
        Self {
            shift: false,
            ctrl: true,
            meta: false,
        }
    }

    /// Meta (Cmd) held.
    #[must_use]
    pub const fn meta() -> Self {
        Self {
            shift: false,
            ctrl: false,
            meta: true,
        }
    }
}

/// A gesture aimed at a specific item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemGesture {
    /// Mouse click. `button` follows DOM numbering (0 = primary).
    Click {
        #[serde(default)]
        button: u16,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Key pressed while the item has focus.
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
        /// The item itself is currently being dragged.
        #[serde(default)]
        dragging: bool,
    },
    /// Touch released on the item.
    TouchEnd,
}

/// A gesture that did not land on any item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutsideGesture {
    PointerDown,
    Key { key: String },
    TouchEnd,
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Maps gestures to selection actions for one platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureMapper {
    platform: Platform,
}

impl GestureMapper {
    /// Create a mapper for `platform`.
    #[must_use]
    pub const fn new(platform: Platform) -> Self {
        Self { platform }
    }

    /// The platform this mapper was built for.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Action for a gesture on `item`, or `None` if the gesture is ignored.
    #[must_use]
    pub fn item_action(&self, item: &ItemId, gesture: &ItemGesture) -> Option<SelectionAction> {
        match gesture {
            ItemGesture::Click { button, modifiers } => {
                if *button != PRIMARY_BUTTON {
                    return None;
                }
                Some(self.selection_for(item, *modifiers))
            }
            ItemGesture::Key {
                key,
                modifiers,
                dragging,
            } => {
                if *dragging || key != SELECT_KEY {
                    return None;
                }
                Some(self.selection_for(item, *modifiers))
            }
            ItemGesture::TouchEnd => Some(SelectionAction::ToggleInGroup(item.clone())),
        }
    }

    /// Action for a gesture away from all items.
    #[must_use]
    pub fn outside_action(&self, gesture: &OutsideGesture) -> Option<SelectionAction> {
        match gesture {
            OutsideGesture::PointerDown | OutsideGesture::TouchEnd => {
                Some(SelectionAction::ClearAll)
            }
            OutsideGesture::Key { key } if key == CLEAR_KEY => Some(SelectionAction::ClearAll),
            OutsideGesture::Key { .. } => None,
        }
    }

    fn selection_for(&self, item: &ItemId, modifiers: Modifiers) -> SelectionAction {
        if self.platform.group_key_held(modifiers) {
            return SelectionAction::ToggleInGroup(item.clone());
        }
        if modifiers.shift {
            return SelectionAction::RangeSelectTo(item.clone());
        }
        SelectionAction::PlainSelect(item.clone())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn click(modifiers: Modifiers) -> ItemGesture {
        ItemGesture::Click {
            button: PRIMARY_BUTTON,
            modifiers,
        }
    }

    fn item() -> ItemId {
        ItemId::new("task-1")
    }

    #[test]
    fn plain_click_selects() {
        let mapper = GestureMapper::new(Platform::Mac);
        assert_eq!(
            mapper.item_action(&item(), &click(Modifiers::none())),
            Some(SelectionAction::PlainSelect(item()))
        );
    }

    #[test]
    fn group_key_depends_on_platform() {
        let mac = GestureMapper::new(Platform::Mac);
        let windows = GestureMapper::new(Platform::Windows);

        assert_eq!(
            mac.item_action(&item(), &click(Modifiers::meta())),
            Some(SelectionAction::ToggleInGroup(item()))
        );
        assert_eq!(
            mac.item_action(&item(), &click(Modifiers::ctrl())),
            Some(SelectionAction::PlainSelect(item()))
        );
        assert_eq!(
            windows.item_action(&item(), &click(Modifiers::ctrl())),
            Some(SelectionAction::ToggleInGroup(item()))
        );
    }

    #[test]
    fn group_key_wins_over_shift() {
        let mapper = GestureMapper::new(Platform::Windows);
        let both = Modifiers {
            shift: true,
            ctrl: true,
            meta: false,
        };
        assert_eq!(
            mapper.item_action(&item(), &click(both)),
            Some(SelectionAction::ToggleInGroup(item()))
        );
    }

    #[test]
    fn shift_click_ranges() {
        let mapper = GestureMapper::new(Platform::Linux);
        assert_eq!(
            mapper.item_action(&item(), &click(Modifiers::shift())),
            Some(SelectionAction::RangeSelectTo(item()))
        );
    }

    #[test]
    fn secondary_button_ignored() {
        let mapper = GestureMapper::default();
        let gesture = ItemGesture::Click {
            button: 2,
            modifiers: Modifiers::none(),
        };
        assert_eq!(mapper.item_action(&item(), &gesture), None);
    }

    #[test]
    fn enter_selects_unless_dragging() {
        let mapper = GestureMapper::default();
        let enter = |dragging| ItemGesture::Key {
            key: "Enter".to_string(),
            modifiers: Modifiers::none(),
            dragging,
        };

        assert_eq!(
            mapper.item_action(&item(), &enter(false)),
            Some(SelectionAction::PlainSelect(item()))
        );
        assert_eq!(mapper.item_action(&item(), &enter(true)), None);

        let space = ItemGesture::Key {
            key: " ".to_string(),
            modifiers: Modifiers::none(),
            dragging: false,
        };
        assert_eq!(mapper.item_action(&item(), &space), None);
    }

    #[test]
    fn touch_toggles_in_group() {
        let mapper = GestureMapper::default();
        assert_eq!(
            mapper.item_action(&item(), &ItemGesture::TouchEnd),
            Some(SelectionAction::ToggleInGroup(item()))
        );
    }

    #[test]
    fn outside_gestures_clear() {
        let mapper = GestureMapper::default();
        assert_eq!(
            mapper.outside_action(&OutsideGesture::PointerDown),
            Some(SelectionAction::ClearAll)
        );
        assert_eq!(
            mapper.outside_action(&OutsideGesture::TouchEnd),
            Some(SelectionAction::ClearAll)
        );
        assert_eq!(
            mapper.outside_action(&OutsideGesture::Key {
                key: "Escape".to_string()
            }),
            Some(SelectionAction::ClearAll)
        );
        assert_eq!(
            mapper.outside_action(&OutsideGesture::Key {
                key: "a".to_string()
            }),
            None
        );
    }

    #[test]
    fn platform_from_os() {
        assert_eq!(Platform::from_os("windows"), Platform::Windows);
        assert_eq!(Platform::from_os("macos"), Platform::Mac);
        assert_eq!(Platform::from_os("linux"), Platform::Linux);
    }

    #[test]
    fn click_deserializes_with_defaults() {
        let gesture: ItemGesture = serde_json::from_str(r#"{"kind":"click"}"#).expect("parse");
        assert_eq!(gesture, click(Modifiers::none()));
    }
}
