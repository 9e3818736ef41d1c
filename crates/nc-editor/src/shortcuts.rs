//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. The map lives
//! in Rust so every host resolves keys the same way.

use crate::input::Modifiers;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Edit ──
    Delete,
    /// Abort the active gesture, or clear the selection when idle.
    Cancel,
    SelectAll,
    Copy,
    Cut,
    Paste,
    /// Begin editing the single selected node.
    Edit,
    /// Ask the generator for ideas from the single selected node.
    Generate,

    // ── View ──
    ZoomIn,
    ZoomOut,
    ZoomReset,
}

/// Resolves key events into shortcut actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘,
/// on other platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"c"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(key: &str, modifiers: &Modifiers) -> Option<ShortcutAction> {
        if modifiers.command() {
            return match key {
                "c" | "C" => Some(ShortcutAction::Copy),
                "x" | "X" => Some(ShortcutAction::Cut),
                "v" | "V" => Some(ShortcutAction::Paste),
                "a" | "A" => Some(ShortcutAction::SelectAll),
                "g" | "G" => Some(ShortcutAction::Generate),
                "=" | "+" => Some(ShortcutAction::ZoomIn),
                "-" => Some(ShortcutAction::ZoomOut),
                "0" => Some(ShortcutAction::ZoomReset),
                _ => None,
            };
        }

        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Escape" => Some(ShortcutAction::Cancel),
            "Enter" => Some(ShortcutAction::Edit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_single_keys() {
        let none = Modifiers::NONE;
        assert_eq!(ShortcutMap::resolve("Delete", &none), Some(ShortcutAction::Delete));
        assert_eq!(ShortcutMap::resolve("Backspace", &none), Some(ShortcutAction::Delete));
        assert_eq!(ShortcutMap::resolve("Escape", &none), Some(ShortcutAction::Cancel));
        assert_eq!(ShortcutMap::resolve("Enter", &none), Some(ShortcutAction::Edit));
        assert_eq!(ShortcutMap::resolve("c", &none), None);
    }

    #[test]
    fn resolve_command_combos() {
        let ctrl = Modifiers::CTRL;
        let meta = Modifiers {
            meta: true,
            ..Modifiers::NONE
        };
        assert_eq!(ShortcutMap::resolve("c", &ctrl), Some(ShortcutAction::Copy));
        assert_eq!(ShortcutMap::resolve("V", &meta), Some(ShortcutAction::Paste));
        assert_eq!(ShortcutMap::resolve("x", &meta), Some(ShortcutAction::Cut));
        assert_eq!(ShortcutMap::resolve("=", &ctrl), Some(ShortcutAction::ZoomIn));
        assert_eq!(ShortcutMap::resolve("0", &ctrl), Some(ShortcutAction::ZoomReset));
        assert_eq!(ShortcutMap::resolve("g", &ctrl), Some(ShortcutAction::Generate));
    }

    #[test]
    fn command_delete_is_unbound() {
        assert_eq!(ShortcutMap::resolve("Delete", &Modifiers::CTRL), None);
    }
}
