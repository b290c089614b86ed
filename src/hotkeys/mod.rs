//! Hotkey system
//!
//! Keyboard shortcuts for the timeline window.
//!
//! - **HotkeyAction**: what a shortcut does, independent of the key
//! - **HotkeyContext**: app state that gates shortcuts
//! - **handle_hotkey()**: maps a key event to an action
//!
//! New bindings go in `handle_hotkey()`; the App component executes the action.

use dioxus::prelude::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    /// Step the timeline zoom in
    ZoomIn,
    /// Step the timeline zoom out
    ZoomOut,
    /// Scale 1 with the content centered
    ResetView,
    /// Close the detail panel
    ClearSelection,
}

#[derive(Debug, Clone, Default)]
pub struct HotkeyContext {
    /// Whether a civilization is selected (detail panel open)
    pub has_selection: bool,
    /// Whether an input field has focus (suppresses all hotkeys)
    pub input_focused: bool,
}

#[derive(Debug, Clone)]
pub enum HotkeyResult {
    /// A hotkey matched and should be executed
    Action(HotkeyAction),
    /// No binding for this key/context combination
    NoMatch,
    /// Would match but an input field has focus
    Suppressed,
}

/// Maps a key event to an action, considering the current context.
///
/// Shortcuts with ctrl/meta/alt held are left to the webview.
pub fn handle_hotkey(
    key: &Key,
    _shift: bool,
    ctrl: bool,
    alt: bool,
    meta: bool,
    context: &HotkeyContext,
) -> HotkeyResult {
    if context.input_focused {
        return HotkeyResult::Suppressed;
    }
    if ctrl || alt || meta {
        return HotkeyResult::NoMatch;
    }

    match key {
        // "=" is unshifted "+" on most layouts
        Key::Character(c) if c == "+" || c == "=" => HotkeyResult::Action(HotkeyAction::ZoomIn),
        Key::Character(c) if c == "-" || c == "_" => HotkeyResult::Action(HotkeyAction::ZoomOut),
        Key::Character(c) if c == "0" => HotkeyResult::Action(HotkeyAction::ResetView),
        Key::Escape if context.has_selection => {
            HotkeyResult::Action(HotkeyAction::ClearSelection)
        }
        _ => HotkeyResult::NoMatch,
    }
}
