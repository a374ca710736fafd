//! Platform-specific key bindings

use crossterm::event::KeyModifiers;

/// Modifier that, besides Ctrl, triggers the submit/save shortcut.
/// On macOS this is Cmd, elsewhere it is Ctrl again.
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Label for the submit/save shortcut in hints
#[cfg(target_os = "macos")]
pub const SUBMIT_SHORTCUT: &str = "Ctrl/Cmd+S";

#[cfg(not(target_os = "macos"))]
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Window for the second Ctrl+C press that quits
pub const QUIT_CONFIRM_WINDOW_MS: u64 = 1500;
