//! Keyboard shortcuts for the magnifier window.
//!
//! Bindings are plain keys by default (Escape, F11, Tab, R); modifiers are supported so a
//! binding can be made stricter without changing the matching code.

use egui::{Key, Modifiers};
use std::fmt;
use tracing::trace;

/// Actions that can be triggered by keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutAction {
    /// Close the window and exit
    Quit,
    /// Toggle fullscreen mode
    ToggleFullscreen,
    /// Show/hide the diagnostic overlay
    ToggleOverlay,
    /// Animate back to 1:1 zoom on the selected monitor
    ResetView,
}

/// Modifier keys relevant to shortcut matching.
///
/// `command` folds Ctrl and the macOS Command key together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifier {
    pub alt: bool,
    pub command: bool,
    pub shift: bool,
}

impl Modifier {
    pub const NONE: Self = Self {
        alt: false,
        command: false,
        shift: false,
    };

    pub const COMMAND: Self = Self {
        alt: false,
        command: true,
        shift: false,
    };
}

impl From<Modifiers> for Modifier {
    fn from(m: Modifiers) -> Self {
        Self {
            alt: m.alt,
            command: m.ctrl || m.command || m.mac_cmd,
            shift: m.shift,
        }
    }
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    /// Required modifiers, matched exactly
    pub modifiers: Modifier,
    /// The key that must be pressed
    pub key: Key,
    /// Description for help output
    pub description: String,
}

impl Shortcut {
    pub fn new(modifiers: Modifier, key: Key, description: &str) -> Self {
        Self {
            modifiers,
            key,
            description: description.to_string(),
        }
    }

    /// Create shortcut with no modifiers.
    pub fn key_only(key: Key, description: &str) -> Self {
        Self::new(Modifier::NONE, key, description)
    }

    /// Check if this shortcut matches a key press with the given modifiers.
    pub fn matches(&self, key: Key, modifiers: Modifier) -> bool {
        self.key == key && self.modifiers == modifiers
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.modifiers.command {
            parts.push("Ctrl");
        }
        if self.modifiers.alt {
            parts.push("Alt");
        }
        if self.modifiers.shift {
            parts.push("Shift");
        }
        parts.push(self.key.name());
        write!(f, "{}", parts.join("+"))
    }
}

/// Configuration and management of keyboard shortcuts.
#[derive(Debug, Clone)]
pub struct ShortcutsConfig {
    /// Bindings in lookup order; the first match wins
    shortcuts: Vec<(Shortcut, ShortcutAction)>,
    enabled: bool,
}

impl Default for ShortcutsConfig {
    fn default() -> Self {
        let mut config = Self {
            shortcuts: Vec::new(),
            enabled: true,
        };
        config.load_defaults();
        config
    }
}

impl ShortcutsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Add a binding, replacing any existing binding for the same key combination.
    pub fn add_shortcut(&mut self, shortcut: Shortcut, action: ShortcutAction) {
        self.shortcuts
            .retain(|(s, _)| !(s.key == shortcut.key && s.modifiers == shortcut.modifiers));
        self.shortcuts.push((shortcut, action));
    }

    pub fn shortcuts_for_action(&self, action: ShortcutAction) -> Vec<&Shortcut> {
        self.shortcuts
            .iter()
            .filter(|(_, a)| *a == action)
            .map(|(s, _)| s)
            .collect()
    }

    pub fn all_shortcuts(&self) -> impl Iterator<Item = &(Shortcut, ShortcutAction)> {
        self.shortcuts.iter()
    }

    /// Action bound to a key press, if any.
    pub fn action_for(&self, key: Key, modifiers: Modifier) -> Option<ShortcutAction> {
        if !self.enabled {
            return None;
        }
        self.shortcuts
            .iter()
            .find(|(s, _)| s.matches(key, modifiers))
            .map(|(shortcut, action)| {
                trace!("Shortcut triggered: {} -> {:?}", shortcut, action);
                *action
            })
    }

    /// Actions for every fresh key press in a frame's events, in event order.
    ///
    /// Auto-repeat presses are ignored so holding F11 does not flicker fullscreen.
    pub fn process_events(&self, events: &[egui::Event]) -> Vec<ShortcutAction> {
        events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    modifiers,
                    ..
                } => self.action_for(*key, Modifier::from(*modifiers)),
                _ => None,
            })
            .collect()
    }

    /// Load the default bindings.
    pub fn load_defaults(&mut self) {
        self.add_shortcut(Shortcut::key_only(Key::Escape, "Quit"), ShortcutAction::Quit);
        self.add_shortcut(
            Shortcut::new(Modifier::COMMAND, Key::Q, "Quit"),
            ShortcutAction::Quit,
        );
        self.add_shortcut(
            Shortcut::key_only(Key::F11, "Toggle fullscreen"),
            ShortcutAction::ToggleFullscreen,
        );
        self.add_shortcut(
            Shortcut::key_only(Key::Tab, "Toggle overlay"),
            ShortcutAction::ToggleOverlay,
        );
        self.add_shortcut(
            Shortcut::key_only(Key::R, "Reset view"),
            ShortcutAction::ResetView,
        );
    }
}
