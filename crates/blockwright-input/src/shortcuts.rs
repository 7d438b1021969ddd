//! Keyboard shortcut mapping.

use blockwright_core::ColorIndex;
use hashbrown::HashMap;
use winit::keyboard::KeyCode;

use crate::keyboard::KeyEdge;

/// Editor command triggered from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    /// Enter select mode, or leave it when already selecting.
    ToggleSelectMode,
    DeleteSelected,
    SelectColor(ColorIndex),
    /// Render the structure translucent while held.
    SetTransparent(bool),
}

#[derive(Debug, Clone, Copy)]
struct Shortcut {
    on_press: EditorAction,
    on_release: Option<EditorAction>,
}

/// Maps keys to editor actions.
///
/// A key has at most one shortcut; binding it again replaces the old one.
#[derive(Debug, Default, Clone)]
pub struct ShortcutMap {
    shortcuts: HashMap<KeyCode, Shortcut>,
}

impl ShortcutMap {
    #[must_use]
    pub fn builder() -> ShortcutMapBuilder {
        ShortcutMapBuilder::default()
    }

    /// Stock editor bindings: Escape toggles select mode, Delete and
    /// Backspace delete the selection, 1 to 4 pick a colour and holding T
    /// makes the structure translucent.
    #[must_use]
    pub fn editor_defaults() -> Self {
        Self::builder()
            .bind(KeyCode::Escape, EditorAction::ToggleSelectMode)
            .bind_many(
                [KeyCode::Delete, KeyCode::Backspace],
                EditorAction::DeleteSelected,
            )
            .bind(KeyCode::Digit1, EditorAction::SelectColor(ColorIndex(0)))
            .bind(KeyCode::Digit2, EditorAction::SelectColor(ColorIndex(1)))
            .bind(KeyCode::Digit3, EditorAction::SelectColor(ColorIndex(2)))
            .bind(KeyCode::Digit4, EditorAction::SelectColor(ColorIndex(3)))
            .bind_hold(
                KeyCode::KeyT,
                EditorAction::SetTransparent(true),
                EditorAction::SetTransparent(false),
            )
            .build()
    }

    /// Fire `action` when `key` goes down.
    pub fn bind(&mut self, key: KeyCode, action: EditorAction) {
        self.shortcuts.insert(
            key,
            Shortcut {
                on_press: action,
                on_release: None,
            },
        );
    }

    /// Fire `on_press` when `key` goes down and `on_release` when it comes up.
    pub fn bind_hold(&mut self, key: KeyCode, on_press: EditorAction, on_release: EditorAction) {
        self.shortcuts.insert(
            key,
            Shortcut {
                on_press,
                on_release: Some(on_release),
            },
        );
    }

    /// Action for a key edge, if bound.
    #[must_use]
    pub fn resolve(&self, edge: KeyEdge) -> Option<EditorAction> {
        match edge {
            KeyEdge::Pressed(key) => self.shortcuts.get(&key).map(|s| s.on_press),
            KeyEdge::Released(key) => self.shortcuts.get(&key).and_then(|s| s.on_release),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }
}

/// Fluent builder for [`ShortcutMap`].
#[derive(Debug, Default)]
pub struct ShortcutMapBuilder {
    map: ShortcutMap,
}

impl ShortcutMapBuilder {
    #[must_use]
    pub fn bind(mut self, key: KeyCode, action: EditorAction) -> Self {
        self.map.bind(key, action);
        self
    }

    #[must_use]
    pub fn bind_many(mut self, keys: impl IntoIterator<Item = KeyCode>, action: EditorAction) -> Self {
        for key in keys {
            self.map.bind(key, action);
        }
        self
    }

    #[must_use]
    pub fn bind_hold(mut self, key: KeyCode, on_press: EditorAction, on_release: EditorAction) -> Self {
        self.map.bind_hold(key, on_press, on_release);
        self
    }

    #[must_use]
    pub fn build(self) -> ShortcutMap {
        self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_editor_keys() {
        let map = ShortcutMap::editor_defaults();
        assert_eq!(map.len(), 8);
        assert_eq!(
            map.resolve(KeyEdge::Pressed(KeyCode::Escape)),
            Some(EditorAction::ToggleSelectMode)
        );
        assert_eq!(
            map.resolve(KeyEdge::Pressed(KeyCode::Backspace)),
            Some(EditorAction::DeleteSelected)
        );
        assert_eq!(
            map.resolve(KeyEdge::Pressed(KeyCode::Digit3)),
            Some(EditorAction::SelectColor(ColorIndex(2)))
        );
        assert_eq!(map.resolve(KeyEdge::Released(KeyCode::Escape)), None);
        assert_eq!(map.resolve(KeyEdge::Pressed(KeyCode::KeyQ)), None);
    }

    #[test]
    fn hold_binding_fires_on_both_edges() {
        let map = ShortcutMap::editor_defaults();
        assert_eq!(
            map.resolve(KeyEdge::Pressed(KeyCode::KeyT)),
            Some(EditorAction::SetTransparent(true))
        );
        assert_eq!(
            map.resolve(KeyEdge::Released(KeyCode::KeyT)),
            Some(EditorAction::SetTransparent(false))
        );
    }

    #[test]
    fn rebinding_replaces() {
        assert!(ShortcutMap::default().is_empty());
        let map = ShortcutMap::builder()
            .bind(KeyCode::KeyX, EditorAction::DeleteSelected)
            .bind(KeyCode::KeyX, EditorAction::ToggleSelectMode)
            .build();
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.resolve(KeyEdge::Pressed(KeyCode::KeyX)),
            Some(EditorAction::ToggleSelectMode)
        );
    }
}
