//! Keyboard state and modifier flags.

use bitflags::bitflags;
use hashbrown::HashMap;
use winit::event::ElementState;
use winit::keyboard::{KeyCode, ModifiersState};

use crate::button_state::ButtonState;

bitflags! {
    /// Modifier keys held down.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const CTRL  = 0b0000_0010;
        const ALT   = 0b0000_0100;
        const SUPER = 0b0000_1000;
    }
}

impl Modifiers {
    #[inline]
    #[must_use]
    pub const fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    #[inline]
    #[must_use]
    pub const fn ctrl(self) -> bool {
        self.contains(Self::CTRL)
    }
}

impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        let mut modifiers = Self::empty();
        modifiers.set(Self::SHIFT, state.shift_key());
        modifiers.set(Self::CTRL, state.control_key());
        modifiers.set(Self::ALT, state.alt_key());
        modifiers.set(Self::SUPER, state.super_key());
        modifiers
    }
}

/// A key changed between up and down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEdge {
    Pressed(KeyCode),
    Released(KeyCode),
}

/// Keyboard state.
#[derive(Debug, Default)]
pub struct KeyboardState {
    keys: HashMap<KeyCode, ButtonState>,
    modifiers: Modifiers,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition. Returns the edge, or `None` for auto-repeat
    /// and stray releases.
    pub fn process_key(&mut self, key: KeyCode, state: ElementState) -> Option<KeyEdge> {
        let button = self.keys.entry(key).or_default();
        match state {
            ElementState::Pressed => button.press().then_some(KeyEdge::Pressed(key)),
            ElementState::Released => button.release().then_some(KeyEdge::Released(key)),
        }
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Modifiers as last reported, with held shift keys folded in.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        let mut modifiers = self.modifiers;
        if self.is_pressed(KeyCode::ShiftLeft) || self.is_pressed(KeyCode::ShiftRight) {
            modifiers |= Modifiers::SHIFT;
        }
        modifiers
    }

    #[must_use]
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|s| s.is_pressed())
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.modifiers = Modifiers::empty();
    }
}
