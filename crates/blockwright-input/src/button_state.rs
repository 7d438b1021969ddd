//! Press/release edge tracking for keys.

/// State of a key.
///
/// Key events arrive one at a time, so every transition reports whether it
/// was an edge. OS auto-repeat produces presses on a key that is already
/// down; those are not edges and must not re-trigger shortcuts.
///
/// ```text
/// Released ─press()─> JustPressed ─settle()─> Pressed
///     ^                                          │
///     │                                       release()
///     │                                          v
///     └───────────settle()─────────────── JustReleased
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    /// Pressed by the latest event for this key.
    JustPressed,
    /// Held down.
    Pressed,
    /// Released by the latest event for this key.
    JustReleased,
    #[default]
    Released,
}

impl ButtonState {
    #[inline]
    #[must_use]
    pub const fn is_pressed(self) -> bool {
        matches!(self, Self::JustPressed | Self::Pressed)
    }

    /// Press. Returns `true` when the key was up before.
    #[inline]
    pub fn press(&mut self) -> bool {
        if self.is_pressed() {
            self.settle();
            false
        } else {
            *self = Self::JustPressed;
            true
        }
    }

    /// Release. Returns `true` when the key was down before.
    #[inline]
    pub fn release(&mut self) -> bool {
        if self.is_pressed() {
            *self = Self::JustReleased;
            true
        } else {
            self.settle();
            false
        }
    }

    /// Drop the "just" part of the state.
    #[inline]
    pub fn settle(&mut self) {
        match *self {
            Self::JustPressed => *self = Self::Pressed,
            Self::JustReleased => *self = Self::Released,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_report_edges() {
        let mut state = ButtonState::Released;
        assert!(state.press());
        assert_eq!(state, ButtonState::JustPressed);

        // Auto-repeat.
        assert!(!state.press());
        assert_eq!(state, ButtonState::Pressed);

        assert!(state.release());
        assert_eq!(state, ButtonState::JustReleased);
        assert!(!state.is_pressed());

        assert!(!state.release());
        assert_eq!(state, ButtonState::Released);
    }
}
