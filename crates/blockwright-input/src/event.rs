//! Channel-agnostic pointer samples fed to the gesture machine.

use std::time::Duration;

use glam::Vec2;

/// Physical input channel a sample came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Mouse,
    Touch,
}

/// Pointer button that started a contact.
///
/// Touch contacts are always [`PointerButton::Primary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button or a finger.
    Primary,
    /// Right or middle mouse button.
    Secondary,
}

/// Identifier of one contact point (a finger, or the mouse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContactId(pub u64);

/// Contact id used for the mouse pointer.
pub const MOUSE_CONTACT: ContactId = ContactId(u64::MAX);

/// One raw input sample.
///
/// `time` is measured from an arbitrary epoch shared by all samples of a
/// session; only differences are used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// A contact touched down (finger placed, mouse button pressed).
    Down {
        channel: Channel,
        contact: ContactId,
        button: PointerButton,
        position: Vec2,
        time: Duration,
    },
    /// A contact moved. For the mouse this includes hovering with no button held.
    Move {
        channel: Channel,
        contact: ContactId,
        position: Vec2,
        time: Duration,
    },
    /// A contact lifted or was cancelled.
    Up {
        channel: Channel,
        contact: ContactId,
        position: Vec2,
        time: Duration,
    },
    /// Scroll wheel, in lines (positive pulls the camera back).
    Wheel { delta: f32 },
}

impl GestureEvent {
    /// Mouse button press at `position`.
    #[must_use]
    pub const fn mouse_down(button: PointerButton, position: Vec2, time: Duration) -> Self {
        Self::Down {
            channel: Channel::Mouse,
            contact: MOUSE_CONTACT,
            button,
            position,
            time,
        }
    }

    /// Mouse cursor movement.
    #[must_use]
    pub const fn mouse_move(position: Vec2, time: Duration) -> Self {
        Self::Move {
            channel: Channel::Mouse,
            contact: MOUSE_CONTACT,
            position,
            time,
        }
    }

    /// Mouse button release.
    #[must_use]
    pub const fn mouse_up(position: Vec2, time: Duration) -> Self {
        Self::Up {
            channel: Channel::Mouse,
            contact: MOUSE_CONTACT,
            position,
            time,
        }
    }

    /// Finger placed.
    #[must_use]
    pub const fn touch_down(id: u64, position: Vec2, time: Duration) -> Self {
        Self::Down {
            channel: Channel::Touch,
            contact: ContactId(id),
            button: PointerButton::Primary,
            position,
            time,
        }
    }

    /// Finger moved.
    #[must_use]
    pub const fn touch_move(id: u64, position: Vec2, time: Duration) -> Self {
        Self::Move {
            channel: Channel::Touch,
            contact: ContactId(id),
            position,
            time,
        }
    }

    /// Finger lifted.
    #[must_use]
    pub const fn touch_up(id: u64, position: Vec2, time: Duration) -> Self {
        Self::Up {
            channel: Channel::Touch,
            contact: ContactId(id),
            position,
            time,
        }
    }
}
