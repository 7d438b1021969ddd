//! Translation of winit window events into editor input.

use std::time::{Duration, Instant};

use glam::Vec2;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, Touch, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::event::{GestureEvent, PointerButton};
use crate::keyboard::Modifiers;

/// Wheel units per scrolled line, matching a browser's pixel-mode wheel.
pub const WHEEL_LINE_UNITS: f32 = 100.0;

/// Input the editor consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Pointer(GestureEvent),
    Key { key: KeyCode, state: ElementState },
    Modifiers(Modifiers),
    /// The window lost focus; held keys are no longer reliable.
    FocusLost,
}

/// Converts winit events into [`InputEvent`]s stamped with time since the
/// adapter was created.
#[derive(Debug)]
pub struct InputAdapter {
    epoch: Instant,
    cursor: Vec2,
    /// Mouse button that opened the current mouse contact.
    held: Option<MouseButton>,
}

impl Default for InputAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl InputAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            cursor: Vec2::ZERO,
            held: None,
        }
    }

    /// Last known cursor position.
    #[must_use]
    pub const fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Convert a window event using the wall clock.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        let time = self.epoch.elapsed();
        self.process_window_event_at(event, time)
    }

    /// Convert a window event observed at `time`.
    pub fn process_window_event_at(
        &mut self,
        event: &WindowEvent,
        time: Duration,
    ) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.cursor_moved(to_vec2(*position), time))
            }
            WindowEvent::MouseInput { state, button, .. } => self.mouse_button(*button, *state, time),
            WindowEvent::MouseWheel { delta, .. } => Self::wheel(*delta),
            WindowEvent::Touch(touch) => Some(Self::touch(touch, time)),
            WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
                PhysicalKey::Code(key) => Some(InputEvent::Key {
                    key,
                    state: event.state,
                }),
                PhysicalKey::Unidentified(_) => None,
            },
            WindowEvent::ModifiersChanged(modifiers) => {
                Some(InputEvent::Modifiers(Modifiers::from(modifiers.state())))
            }
            WindowEvent::Focused(false) => {
                self.held = None;
                Some(InputEvent::FocusLost)
            }
            _ => None,
        }
    }

    pub fn cursor_moved(&mut self, position: Vec2, time: Duration) -> InputEvent {
        self.cursor = position;
        InputEvent::Pointer(GestureEvent::mouse_move(position, time))
    }

    /// Only the first button pressed opens a contact; other buttons pressed
    /// while it is held are ignored until it is released.
    pub fn mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
        time: Duration,
    ) -> Option<InputEvent> {
        match state {
            ElementState::Pressed => {
                if self.held.is_some() {
                    return None;
                }
                let pointer = pointer_button(button)?;
                self.held = Some(button);
                Some(InputEvent::Pointer(GestureEvent::mouse_down(
                    pointer,
                    self.cursor,
                    time,
                )))
            }
            ElementState::Released => {
                if self.held != Some(button) {
                    return None;
                }
                self.held = None;
                Some(InputEvent::Pointer(GestureEvent::mouse_up(self.cursor, time)))
            }
        }
    }

    /// Positive wheel values pull the camera back.
    #[allow(clippy::cast_possible_truncation)]
    fn wheel(delta: MouseScrollDelta) -> Option<InputEvent> {
        let delta = match delta {
            MouseScrollDelta::LineDelta(_, y) => -y * WHEEL_LINE_UNITS,
            MouseScrollDelta::PixelDelta(position) => -position.y as f32,
        };
        (delta != 0.0).then_some(InputEvent::Pointer(GestureEvent::Wheel { delta }))
    }

    fn touch(touch: &Touch, time: Duration) -> InputEvent {
        let position = to_vec2(touch.location);
        InputEvent::Pointer(match touch.phase {
            TouchPhase::Started => GestureEvent::touch_down(touch.id, position, time),
            TouchPhase::Moved => GestureEvent::touch_move(touch.id, position, time),
            TouchPhase::Ended | TouchPhase::Cancelled => {
                GestureEvent::touch_up(touch.id, position, time)
            }
        })
    }
}

const fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right | MouseButton::Middle => Some(PointerButton::Secondary),
        MouseButton::Back | MouseButton::Forward | MouseButton::Other(_) => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_vec2(position: PhysicalPosition<f64>) -> Vec2 {
    Vec2::new(position.x as f32, position.y as f32)
}
