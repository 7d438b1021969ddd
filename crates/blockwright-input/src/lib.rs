//! Input handling for Blockwright.
//!
//! Mouse and touch are handled by one gesture model so that both channels
//! share thresholds and produce the same intents.
//!
//! # Core Types
//!
//! - [`InputAdapter`]: converts winit window events into [`InputEvent`]s
//! - [`GestureMachine`]: classifies pointer streams into taps, drags and pinches
//! - [`KeyboardState`]: tracks held keys and [`Modifiers`]
//! - [`ShortcutMap`]: maps key edges to [`EditorAction`]s
//!
//! # Usage
//!
//! ```ignore
//! use blockwright_input::{GestureMachine, InputAdapter, InputEvent};
//!
//! let mut adapter = InputAdapter::new();
//! let mut gestures = GestureMachine::default();
//!
//! fn on_event(event: &WindowEvent) {
//!     if let Some(InputEvent::Pointer(pointer)) = adapter.process_window_event(event) {
//!         for effect in gestures.handle(&pointer) {
//!             // Drive the camera, ghost preview and taps.
//!         }
//!     }
//! }
//! ```

mod adapter;
mod button_state;
mod event;
pub mod gesture;
mod keyboard;
mod shortcuts;

pub use adapter::{InputAdapter, InputEvent, WHEEL_LINE_UNITS};
pub use button_state::ButtonState;
pub use event::{Channel, ContactId, GestureEvent, PointerButton, MOUSE_CONTACT};
pub use gesture::{Effects, GestureConfig, GestureEffect, GestureMachine, GesturePhase, Tap};
pub use keyboard::{KeyEdge, KeyboardState, Modifiers};
pub use shortcuts::{EditorAction, ShortcutMap, ShortcutMapBuilder};

// Re-export winit types commonly used with input
pub use winit::event::{ElementState, WindowEvent};
pub use winit::keyboard::KeyCode;
