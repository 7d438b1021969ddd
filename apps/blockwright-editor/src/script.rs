//! Input scripts replayed through the editor.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context};
use blockwright_app::{CameraSink, Editor, RayCaster, SceneSink, ToolMode};
use blockwright_input::{ElementState, GestureEvent, KeyCode, PointerButton};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Mouse button in a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    #[default]
    Primary,
    Secondary,
}

impl From<Button> for PointerButton {
    fn from(button: Button) -> Self {
        match button {
            Button::Primary => Self::Primary,
            Button::Secondary => Self::Secondary,
        }
    }
}

/// One scripted input. Times are milliseconds from the start of the script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    MouseDown {
        x: f32,
        y: f32,
        t_ms: u64,
        #[serde(default)]
        button: Button,
    },
    MouseMove { x: f32, y: f32, t_ms: u64 },
    MouseUp { x: f32, y: f32, t_ms: u64 },
    TouchDown { id: u64, x: f32, y: f32, t_ms: u64 },
    TouchMove { id: u64, x: f32, y: f32, t_ms: u64 },
    TouchUp { id: u64, x: f32, y: f32, t_ms: u64 },
    Wheel { delta: f32 },
    /// Key by winit code name, e.g. `"Escape"` or `"Digit2"`.
    Key {
        key: String,
        #[serde(default = "default_pressed")]
        pressed: bool,
    },
    Tool { tool: ToolMode },
    Color { index: usize },
    Tick {
        #[serde(default = "default_ticks")]
        count: u32,
    },
    Resize { width: u32, height: u32 },
}

const fn default_pressed() -> bool {
    true
}

const fn default_ticks() -> u32 {
    1
}

impl Step {
    /// Feed this step to `editor`.
    pub fn apply<R, S, C>(&self, editor: &mut Editor<R, S, C>) -> anyhow::Result<()>
    where
        R: RayCaster,
        S: SceneSink,
        C: CameraSink,
    {
        let ms = Duration::from_millis;
        match self {
            Self::MouseDown { x, y, t_ms, button } => editor.handle_gesture_event(
                &GestureEvent::mouse_down((*button).into(), Vec2::new(*x, *y), ms(*t_ms)),
            ),
            Self::MouseMove { x, y, t_ms } => {
                editor.handle_gesture_event(&GestureEvent::mouse_move(Vec2::new(*x, *y), ms(*t_ms)));
            }
            Self::MouseUp { x, y, t_ms } => {
                editor.handle_gesture_event(&GestureEvent::mouse_up(Vec2::new(*x, *y), ms(*t_ms)));
            }
            Self::TouchDown { id, x, y, t_ms } => editor
                .handle_gesture_event(&GestureEvent::touch_down(*id, Vec2::new(*x, *y), ms(*t_ms))),
            Self::TouchMove { id, x, y, t_ms } => editor
                .handle_gesture_event(&GestureEvent::touch_move(*id, Vec2::new(*x, *y), ms(*t_ms))),
            Self::TouchUp { id, x, y, t_ms } => editor
                .handle_gesture_event(&GestureEvent::touch_up(*id, Vec2::new(*x, *y), ms(*t_ms))),
            Self::Wheel { delta } => {
                editor.handle_gesture_event(&GestureEvent::Wheel { delta: *delta });
            }
            Self::Key { key, pressed } => {
                let Some(code) = parse_key(key) else {
                    bail!("unknown key {key:?}");
                };
                let state = if *pressed {
                    ElementState::Pressed
                } else {
                    ElementState::Released
                };
                editor.handle_key(code, state);
            }
            Self::Tool { tool } => editor.set_tool(*tool),
            Self::Color { index } => editor.set_color(*index)?,
            Self::Tick { count } => {
                for _ in 0..*count {
                    editor.tick();
                }
            }
            Self::Resize { width, height } => editor.resize(*width, *height),
        }
        Ok(())
    }
}

/// Keys the editor has shortcuts for, plus shift.
fn parse_key(name: &str) -> Option<KeyCode> {
    Some(match name {
        "Escape" => KeyCode::Escape,
        "Delete" => KeyCode::Delete,
        "Backspace" => KeyCode::Backspace,
        "Digit1" => KeyCode::Digit1,
        "Digit2" => KeyCode::Digit2,
        "Digit3" => KeyCode::Digit3,
        "Digit4" => KeyCode::Digit4,
        "KeyT" => KeyCode::KeyT,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ShiftRight" => KeyCode::ShiftRight,
        _ => return None,
    })
}

/// Load a JSON array of steps.
pub fn load(path: &Path) -> anyhow::Result<Vec<Step>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing script {}", path.display()))
}

/// Built-in session for a screen of size `viewport`: build a small
/// structure, look around, then select and delete part of it.
#[must_use]
pub fn demo(viewport: Vec2) -> Vec<Step> {
    let c = viewport * 0.5;
    let tap = |x: f32, y: f32, t_ms: u64| {
        [
            Step::MouseDown {
                x,
                y,
                t_ms,
                button: Button::Primary,
            },
            Step::MouseUp {
                x,
                y,
                t_ms: t_ms + 60,
            },
        ]
    };
    let key = |key: &str, pressed: bool| Step::Key {
        key: key.to_string(),
        pressed,
    };

    let mut steps = vec![Step::MouseMove {
        x: c.x,
        y: c.y,
        t_ms: 0,
    }];
    steps.extend(tap(c.x, c.y, 100));
    steps.extend(tap(c.x, c.y, 1_000));
    steps.extend([key("Digit2", true), key("Digit2", false)]);
    steps.extend(tap(c.x + 80.0, c.y, 2_000));

    // Orbit drag.
    steps.push(Step::MouseDown {
        x: c.x,
        y: c.y,
        t_ms: 3_000,
        button: Button::Primary,
    });
    for i in 1..=10u16 {
        steps.push(Step::MouseMove {
            x: c.x + f32::from(i) * 12.0,
            y: c.y - f32::from(i) * 2.0,
            t_ms: 3_000 + u64::from(i) * 16,
        });
    }
    steps.push(Step::MouseUp {
        x: c.x + 120.0,
        y: c.y - 20.0,
        t_ms: 3_200,
    });
    steps.push(Step::Wheel { delta: -300.0 });

    // Pinch out to zoom back.
    steps.extend([
        Step::TouchDown {
            id: 1,
            x: c.x - 50.0,
            y: c.y,
            t_ms: 4_000,
        },
        Step::TouchDown {
            id: 2,
            x: c.x + 50.0,
            y: c.y,
            t_ms: 4_010,
        },
        Step::TouchMove {
            id: 2,
            x: c.x + 100.0,
            y: c.y,
            t_ms: 4_050,
        },
        Step::TouchUp {
            id: 2,
            x: c.x + 100.0,
            y: c.y,
            t_ms: 4_100,
        },
        Step::TouchUp {
            id: 1,
            x: c.x - 50.0,
            y: c.y,
            t_ms: 4_110,
        },
    ]);

    // Select what is under the centre and delete it.
    steps.extend([key("Escape", true), key("Escape", false)]);
    steps.extend(tap(c.x, c.y, 5_000));
    steps.extend([key("Delete", true), key("Delete", false)]);
    steps.push(Step::Tick { count: 30 });
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_steps_with_defaults() {
        let steps: Vec<Step> = serde_json::from_str(
            r#"[
                { "op": "mouse_down", "x": 1, "y": 2, "t_ms": 3 },
                { "op": "key", "key": "Escape" },
                { "op": "tool", "tool": "delete" },
                { "op": "tick" }
            ]"#,
        )
        .unwrap();
        assert_eq!(
            steps,
            vec![
                Step::MouseDown {
                    x: 1.0,
                    y: 2.0,
                    t_ms: 3,
                    button: Button::Primary
                },
                Step::Key {
                    key: "Escape".to_string(),
                    pressed: true
                },
                Step::Tool {
                    tool: ToolMode::Delete
                },
                Step::Tick { count: 1 },
            ]
        );
    }

    #[test]
    fn demo_keys_are_known() {
        for step in demo(Vec2::new(800.0, 600.0)) {
            if let Step::Key { key, .. } = step {
                assert!(parse_key(&key).is_some(), "{key}");
            }
        }
    }
}
