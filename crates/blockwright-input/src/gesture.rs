//! Gesture disambiguation.
//!
//! [`GestureMachine`] turns the raw pointer stream of both input channels into
//! editor intents. A contact starts out [`GesturePhase::Pending`]; it becomes a
//! tap if it lifts before travelling past the drag threshold, an orbit or pan
//! drag if it travels further, and a pinch once a second finger lands.
//!
//! ```text
//! Idle ─down─> Pending ─up─────────────> Idle (Tap)
//!                 │ ─move > threshold──> DraggingRotate | DraggingPan ─up─> Idle
//!                 └─second finger──────> TwoFinger ─either up─> Idle
//! ```
//!
//! The machine is a pure transition function: it never reads a clock and
//! never calls into the scene. Everything it wants done comes back as
//! [`Effects`].

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::event::{Channel, ContactId, GestureEvent, PointerButton};

/// Pointer travel in pixels that turns a press into a drag.
pub const DEFAULT_DRAG_THRESHOLD_PX: f32 = 8.0;
/// Longest press that still counts as a quick tap, in milliseconds.
pub const DEFAULT_TAP_BUDGET_MS: u64 = 400;
/// How long mouse input is ignored after a finger lifts, in milliseconds.
pub const DEFAULT_SYNTHETIC_COOLDOWN_MS: u64 = 500;
/// Orbit radians per pixel of drag.
pub const DEFAULT_ROTATE_SENSITIVITY: f32 = 0.01;
/// Camera distance per wheel unit.
pub const DEFAULT_WHEEL_ZOOM_SPEED: f32 = 0.01;

/// Pinch spans shorter than this are treated as degenerate.
const MIN_PINCH_SPAN_PX: f32 = 1.0;

/// Most effects a single event can produce.
pub const MAX_EFFECTS: usize = 4;

/// Thresholds and sensitivities shared by mouse and touch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Travel from the press point, in pixels, before a press becomes a drag.
    pub drag_threshold_px: f32,
    /// Longest press, in milliseconds, that may place a block.
    pub tap_budget_ms: u64,
    /// Mouse input ignored for this long after a finger lifts.
    pub synthetic_cooldown_ms: u64,
    /// Orbit radians per dragged pixel.
    pub rotate_sensitivity: f32,
    /// Camera distance per wheel unit.
    pub wheel_zoom_speed: f32,
    /// Turn a two-finger twist into yaw.
    pub two_finger_roll: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: DEFAULT_DRAG_THRESHOLD_PX,
            tap_budget_ms: DEFAULT_TAP_BUDGET_MS,
            synthetic_cooldown_ms: DEFAULT_SYNTHETIC_COOLDOWN_MS,
            rotate_sensitivity: DEFAULT_ROTATE_SENSITIVITY,
            wheel_zoom_speed: DEFAULT_WHEEL_ZOOM_SPEED,
            two_finger_roll: true,
        }
    }
}

impl GestureConfig {
    /// Tap budget as a duration.
    #[must_use]
    pub const fn tap_budget(&self) -> Duration {
        Duration::from_millis(self.tap_budget_ms)
    }

    /// Synthetic mouse cooldown as a duration.
    #[must_use]
    pub const fn synthetic_cooldown(&self) -> Duration {
        Duration::from_millis(self.synthetic_cooldown_ms)
    }
}

/// A completed tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tap {
    /// Screen position of the release.
    pub position: Vec2,
    pub channel: Channel,
    /// Time between press and release.
    pub held: Duration,
    /// `held` did not exceed the tap budget.
    pub within_budget: bool,
}

/// Something the editor should do in response to input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEffect {
    /// Recompute the ghost preview under this screen position.
    UpdateGhost { position: Vec2 },
    /// Hide the ghost preview.
    HideGhost,
    /// An orbit drag started.
    BeginOrbit,
    /// Rotate the camera, in radians.
    Orbit { d_yaw: f32, d_pitch: f32 },
    /// Slide the camera target by a screen-space delta in pixels.
    Pan { dx: f32, dy: f32 },
    /// Multiply the camera distance.
    Zoom { factor: f32 },
    /// Add to the camera distance.
    Dolly { delta: f32 },
    /// The pointer was tapped.
    Tap(Tap),
}

/// Inline list of effects produced by one event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Effects {
    items: [Option<GestureEffect>; MAX_EFFECTS],
    len: usize,
}

impl Effects {
    /// An empty list.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    fn push(&mut self, effect: GestureEffect) {
        debug_assert!(self.len < MAX_EFFECTS, "effect list overflow");
        if let Some(slot) = self.items.get_mut(self.len) {
            *slot = Some(effect);
            self.len += 1;
        }
    }

    /// Number of effects.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// The event changed nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate the effects in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &GestureEffect> {
        self.items.iter().flatten()
    }

    /// The tap in this list, if any.
    #[must_use]
    pub fn tap(&self) -> Option<Tap> {
        self.iter().find_map(|effect| match effect {
            GestureEffect::Tap(tap) => Some(*tap),
            _ => None,
        })
    }
}

impl IntoIterator for Effects {
    type Item = GestureEffect;
    type IntoIter = std::iter::Flatten<std::array::IntoIter<Option<GestureEffect>, MAX_EFFECTS>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter().flatten()
    }
}

/// Where the machine is in a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No contact is down.
    #[default]
    Idle,
    /// A contact is down but has not moved far enough to be a drag.
    Pending,
    DraggingRotate,
    DraggingPan,
    /// Two fingers are down.
    TwoFinger,
}

#[derive(Debug, Clone, Copy)]
struct Pinch {
    secondary: ContactId,
    primary_pos: Vec2,
    secondary_pos: Vec2,
}

impl Pinch {
    fn span(&self) -> f32 {
        self.primary_pos.distance(self.secondary_pos)
    }

    fn midpoint(&self) -> Vec2 {
        (self.primary_pos + self.secondary_pos) * 0.5
    }

    fn angle(&self) -> f32 {
        let d = self.secondary_pos - self.primary_pos;
        d.y.atan2(d.x)
    }
}

#[derive(Debug, Clone, Copy)]
struct GestureSession {
    channel: Channel,
    button: PointerButton,
    primary: ContactId,
    start_pos: Vec2,
    start_time: Duration,
    last_pos: Vec2,
    phase: GesturePhase,
    pinch: Option<Pinch>,
}

/// Gesture state machine for mouse and touch.
#[derive(Debug, Default)]
pub struct GestureMachine {
    config: GestureConfig,
    session: Option<GestureSession>,
    /// Contacts currently down, on either channel.
    contacts: Vec<ContactId>,
    last_touch_release: Option<Duration>,
}

impl GestureMachine {
    /// Create an idle machine.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Thresholds in use.
    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.session.map_or(GesturePhase::Idle, |s| s.phase)
    }

    /// Whether a camera drag or pinch is in progress.
    #[must_use]
    pub fn is_navigating(&self) -> bool {
        matches!(
            self.phase(),
            GesturePhase::DraggingRotate | GesturePhase::DraggingPan | GesturePhase::TwoFinger
        )
    }

    /// Feed one event and collect the resulting effects.
    pub fn handle(&mut self, event: &GestureEvent) -> Effects {
        match *event {
            GestureEvent::Down {
                channel,
                contact,
                button,
                position,
                time,
            } => self.on_down(channel, contact, button, position, time),
            GestureEvent::Move {
                channel,
                contact,
                position,
                time,
            } => self.on_move(channel, contact, position, time),
            GestureEvent::Up {
                channel,
                contact,
                position,
                time,
            } => self.on_up(channel, contact, position, time),
            GestureEvent::Wheel { delta } => self.on_wheel(delta),
        }
    }

    /// Drop any session and forget all contacts.
    pub fn reset(&mut self) {
        self.session = None;
        self.contacts.clear();
    }

    /// Mouse events are dropped while a touch session runs, and for a
    /// cooldown after a finger lifts unless they belong to a mouse session
    /// that was already underway.
    fn suppresses(&self, channel: Channel, time: Duration) -> bool {
        if channel != Channel::Mouse {
            return false;
        }
        match self.session {
            Some(session) if session.channel == Channel::Touch => true,
            Some(_) => false,
            None => self.last_touch_release.is_some_and(|released| {
                time.saturating_sub(released) < self.config.synthetic_cooldown()
            }),
        }
    }

    fn on_down(
        &mut self,
        channel: Channel,
        contact: ContactId,
        button: PointerButton,
        position: Vec2,
        time: Duration,
    ) -> Effects {
        let mut effects = Effects::none();
        if !position.is_finite() || self.contacts.contains(&contact) {
            return effects;
        }
        if self.suppresses(channel, time) {
            debug!(?channel, "suppressed synthetic pointer down");
            return effects;
        }
        self.contacts.push(contact);

        let Some(session) = self.session.as_mut() else {
            self.session = Some(GestureSession {
                channel,
                button,
                primary: contact,
                start_pos: position,
                start_time: time,
                last_pos: position,
                phase: GesturePhase::Pending,
                pinch: None,
            });
            debug!(?channel, ?button, "gesture pending");
            effects.push(GestureEffect::UpdateGhost { position });
            return effects;
        };

        // Third fingers and mixed-channel contacts are tracked but ignored.
        let second_finger = channel == Channel::Touch
            && session.channel == Channel::Touch
            && matches!(
                session.phase,
                GesturePhase::Pending | GesturePhase::DraggingRotate
            );
        if second_finger {
            session.phase = GesturePhase::TwoFinger;
            session.pinch = Some(Pinch {
                secondary: contact,
                primary_pos: session.last_pos,
                secondary_pos: position,
            });
            debug!("gesture two-finger");
            effects.push(GestureEffect::HideGhost);
        }
        effects
    }

    fn on_move(
        &mut self,
        channel: Channel,
        contact: ContactId,
        position: Vec2,
        time: Duration,
    ) -> Effects {
        let mut effects = Effects::none();
        if !position.is_finite() || self.suppresses(channel, time) {
            return effects;
        }
        let config = self.config;

        let Some(session) = &mut self.session else {
            if channel == Channel::Mouse {
                effects.push(GestureEffect::UpdateGhost { position });
            }
            return effects;
        };
        if session.channel != channel {
            return effects;
        }

        match session.phase {
            GesturePhase::Idle => {}
            GesturePhase::Pending if contact == session.primary => {
                let delta = position - session.last_pos;
                session.last_pos = position;
                if position.distance(session.start_pos) <= config.drag_threshold_px {
                    effects.push(GestureEffect::UpdateGhost { position });
                } else if session.button == PointerButton::Primary {
                    session.phase = GesturePhase::DraggingRotate;
                    debug!(?channel, "gesture rotate");
                    effects.push(GestureEffect::HideGhost);
                    effects.push(GestureEffect::BeginOrbit);
                    effects.push(orbit(delta, config.rotate_sensitivity));
                } else {
                    session.phase = GesturePhase::DraggingPan;
                    debug!(?channel, "gesture pan");
                    effects.push(GestureEffect::HideGhost);
                    effects.push(GestureEffect::Pan {
                        dx: delta.x,
                        dy: delta.y,
                    });
                }
            }
            GesturePhase::DraggingRotate if contact == session.primary => {
                let delta = position - session.last_pos;
                session.last_pos = position;
                effects.push(orbit(delta, config.rotate_sensitivity));
            }
            GesturePhase::DraggingPan if contact == session.primary => {
                let delta = position - session.last_pos;
                session.last_pos = position;
                effects.push(GestureEffect::Pan {
                    dx: delta.x,
                    dy: delta.y,
                });
            }
            GesturePhase::TwoFinger => {
                if let Some(pinch) = &mut session.pinch {
                    pinch_move(pinch, session.primary, contact, position, &config, &mut effects);
                }
            }
            // Moves from contacts that do not drive the current phase.
            _ => {}
        }
        effects
    }

    fn on_up(
        &mut self,
        channel: Channel,
        contact: ContactId,
        position: Vec2,
        time: Duration,
    ) -> Effects {
        let mut effects = Effects::none();
        // Suppressed or duplicate downs never register a contact, so their
        // releases end here.
        let Some(index) = self.contacts.iter().position(|c| *c == contact) else {
            return effects;
        };
        self.contacts.swap_remove(index);
        if channel == Channel::Touch {
            self.last_touch_release = Some(time);
        }

        if let Some(session) = self.session {
            let drives_session = session.channel == channel
                && (contact == session.primary
                    || session.pinch.is_some_and(|p| p.secondary == contact));
            if drives_session {
                self.session = None;
                if session.phase == GesturePhase::Pending && session.button == PointerButton::Primary {
                    let position = if position.is_finite() {
                        position
                    } else {
                        session.last_pos
                    };
                    if position.distance(session.start_pos) <= self.config.drag_threshold_px {
                        let held = time.saturating_sub(session.start_time);
                        let within_budget = held <= self.config.tap_budget();
                        debug!(?channel, ?held, within_budget, "gesture tap");
                        effects.push(GestureEffect::Tap(Tap {
                            position,
                            channel,
                            held,
                            within_budget,
                        }));
                    }
                } else {
                    debug!(phase = ?session.phase, "gesture ended");
                }
            }
        }

        if self.contacts.is_empty() {
            self.session = None;
        }
        effects
    }

    fn on_wheel(&self, delta: f32) -> Effects {
        let mut effects = Effects::none();
        if delta.is_finite() && delta != 0.0 {
            effects.push(GestureEffect::Dolly {
                delta: delta * self.config.wheel_zoom_speed,
            });
        }
        effects
    }
}

fn orbit(delta: Vec2, sensitivity: f32) -> GestureEffect {
    GestureEffect::Orbit {
        d_yaw: delta.x * sensitivity,
        d_pitch: delta.y * sensitivity,
    }
}

fn pinch_move(
    pinch: &mut Pinch,
    primary: ContactId,
    contact: ContactId,
    position: Vec2,
    config: &GestureConfig,
    effects: &mut Effects,
) {
    let before = *pinch;
    if contact == primary {
        pinch.primary_pos = position;
    } else if contact == pinch.secondary {
        pinch.secondary_pos = position;
    } else {
        return;
    }

    let (old_span, new_span) = (before.span(), pinch.span());
    if old_span >= MIN_PINCH_SPAN_PX && new_span >= MIN_PINCH_SPAN_PX {
        effects.push(GestureEffect::Zoom {
            factor: old_span / new_span,
        });
    }

    let shift = pinch.midpoint() - before.midpoint();
    effects.push(GestureEffect::Pan {
        dx: shift.x,
        dy: shift.y,
    });

    if config.two_finger_roll {
        let mut twist = pinch.angle() - before.angle();
        if twist > std::f32::consts::PI {
            twist -= std::f32::consts::TAU;
        } else if twist < -std::f32::consts::PI {
            twist += std::f32::consts::TAU;
        }
        effects.push(GestureEffect::Orbit {
            d_yaw: twist,
            d_pitch: 0.0,
        });
    }
}
