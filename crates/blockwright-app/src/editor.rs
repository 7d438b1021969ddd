//! The block editor: input in, scene and camera changes out.

use blockwright_core::{BlockId, ColorIndex, Palette, Result};
use blockwright_input::{
    EditorAction, ElementState, GestureEffect, GestureEvent, GestureMachine, InputEvent, KeyCode,
    KeyboardState, ShortcutMap, Tap,
};
use blockwright_render::{Camera, CameraOrbitState, OrbitDamping, OrbitLimits};
use blockwright_world::{resolve_ghost, BlockStore, GhostPreview, RayHit};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::host::{CameraSink, RayCaster, SceneSink};

/// What a tap does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolMode {
    /// Tap places a block at the ghost; shift-tap deletes.
    #[default]
    Place,
    /// Tap deletes the block under the pointer.
    Delete,
    /// Tap toggles selection of the block under the pointer.
    Select,
    /// Taps do nothing; only the camera moves.
    Rotate,
}

/// Block editor.
///
/// Owns the block store, the camera orbit and the gesture machine, and
/// reports every visible change to its sinks.
pub struct Editor<R, S, C> {
    config: EditorConfig,
    store: BlockStore,
    palette: Palette,
    color: ColorIndex,
    tool: ToolMode,
    gestures: GestureMachine,
    keyboard: KeyboardState,
    shortcuts: ShortcutMap,
    /// Goal state that gestures mutate.
    orbit: CameraOrbitState,
    damping: Option<OrbitDamping>,
    /// Displayed camera.
    camera: Camera,
    ghost: GhostPreview,
    /// Last screen position a ghost was requested for.
    pointer: Option<Vec2>,
    transparent: bool,
    caster: R,
    scene: S,
    camera_sink: C,
}

impl<R: RayCaster, S: SceneSink, C: CameraSink> Editor<R, S, C> {
    /// Build an editor from a validated configuration.
    pub fn new(config: EditorConfig, mut caster: R, scene: S, camera_sink: C) -> Result<Self> {
        config.validate()?;
        let color = config.initial_color()?;
        let orbit = config.initial_orbit.clamped(&config.orbit_limits);
        let viewport = viewport_size(&config);

        let mut camera = Camera::from_orbit(&orbit);
        camera.set_aspect(viewport.x / viewport.y);
        caster.resize(viewport);

        info!(?orbit, damping = config.damping.is_some(), "editor ready");
        Ok(Self {
            gestures: GestureMachine::new(config.gesture),
            damping: config.damping.map(|d| OrbitDamping::new(d, orbit)),
            config,
            store: BlockStore::new(),
            palette: Palette::default(),
            color,
            tool: ToolMode::default(),
            keyboard: KeyboardState::new(),
            shortcuts: ShortcutMap::editor_defaults(),
            orbit,
            camera,
            ghost: GhostPreview::hidden(),
            pointer: None,
            transparent: false,
            caster,
            scene,
            camera_sink,
        })
    }

    /// Configuration in effect, including the current viewport.
    #[must_use]
    pub const fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Placed blocks and the selection.
    #[must_use]
    pub const fn store(&self) -> &BlockStore {
        &self.store
    }

    /// Goal orbit state.
    #[must_use]
    pub const fn orbit(&self) -> &CameraOrbitState {
        &self.orbit
    }

    /// Displayed camera.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current placement preview.
    #[must_use]
    pub const fn ghost(&self) -> GhostPreview {
        self.ghost
    }

    /// Active tool.
    #[must_use]
    pub const fn tool(&self) -> ToolMode {
        self.tool
    }

    /// Colour given to new blocks.
    #[must_use]
    pub const fn color(&self) -> ColorIndex {
        self.color
    }

    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Whether the structure is shown translucent.
    #[must_use]
    pub const fn is_transparent(&self) -> bool {
        self.transparent
    }

    #[must_use]
    pub const fn gestures(&self) -> &GestureMachine {
        &self.gestures
    }

    #[must_use]
    pub const fn scene(&self) -> &S {
        &self.scene
    }

    #[must_use]
    pub const fn camera_sink(&self) -> &C {
        &self.camera_sink
    }

    /// Ray caster, e.g. to feed it a new scene representation.
    pub fn caster_mut(&mut self) -> &mut R {
        &mut self.caster
    }

    /// Feed one adapted input event.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pointer(pointer) => self.handle_gesture_event(&pointer),
            InputEvent::Key { key, state } => self.handle_key(key, state),
            InputEvent::Modifiers(modifiers) => self.keyboard.set_modifiers(modifiers),
            InputEvent::FocusLost => {
                // Releases never arrive for contacts held across a focus change.
                self.gestures.reset();
                self.set_ghost(GhostPreview::hidden());
                self.keyboard.clear();
                self.set_transparent(false);
            }
        }
    }

    /// Feed one pointer event through the gesture machine and apply the
    /// resulting effects.
    pub fn handle_gesture_event(&mut self, event: &GestureEvent) {
        for effect in self.gestures.handle(event) {
            self.apply_effect(effect);
        }
    }

    /// Feed one key transition.
    pub fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        let Some(edge) = self.keyboard.process_key(key, state) else {
            return;
        };
        if let Some(action) = self.shortcuts.resolve(edge) {
            self.perform(action);
        }
    }

    /// Run a keyboard action directly.
    pub fn perform(&mut self, action: EditorAction) {
        debug!(?action, "editor action");
        match action {
            EditorAction::ToggleSelectMode => {
                let next = if self.tool == ToolMode::Select {
                    ToolMode::Place
                } else {
                    ToolMode::Select
                };
                self.set_tool(next);
            }
            EditorAction::DeleteSelected => {
                for block in self.store.delete_selected() {
                    self.scene.block_removed(&block);
                }
                self.refresh_ghost();
            }
            EditorAction::SelectColor(color) => {
                if let Err(err) = self.set_color(color.slot()) {
                    warn!(%err, "colour shortcut ignored");
                }
            }
            EditorAction::SetTransparent(on) => self.set_transparent(on),
        }
    }

    /// Switch tools. The ghost is hidden and the selection cleared.
    pub fn set_tool(&mut self, tool: ToolMode) {
        info!(from = ?self.tool, to = ?tool, "tool changed");
        self.tool = tool;
        self.set_ghost(GhostPreview::hidden());
        self.clear_selection();
        self.scene.tool_changed(tool);
    }

    /// Pick the colour for new blocks.
    pub fn set_color(&mut self, index: usize) -> Result<()> {
        self.color = self.palette.index(index)?;
        debug!(color = self.color.0, "colour changed");
        Ok(())
    }

    /// Show the structure translucent or solid.
    pub fn set_transparent(&mut self, transparent: bool) {
        if self.transparent != transparent {
            self.transparent = transparent;
            self.scene.transparency_changed(transparent);
        }
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        for id in self.store.clear_selection() {
            self.scene.selection_changed(id, false);
        }
    }

    /// The screen was resized.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.viewport = [width, height];
        let viewport = viewport_size(&self.config);
        self.camera.set_aspect(viewport.x / viewport.y);
        self.caster.resize(viewport);
        let shown = self.damping.as_ref().map_or(self.orbit, |d| *d.current());
        self.camera_sink.camera_changed(&self.camera, &shown);
        self.refresh_ghost();
    }

    /// Advance camera easing by one fixed tick. Does nothing without damping.
    pub fn tick(&mut self) {
        let Some(damping) = &mut self.damping else {
            return;
        };
        let shown = damping.tick(&self.orbit);
        self.camera.set_from_orbit(&shown);
        self.camera_sink.camera_changed(&self.camera, &shown);
        if !self.gestures.is_navigating() {
            self.refresh_ghost();
        }
    }

    fn apply_effect(&mut self, effect: GestureEffect) {
        let limits: OrbitLimits = self.config.orbit_limits;
        match effect {
            GestureEffect::UpdateGhost { position } => {
                self.pointer = Some(position);
                self.refresh_ghost();
            }
            GestureEffect::HideGhost => self.set_ghost(GhostPreview::hidden()),
            GestureEffect::BeginOrbit => {
                self.orbit.recenter_on_blocks(self.store.blocks());
                self.camera_moved();
            }
            GestureEffect::Orbit { d_yaw, d_pitch } => {
                self.orbit.apply_delta(d_yaw, d_pitch, &limits);
                self.camera_moved();
            }
            GestureEffect::Pan { dx, dy } => {
                let speed = self.orbit.distance * self.config.pan_speed;
                let forward = self.orbit.forward();
                self.orbit.apply_pan_delta(-dx * speed, dy * speed, forward);
                self.camera_moved();
            }
            GestureEffect::Zoom { factor } => {
                let delta = self.orbit.distance * (factor - 1.0);
                self.orbit.apply_zoom_delta(delta, &limits);
                self.camera_moved();
            }
            GestureEffect::Dolly { delta } => {
                self.orbit.apply_zoom_delta(delta, &limits);
                self.camera_moved();
            }
            GestureEffect::Tap(tap) => self.handle_tap(tap),
        }
    }

    fn handle_tap(&mut self, tap: Tap) {
        self.pointer = Some(tap.position);
        let delete_modifier = self.keyboard.modifiers().shift();

        match self.tool {
            ToolMode::Place if delete_modifier => self.delete_hit(self.cast(tap.position)),
            ToolMode::Place if !tap.within_budget => {
                debug!(held = ?tap.held, "placement refused: press held too long");
            }
            ToolMode::Place => self.place_at_ghost(),
            ToolMode::Delete => self.delete_hit(self.cast(tap.position)),
            ToolMode::Select => match self.cast(tap.position).and_then(|h| h.block) {
                Some(id) => self.toggle_select(id),
                None => self.clear_selection(),
            },
            ToolMode::Rotate => {}
        }
    }

    /// Place where the ghost is shown, not where a fresh cast would land.
    fn place_at_ghost(&mut self) {
        let Some(cell) = self.ghost.cell() else {
            return;
        };
        // Ground ghosts are not occupancy-checked, so the store re-validates.
        let Some(id) = self.store.place(cell, self.color) else {
            return;
        };
        if let Some(block) = self.store.get(id) {
            self.scene.block_added(block);
        }
        self.refresh_ghost();
    }

    fn delete_hit(&mut self, hit: Option<RayHit>) {
        let Some(id) = hit.and_then(|h| h.block) else {
            return;
        };
        if let Some(block) = self.store.delete(id) {
            self.scene.block_removed(&block);
            self.refresh_ghost();
        }
    }

    fn toggle_select(&mut self, id: BlockId) {
        if let Some(selected) = self.store.toggle_select(id) {
            self.scene.selection_changed(id, selected);
        }
    }

    fn cast(&self, screen: Vec2) -> Option<RayHit> {
        self.caster.cast(screen, &self.camera, self.store.blocks())
    }

    /// Recompute the ghost under the last pointer position.
    fn refresh_ghost(&mut self) {
        let ghost = match self.pointer {
            Some(position) if self.tool == ToolMode::Place && !self.gestures.is_navigating() => self
                .cast(position)
                .and_then(|hit| hit.snap_target(&self.store))
                .map_or_else(GhostPreview::hidden, |target| {
                    resolve_ghost(target, self.store.occupancy())
                }),
            _ => GhostPreview::hidden(),
        };
        self.set_ghost(ghost);
    }

    fn set_ghost(&mut self, ghost: GhostPreview) {
        if ghost.cell() != self.ghost.cell() {
            self.ghost = ghost;
            self.scene.ghost_changed(ghost);
        }
    }

    /// Push the goal state to the displayed camera unless damping owns it.
    fn camera_moved(&mut self) {
        if self.damping.is_some() {
            return;
        }
        self.camera.set_from_orbit(&self.orbit);
        self.camera_sink.camera_changed(&self.camera, &self.orbit);
        if !self.gestures.is_navigating() {
            self.refresh_ghost();
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn viewport_size(config: &EditorConfig) -> Vec2 {
    Vec2::new(config.viewport[0] as f32, config.viewport[1] as f32)
}
