use crate::animation::{AnimationSettings, AnimationStyle, Scheduler, TickOutcome};
use crate::assets::{BackgroundImage, decode_background};
use crate::editor::export::UiState;
use crate::editor::input::{Control, InputEvent, PointerButton, is_space, is_undo_chord};
use crate::editor::mode::{Cursor, Mode};
use crate::foundation::core::{Canvas, Point, Vec2};
use crate::foundation::error::{FlowloopError, FlowloopResult};
use crate::render::{Decorations, FrameRGBA, FrameView, RenderBackend};
use crate::scene::{GridConfig, NodeId, SceneStore};
use crate::viewport::{Camera, ZoomDirection};

/// Transient pointer gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Gesture {
    Idle,
    Panning { last: Point },
    Dragging { node: NodeId, offset: Vec2 },
}

/// The editing session: owns the scene, camera, playback and every piece of transient UI state.
///
/// Hosts feed it [`InputEvent`]s through [`Editor::dispatch`], drive playback with
/// [`Editor::tick`] / [`Editor::tick_at`] and redraw with [`Editor::render`] whenever one of them
/// reports a change.
#[derive(Clone, Debug)]
pub struct Editor {
    canvas: Canvas,
    camera: Camera,
    scene: SceneStore,
    scheduler: Scheduler,
    settings: AnimationSettings,
    style: AnimationStyle,
    background: Option<BackgroundImage>,
    mode: Mode,
    gesture: Gesture,
    space_held: bool,
    pointer: Point,
    pointer_inside: bool,
    hovered: Option<NodeId>,
    pub(crate) ui: UiState,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Canvas::default())
    }
}

impl Editor {
    /// A fresh session. The empty scene is recorded as the first undo step.
    pub fn new(canvas: Canvas) -> Self {
        let mut scene = SceneStore::new();
        scene.checkpoint();
        Self {
            canvas,
            camera: Camera::default(),
            scene,
            scheduler: Scheduler::new(),
            settings: AnimationSettings::default(),
            style: AnimationStyle::default(),
            background: None,
            mode: Mode::Select,
            gesture: Gesture::Idle,
            space_held: false,
            pointer: Point::ORIGIN,
            pointer_inside: false,
            hovered: None,
            ui: UiState::default(),
        }
    }

    pub fn with_style(mut self, style: AnimationStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_settings(mut self, settings: AnimationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        *self.scene.grid_mut() = grid;
        self
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn set_canvas(&mut self, canvas: Canvas) -> FlowloopResult<()> {
        self.canvas = Canvas::new(canvas.width, canvas.height)?;
        Ok(())
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn scene(&self) -> &SceneStore {
        &self.scene
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    pub fn style(&self) -> &AnimationStyle {
        &self.style
    }

    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    pub fn ui_state(&self) -> UiState {
        self.ui
    }

    pub fn is_animating(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Apply one input event. Returns `true` when the canvas needs a redraw.
    ///
    /// Errors (starting without a path, out-of-range control values) leave the editor unchanged.
    pub fn dispatch(&mut self, event: InputEvent) -> FlowloopResult<bool> {
        match event {
            InputEvent::PointerDown { x, y, button } => {
                Ok(self.pointer_down(Point::new(x, y), button))
            }
            InputEvent::PointerMove { x, y } => Ok(self.pointer_move(Point::new(x, y))),
            InputEvent::PointerUp { x, y, .. } => {
                self.pointer = Point::new(x, y);
                self.gesture = Gesture::Idle;
                Ok(false)
            }
            InputEvent::Click { x, y, button } => Ok(self.click(Point::new(x, y), button)),
            InputEvent::Wheel { x, y, delta_y } => {
                self.camera
                    .zoom_at(Point::new(x, y), ZoomDirection::from_wheel_delta(delta_y));
                Ok(true)
            }
            InputEvent::KeyDown { key, ctrl, meta } => {
                if is_undo_chord(&key, ctrl, meta) {
                    return Ok(self.undo());
                }
                if is_space(&key) {
                    self.space_held = true;
                }
                Ok(false)
            }
            InputEvent::KeyUp { key } => {
                if is_space(&key) {
                    self.space_held = false;
                }
                Ok(false)
            }
            InputEvent::PointerLeave => {
                self.pointer_inside = false;
                Ok(false)
            }
            InputEvent::SetMode { mode } => {
                self.set_mode(mode);
                Ok(true)
            }
            InputEvent::ControlChanged { control } => self.apply_control(control),
            InputEvent::StartAnimation => {
                self.start_animation()?;
                Ok(true)
            }
            InputEvent::StopAnimation => Ok(self.stop_animation()),
            InputEvent::Undo => Ok(self.undo()),
        }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        if mode == Mode::SetPath {
            self.scene.clear_path();
        }
        if mode == Mode::AddNode {
            self.hovered = None;
        }
        tracing::debug!(?mode, "mode changed");
    }

    pub fn start_animation(&mut self) -> FlowloopResult<()> {
        if self.is_exporting() {
            return Err(FlowloopError::precondition(
                "playback cannot start while an export is running",
            ));
        }
        self.scheduler.start(self.scene.path().len(), &self.settings)
    }

    /// Returns `true` when playback actually stopped and a final redraw is due.
    pub fn stop_animation(&mut self) -> bool {
        self.scheduler.stop()
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.scene.undo();
        if undone {
            self.hovered = self.hovered.filter(|id| self.scene.node(*id).is_some());
        }
        undone
    }

    /// Advance playback by `delta_ms`.
    pub fn tick(&mut self, delta_ms: f64) -> TickOutcome {
        self.scheduler.tick(delta_ms, &self.settings)
    }

    /// Advance playback to a display timestamp.
    pub fn tick_at(&mut self, timestamp_ms: f64) -> TickOutcome {
        self.scheduler.tick_at(timestamp_ms, &self.settings)
    }

    /// Decode `bytes` as the background. The canvas takes the image's size and the camera resets.
    #[tracing::instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub fn load_background(&mut self, bytes: &[u8]) -> FlowloopResult<()> {
        let bg = decode_background(bytes)?;
        self.canvas = bg.canvas();
        self.camera.reset();
        self.background = Some(bg);
        Ok(())
    }

    /// Cursor for the current pointer position and gesture.
    pub fn cursor(&self) -> Cursor {
        match self.gesture {
            Gesture::Panning { .. } => return Cursor::Grabbing,
            _ if self.space_held => return Cursor::Grab,
            Gesture::Dragging { .. } => return Cursor::Grabbing,
            Gesture::Idle => {}
        }
        if !self.pointer_inside {
            return Cursor::Default;
        }
        match self.mode {
            Mode::AddNode => Cursor::Crosshair,
            Mode::Select | Mode::SetPath => {
                if self.scene.find_node_at(self.world_pointer()).is_some() {
                    Cursor::Pointer
                } else {
                    Cursor::Default
                }
            }
        }
    }

    /// Draw the live canvas.
    pub fn render(&self, backend: &mut dyn RenderBackend) -> FlowloopResult<FrameRGBA> {
        let path = self.scene.path_points();
        let dots = if self.scheduler.is_running() {
            self.scheduler.dots()
        } else {
            &[]
        };
        let rubber_band_to = (self.mode == Mode::SetPath && !path.is_empty() && self.pointer_inside)
            .then(|| self.world_pointer());
        let grid = self.scene.grid();
        let view = FrameView {
            canvas: self.canvas,
            camera: self.camera,
            background: self.background.as_ref(),
            nodes: self.scene.nodes(),
            path: &path,
            dots,
            style: &self.style,
            decorations: Decorations {
                show_scene: true,
                hovered: self.hovered,
                rubber_band_to,
                grid: grid.show.then_some(grid.size),
            },
        };
        backend.render(&view)
    }

    fn world_pointer(&self) -> Point {
        self.camera.world_from_screen(self.pointer)
    }

    fn pointer_down(&mut self, p: Point, button: PointerButton) -> bool {
        self.pointer = p;
        self.pointer_inside = true;
        let pans = match button {
            PointerButton::Middle | PointerButton::Secondary => true,
            PointerButton::Primary => self.space_held,
        };
        if pans {
            self.gesture = Gesture::Panning { last: p };
            return false;
        }
        if self.mode != Mode::Select {
            return false;
        }
        let world = self.world_pointer();
        if let Some(node) = self.scene.find_node_at(world).and_then(|id| self.scene.node(id)) {
            let (id, offset) = (node.id, world - node.pos);
            self.scene.begin_move();
            self.gesture = Gesture::Dragging { node: id, offset };
        }
        false
    }

    fn pointer_move(&mut self, p: Point) -> bool {
        self.pointer = p;
        self.pointer_inside = true;
        let world = self.world_pointer();

        let prev_hover = self.hovered;
        self.hovered = match self.mode {
            Mode::Select | Mode::SetPath => self.scene.find_node_at(world),
            Mode::AddNode => None,
        };
        let mut redraw = prev_hover != self.hovered;
        if self.mode == Mode::SetPath && !self.scene.path().is_empty() {
            redraw = true;
        }

        match self.gesture {
            Gesture::Panning { last } => {
                self.camera.pan(p - last);
                self.gesture = Gesture::Panning { last: p };
                true
            }
            Gesture::Dragging { node, offset } => {
                self.scene.move_node(node, world - offset);
                true
            }
            Gesture::Idle => redraw,
        }
    }

    fn click(&mut self, p: Point, button: PointerButton) -> bool {
        self.pointer = p;
        if self.space_held || button != PointerButton::Primary {
            return false;
        }
        let world = self.world_pointer();
        match self.mode {
            Mode::AddNode => {
                self.scene.add_node(world);
                true
            }
            Mode::SetPath => match self.scene.find_node_at(world) {
                Some(id) => self.scene.append_to_path(id),
                None => false,
            },
            Mode::Select => false,
        }
    }

    fn apply_control(&mut self, control: Control) -> FlowloopResult<bool> {
        match control {
            Control::FillColor(c) => self.style.fill = c,
            Control::StrokeColor(c) => self.style.stroke = c,
            Control::MarkerSize(size) => self.style.set_size(size)?,
            Control::Glow(on) => self.style.set_glow(on),
            Control::Shadow(on) => self.style.set_shadow(on),
            Control::DurationS(d) => self.settings.set_duration_s(d)?,
            Control::MultiDot(on) => self.settings.set_multi_dot_enabled(on),
            Control::SpawnIntervalMs(ms) => self.settings.set_spawn_interval_ms(ms)?,
            Control::GridSize(size) => self.scene.grid_mut().set_size(size)?,
            Control::SnapToGrid(on) => {
                self.scene.grid_mut().snap = on;
                return Ok(false);
            }
            Control::ShowGrid(on) => self.scene.grid_mut().show = on,
        }
        Ok(true)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/context.rs"]
mod tests;
