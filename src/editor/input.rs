use crate::assets::Rgba8;
use crate::editor::mode::Mode;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// A change made on the control panel.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "control", content = "value", rename_all = "snake_case")]
pub enum Control {
    FillColor(Rgba8),
    StrokeColor(Rgba8),
    MarkerSize(f64),
    Glow(bool),
    Shadow(bool),
    DurationS(f64),
    MultiDot(bool),
    SpawnIntervalMs(f64),
    GridSize(f64),
    SnapToGrid(bool),
    ShowGrid(bool),
}

/// Everything the host can feed into [`crate::editor::Editor::dispatch`].
///
/// Pointer coordinates are canvas-relative screen pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
    },
    /// A press and release without travel, delivered after `PointerUp`.
    Click {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
    },
    Wheel {
        x: f64,
        y: f64,
        delta_y: f64,
    },
    KeyDown {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        meta: bool,
    },
    KeyUp {
        key: String,
    },
    PointerLeave,
    SetMode {
        mode: Mode,
    },
    ControlChanged {
        control: Control,
    },
    StartAnimation,
    StopAnimation,
    Undo,
}

impl InputEvent {
    /// Pointer position carried by the event, if any.
    pub fn position(&self) -> Option<(f64, f64)> {
        match *self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y }
            | Self::PointerUp { x, y, .. }
            | Self::Click { x, y, .. }
            | Self::Wheel { x, y, .. } => Some((x, y)),
            _ => None,
        }
    }
}

pub(crate) fn is_space(key: &str) -> bool {
    key == " " || key.eq_ignore_ascii_case("space")
}

pub(crate) fn is_undo_chord(key: &str, ctrl: bool, meta: bool) -> bool {
    (ctrl || meta) && key.eq_ignore_ascii_case("z")
}

#[cfg(test)]
#[path = "../../tests/unit/editor/input.rs"]
mod tests;
