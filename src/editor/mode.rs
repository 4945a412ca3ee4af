/// Editing mode: exactly one is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Hover, select and drag nodes.
    #[default]
    Select,
    /// Clicks create nodes.
    AddNode,
    /// Clicks append nodes to the path. Entering this mode clears the path.
    SetPath,
}

/// Pointer cursor the host should show over the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
    Crosshair,
    Grab,
    Grabbing,
}
