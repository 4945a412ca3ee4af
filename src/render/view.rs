use crate::animation::{AnimationStyle, Dot};
use crate::assets::BackgroundImage;
use crate::foundation::core::{Canvas, Point};
use crate::scene::{Node, NodeId};
use crate::viewport::Camera;

/// Editor overlays that are not part of the scene itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decorations {
    /// Draw the path polyline and the nodes. Export turns this off.
    pub show_scene: bool,
    /// Node drawn with the hover ring.
    pub hovered: Option<NodeId>,
    /// World point the dashed rubber band runs to from the last path node.
    pub rubber_band_to: Option<Point>,
    /// Grid spacing in world units when the grid overlay is on.
    pub grid: Option<f64>,
}

impl Default for Decorations {
    fn default() -> Self {
        Self {
            show_scene: true,
            hovered: None,
            rubber_band_to: None,
            grid: None,
        }
    }
}

impl Decorations {
    /// Background and markers only.
    pub fn markers_only() -> Self {
        Self {
            show_scene: false,
            ..Self::default()
        }
    }
}

/// Everything one frame is drawn from. Borrowed, so rendering never mutates editor state.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub canvas: Canvas,
    pub camera: Camera,
    pub background: Option<&'a BackgroundImage>,
    pub nodes: &'a [Node],
    /// Path positions in traversal order.
    pub path: &'a [Point],
    pub dots: &'a [Dot],
    pub style: &'a AnimationStyle,
    pub decorations: Decorations,
}
