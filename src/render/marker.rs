use crate::animation::AnimationStyle;
use crate::assets::Rgba8;
use crate::foundation::core::Vec2;

pub const MARKER_STROKE_PX: f64 = 1.0;
pub const MARKER_SHADOW_OFFSET_PX: f64 = 5.0;
pub const MARKER_SHADOW_BLUR_PX: f64 = 10.0;
pub const MARKER_GLOW_BLUR_PX: f64 = 20.0;
pub const MARKER_SHADOW_COLOR: Rgba8 = Rgba8::rgba(0, 0, 0, 128);

/// Marker measurements in world units for one zoom level.
///
/// Every length is a screen-pixel constant divided by `zoom`, so markers keep their on-screen size
/// while the camera zooms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerGeometry {
    pub radius: f64,
    pub stroke_width: f64,
    pub shadow_offset: Vec2,
    pub shadow_blur: f64,
    pub glow_blur: f64,
}

impl MarkerGeometry {
    pub fn for_zoom(style: &AnimationStyle, zoom: f64) -> Self {
        let inv = 1.0 / zoom;
        Self {
            radius: style.size() * inv,
            stroke_width: MARKER_STROKE_PX * inv,
            shadow_offset: Vec2::new(MARKER_SHADOW_OFFSET_PX * inv, MARKER_SHADOW_OFFSET_PX * inv),
            shadow_blur: MARKER_SHADOW_BLUR_PX * inv,
            glow_blur: MARKER_GLOW_BLUR_PX * inv,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/marker.rs"]
mod tests;
