//! Rasterizes a [`FrameView`] into an RGBA8 frame.

mod backend;
mod cpu;
mod label;
mod marker;
mod view;

pub use backend::{BackendKind, FrameRGBA, RenderBackend, RenderOpts, create_backend};
pub use cpu::CpuBackend;
pub use label::{LABEL_SIZE_PX, LabelFont};
pub use marker::{
    MARKER_GLOW_BLUR_PX, MARKER_SHADOW_BLUR_PX, MARKER_SHADOW_COLOR, MARKER_SHADOW_OFFSET_PX,
    MARKER_STROKE_PX, MarkerGeometry,
};
pub use view::{Decorations, FrameView};
