//! Flowloop is a node/path editor engine that animates markers along a polyline.
//!
//! The pieces, leaves first:
//!
//! - a pan/zoom [`Camera`] mapping screen pixels to world coordinates
//! - a [`SceneStore`] of nodes and an ordered path with snapshot undo
//! - arc-length path geometry ([`point_at_progress`])
//! - a live [`Scheduler`] and a deterministic export-time [`FrameSampler`]
//! - a CPU [`RenderBackend`] and [`FrameSink`]s, including an animated [`GifSink`]
//!
//! [`Editor`] owns all of them and is driven by [`InputEvent`]s.
#![forbid(unsafe_code)]

mod foundation;

/// Marker style, playback timing and frame sampling.
pub mod animation;
/// Background images and colors.
pub mod assets;
/// The editing session.
pub mod editor;
/// Frame sinks.
pub mod encode;
/// Arc-length path geometry.
pub mod path;
/// Rendering backend(s).
pub mod render;
/// Nodes, path and undo.
pub mod scene;
/// Pan/zoom camera.
pub mod viewport;

pub use crate::foundation::core::{Affine, Canvas, Fps, FrameIndex, Point, Rect, Vec2};
pub use crate::foundation::error::{FlowloopError, FlowloopResult};

pub use crate::animation::{
    AnimationSettings, AnimationStyle, Dot, EXPORT_FPS, FrameSampler, Scheduler, TickOutcome,
};
pub use crate::assets::{BackgroundImage, Rgba8, decode_background};
pub use crate::editor::{
    Control, Cursor, Editor, EventScript, ExportOpts, ExportOutcome, InputEvent, Mode,
    PointerButton, UiState,
};
pub use crate::encode::{FrameSink, GifSink, GifSinkOpts, InMemorySink, SinkConfig};
pub use crate::path::{path_length, point_at_progress};
pub use crate::render::{
    BackendKind, CpuBackend, Decorations, FrameRGBA, FrameView, LabelFont, RenderBackend,
    RenderOpts, create_backend,
};
pub use crate::scene::{GridConfig, Node, NodeId, SceneStore};
pub use crate::viewport::{Camera, ZoomDirection};
