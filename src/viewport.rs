//! Screen ↔ world mapping.

mod camera;

pub use camera::{Camera, ZOOM_INTENSITY, ZoomDirection};
