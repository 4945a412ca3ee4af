//! External inputs: colors and background rasters.

mod color;
mod decode;

pub use color::Rgba8;
pub use decode::{BackgroundImage, decode_background};
