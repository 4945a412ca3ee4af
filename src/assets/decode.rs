use std::sync::Arc;

use crate::foundation::core::{Canvas, premultiply_rgba8_in_place};
use crate::foundation::error::{FlowloopError, FlowloopResult};

/// A decoded background raster, premultiplied and ready for the renderer.
#[derive(Clone, Debug)]
pub struct BackgroundImage {
    pub width: u32,
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl BackgroundImage {
    /// Pixel dimensions of the image as a canvas size.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }
}

/// Decode an encoded image (PNG, JPEG or GIF) into a [`BackgroundImage`].
///
/// Decode failures are reported as [`FlowloopError::Resource`].
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_background(bytes: &[u8]) -> FlowloopResult<BackgroundImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| FlowloopError::resource(format!("decode background image: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(FlowloopError::resource("background image has no pixels"));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    tracing::debug!(width, height, "decoded background image");
    Ok(BackgroundImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}
