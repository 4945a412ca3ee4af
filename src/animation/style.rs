use crate::assets::Rgba8;
use crate::foundation::error::{FlowloopError, FlowloopResult};

/// Visual style of the animated markers.
///
/// `glow` and `shadow` are mutually exclusive; the setters keep that invariant, which is why the
/// flags are not public fields.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationStyle {
    pub fill: Rgba8,
    pub stroke: Rgba8,
    size: f64,
    glow: bool,
    shadow: bool,
}

impl Default for AnimationStyle {
    fn default() -> Self {
        Self {
            fill: Rgba8::rgb(0x00, 0xff, 0x00),
            stroke: Rgba8::rgb(0x00, 0x00, 0x00),
            size: 8.0,
            glow: false,
            shadow: false,
        }
    }
}

impl AnimationStyle {
    /// Marker radius in screen pixels.
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn set_size(&mut self, size: f64) -> FlowloopResult<()> {
        if !(size.is_finite() && size > 0.0) {
            return Err(FlowloopError::validation(format!(
                "marker size must be > 0, got {size}"
            )));
        }
        self.size = size;
        Ok(())
    }

    pub fn glow(&self) -> bool {
        self.glow
    }

    pub fn shadow(&self) -> bool {
        self.shadow
    }

    /// Enabling glow clears shadow.
    pub fn set_glow(&mut self, on: bool) {
        self.glow = on;
        if on {
            self.shadow = false;
        }
    }

    /// Enabling shadow clears glow.
    pub fn set_shadow(&mut self, on: bool) {
        self.shadow = on;
        if on {
            self.glow = false;
        }
    }

    pub fn with_glow(mut self, on: bool) -> Self {
        self.set_glow(on);
        self
    }

    pub fn with_shadow(mut self, on: bool) -> Self {
        self.set_shadow(on);
        self
    }
}
