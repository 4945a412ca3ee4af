use crate::foundation::core::Point;
use crate::foundation::error::{FlowloopError, FlowloopResult};

/// Grid used for optional snapping and for the background grid overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    /// Grid spacing in world units, must be > 0.
    pub size: f64,
    /// Snap node positions on creation and drag.
    pub snap: bool,
    /// Draw the grid overlay.
    pub show: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 20.0,
            snap: false,
            show: false,
        }
    }
}

impl GridConfig {
    pub fn with_snap(mut self, snap: bool) -> Self {
        self.snap = snap;
        self
    }

    pub fn with_size(mut self, size: f64) -> FlowloopResult<Self> {
        self.set_size(size)?;
        Ok(self)
    }

    pub fn set_size(&mut self, size: f64) -> FlowloopResult<()> {
        if !(size.is_finite() && size > 0.0) {
            return Err(FlowloopError::validation(format!(
                "grid size must be > 0, got {size}"
            )));
        }
        self.size = size;
        Ok(())
    }

    /// `round(v / size) * size` when snapping is enabled, `v` otherwise.
    ///
    /// Halves round toward positive infinity, so `-10` on a 20 grid snaps to `0`.
    pub fn snap_value(&self, v: f64) -> f64 {
        if !self.snap {
            return v;
        }
        (v / self.size + 0.5).floor() * self.size
    }

    pub fn snap_point(&self, p: Point) -> Point {
        Point::new(self.snap_value(p.x), self.snap_value(p.y))
    }
}
