use crate::foundation::core::{Affine, Canvas, Point, Rect, Vec2};

/// Exponent step applied per wheel notch: `factor = exp(±ZOOM_INTENSITY)`.
pub const ZOOM_INTENSITY: f64 = 0.1;

/// Direction of one zoom step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Scrolling up (negative delta) zooms in; anything else zooms out.
    pub fn from_wheel_delta(delta_y: f64) -> Self {
        if delta_y < 0.0 { Self::In } else { Self::Out }
    }

    fn sign(self) -> f64 {
        match self {
            Self::In => 1.0,
            Self::Out => -1.0,
        }
    }
}

/// Pan/zoom camera: `screen = world * zoom + translation`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Camera {
    pub translation: Vec2,
    /// Uniform scale, always > 0.
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            translation: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn world_from_screen(&self, screen: Point) -> Point {
        ((screen.to_vec2() - self.translation) / self.zoom).to_point()
    }

    pub fn screen_from_world(&self, world: Point) -> Point {
        (world.to_vec2() * self.zoom + self.translation).to_point()
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.translation += delta;
    }

    /// One wheel step anchored at `cursor` (screen space).
    pub fn zoom_at(&mut self, cursor: Point, direction: ZoomDirection) {
        self.zoom_by(cursor, (direction.sign() * ZOOM_INTENSITY).exp());
    }

    /// Scale by `factor` keeping the world point under `cursor` fixed.
    ///
    /// No range clamping is applied here; `factor` must be finite and > 0.
    pub fn zoom_by(&mut self, cursor: Point, factor: f64) {
        let c = cursor.to_vec2();
        self.translation = (self.translation - c) * factor + c;
        self.zoom *= factor;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// World → screen transform for the renderer.
    pub fn affine(&self) -> Affine {
        Affine::translate(self.translation) * Affine::scale(self.zoom)
    }

    /// World-space rectangle currently visible on `canvas`.
    pub fn visible_world_rect(&self, canvas: Canvas) -> Rect {
        let min = self.world_from_screen(Point::ORIGIN);
        let max = self.world_from_screen(Point::new(
            f64::from(canvas.width),
            f64::from(canvas.height),
        ));
        Rect::from_points(min, max)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/camera.rs"]
mod tests;
