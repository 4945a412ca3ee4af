//! Arc-length parameterization of a polyline.
//!
//! Both live playback and frame export resolve marker positions through
//! [`point_at_progress`], so the two always agree for the same progress value.

use crate::foundation::core::Point;

/// Sum of segment lengths; 0 for fewer than two points.
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Resolve `progress` (clamped to `[0, 1]`) to the point at that fraction of the arc length.
///
/// Returns `None` for fewer than two points. `progress = 1` lands exactly on the last point and
/// `progress = 0` exactly on the first.
pub fn point_at_progress(points: &[Point], progress: f64) -> Option<Point> {
    if points.len() < 2 {
        return None;
    }
    let total = path_length(points);
    let progress = if progress.is_nan() { 0.0 } else { progress };
    let target = total * progress.clamp(0.0, 1.0);
    if target >= total {
        return points.last().copied();
    }

    let last = points.len() - 2;
    let mut acc = 0.0;
    for (i, w) in points.windows(2).enumerate() {
        let (a, b) = (w[0], w[1]);
        let seg = a.distance(b);
        if i == last {
            // Absorbs float shortfall of the accumulated sum against `total`.
            let ratio = if seg > 0.0 {
                ((target - acc) / seg).clamp(0.0, 1.0)
            } else {
                1.0
            };
            return Some(a.lerp(b, ratio));
        }
        if seg > 0.0 && acc + seg >= target {
            return Some(a.lerp(b, (target - acc) / seg));
        }
        acc += seg;
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/path/geometry.rs"]
mod tests;
