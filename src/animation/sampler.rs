use crate::animation::scheduler::{Dot, Dots};
use crate::animation::settings::AnimationSettings;
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::FlowloopResult;

/// Frame rate used for GIF export.
pub const EXPORT_FPS: u32 = 30;

// Totals within this distance of a whole number are treated as whole (e.g. 2.2 s * 30 fps).
const FRAME_TOTAL_EPS: f64 = 1e-9;

/// Deterministic per-frame marker layout for export.
///
/// Unlike the live [`crate::animation::Scheduler`], nothing here depends on wall-clock time:
/// frame `i` always yields the same dots. In multi-dot mode the markers are phase-shifted copies of
/// one looping progress rather than a replay of the spawn/retire simulation, so the output only
/// matches live playback exactly when `duration / interval` is a whole number.
///
/// Sampled frames are meant to be drawn through an identity camera: marker widths, offsets and
/// blur come out at their zoom-1 sizes regardless of the zoom the editor is showing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSampler {
    duration_s: f64,
    fps: Fps,
    interval_s: Option<f64>,
}

impl FrameSampler {
    pub fn new(settings: &AnimationSettings, fps: Fps) -> FlowloopResult<Self> {
        let fps = Fps::new(fps.num, fps.den)?;
        let multi = settings.multi_dot();
        Ok(Self {
            duration_s: settings.duration_s(),
            fps,
            interval_s: multi.enabled.then(|| multi.interval_ms / 1000.0),
        })
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    fn frame_total(&self) -> f64 {
        let total = self.duration_s * self.fps.as_f64();
        let whole = total.round();
        if (total - whole).abs() < FRAME_TOTAL_EPS {
            whole
        } else {
            total
        }
    }

    /// `ceil(duration * fps)`.
    pub fn frame_count(&self) -> u64 {
        self.frame_total().ceil().max(0.0) as u64
    }

    /// Per-frame delay, `1000 / fps` milliseconds.
    pub fn frame_delay_ms(&self) -> f64 {
        self.fps.frame_duration_ms()
    }

    /// Looping progress of frame `idx`, `idx / (duration * fps)`.
    pub fn base_progress(&self, idx: FrameIndex) -> f64 {
        idx.0 as f64 / self.frame_total()
    }

    /// Concurrent markers in multi-dot mode, `floor(duration / interval)`; 1 otherwise.
    pub fn marker_count(&self) -> usize {
        match self.interval_s {
            Some(interval_s) => (self.duration_s / interval_s).floor().max(0.0) as usize,
            None => 1,
        }
    }

    pub fn dots_at(&self, idx: FrameIndex) -> Dots {
        let base = self.base_progress(idx);
        let Some(interval_s) = self.interval_s else {
            return Dots::from_slice(&[Dot { progress: base }]);
        };
        let phase = interval_s / self.duration_s;
        (0..self.marker_count())
            .map(|k| Dot {
                progress: (base - k as f64 * phase + 1.0).rem_euclid(1.0),
            })
            .collect()
    }

    /// All frames in order with their marker layout.
    pub fn frames(&self) -> impl Iterator<Item = (FrameIndex, Dots)> + '_ {
        (0..self.frame_count()).map(|i| {
            let idx = FrameIndex(i);
            (idx, self.dots_at(idx))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sampler.rs"]
mod tests;
