use crate::foundation::error::{FlowloopError, FlowloopResult};

/// Multi-marker configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MultiDot {
    pub enabled: bool,
    /// Milliseconds between spawns, > 0.
    pub interval_ms: f64,
}

impl Default for MultiDot {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_ms: 200.0,
        }
    }
}

/// Timing of the path animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSettings {
    /// Seconds for one marker to traverse the full path, > 0.
    duration_s: f64,
    multi_dot: MultiDot,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration_s: 3.0,
            multi_dot: MultiDot::default(),
        }
    }
}

fn positive(what: &str, v: f64) -> FlowloopResult<f64> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(FlowloopError::validation(format!(
            "{what} must be > 0, got {v}"
        )))
    }
}

impl AnimationSettings {
    pub fn new(duration_s: f64) -> FlowloopResult<Self> {
        Ok(Self {
            duration_s: positive("duration", duration_s)?,
            multi_dot: MultiDot::default(),
        })
    }

    pub fn with_multi_dot(mut self, interval_ms: f64) -> FlowloopResult<Self> {
        self.set_spawn_interval_ms(interval_ms)?;
        self.multi_dot.enabled = true;
        Ok(self)
    }

    pub fn duration_s(&self) -> f64 {
        self.duration_s
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_s * 1000.0
    }

    pub fn set_duration_s(&mut self, duration_s: f64) -> FlowloopResult<()> {
        self.duration_s = positive("duration", duration_s)?;
        Ok(())
    }

    pub fn multi_dot(&self) -> MultiDot {
        self.multi_dot
    }

    pub fn set_multi_dot_enabled(&mut self, enabled: bool) {
        self.multi_dot.enabled = enabled;
    }

    pub fn set_spawn_interval_ms(&mut self, interval_ms: f64) -> FlowloopResult<()> {
        self.multi_dot.interval_ms = positive("spawn interval", interval_ms)?;
        Ok(())
    }
}
