use smallvec::SmallVec;

use crate::animation::settings::AnimationSettings;
use crate::foundation::error::{FlowloopError, FlowloopResult};

/// One marker travelling along the path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    /// Normalized arc-length position, `0` at the first path node.
    pub progress: f64,
}

impl Dot {
    pub const START: Self = Self { progress: 0.0 };
}

pub type Dots = SmallVec<[Dot; 8]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// What the host loop should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// State advanced; redraw and schedule another tick.
    Redraw,
    /// Not running; schedule nothing.
    Idle,
}

/// Live playback driver.
///
/// The scheduler has no clock of its own: hosts call [`Scheduler::tick`] with an elapsed delta,
/// or [`Scheduler::tick_at`] with a display timestamp, so tests can feed synthetic time.
#[derive(Clone, Debug)]
pub struct Scheduler {
    state: SchedulerState,
    dots: Dots,
    spawn_acc_ms: f64,
    last_timestamp_ms: Option<f64>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            state: SchedulerState::Idle,
            dots: Dots::new(),
            spawn_acc_ms: 0.0,
            last_timestamp_ms: None,
        }
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Markers currently in flight.
    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    /// Idle → Running. Starting while already running changes nothing.
    pub fn start(&mut self, path_len: usize, settings: &AnimationSettings) -> FlowloopResult<()> {
        if path_len < 2 {
            return Err(FlowloopError::precondition(
                "set a path of at least two nodes before starting the animation",
            ));
        }
        if self.is_running() {
            return Ok(());
        }
        self.dots.clear();
        if !settings.multi_dot().enabled {
            self.dots.push(Dot::START);
        }
        self.spawn_acc_ms = 0.0;
        self.last_timestamp_ms = None;
        self.state = SchedulerState::Running;
        tracing::debug!(
            multi_dot = settings.multi_dot().enabled,
            duration_s = settings.duration_s(),
            "animation started"
        );
        Ok(())
    }

    /// Running → Idle. Idempotent; once this returns no tick advances anything.
    ///
    /// Returns `true` when the call actually stopped playback and a final redraw is due.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = SchedulerState::Idle;
        self.last_timestamp_ms = None;
        tracing::debug!("animation stopped");
        true
    }

    /// Advance by a display timestamp. The first tick after [`Scheduler::start`] only records the
    /// baseline.
    pub fn tick_at(&mut self, timestamp_ms: f64, settings: &AnimationSettings) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }
        let delta = match self.last_timestamp_ms {
            Some(last) => timestamp_ms - last,
            None => 0.0,
        };
        self.last_timestamp_ms = Some(timestamp_ms);
        self.tick(delta, settings)
    }

    /// Advance every marker by `delta_ms` of wall-clock time.
    pub fn tick(&mut self, delta_ms: f64, settings: &AnimationSettings) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }
        let delta_ms = if delta_ms.is_finite() {
            delta_ms.max(0.0)
        } else {
            0.0
        };
        let increment = delta_ms / settings.duration_ms();
        let multi = settings.multi_dot();

        if multi.enabled {
            self.spawn_acc_ms += delta_ms;
            // At most one spawn per tick, however many intervals elapsed.
            if self.spawn_acc_ms > multi.interval_ms {
                self.dots.push(Dot::START);
                self.spawn_acc_ms = 0.0;
            }
            for dot in &mut self.dots {
                dot.progress += increment;
            }
            self.dots.retain(|d| d.progress <= 1.0);
        } else {
            if self.dots.is_empty() {
                self.dots.push(Dot::START);
            }
            let dot = &mut self.dots[0];
            dot.progress = (dot.progress + increment).rem_euclid(1.0);
        }
        TickOutcome::Redraw
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;
