//! Marker styling, playback timing, and the live and export-time schedulers.

mod sampler;
mod scheduler;
mod settings;
mod style;

pub use sampler::{EXPORT_FPS, FrameSampler};
pub use scheduler::{Dot, Dots, Scheduler, SchedulerState, TickOutcome};
pub use settings::{AnimationSettings, MultiDot};
pub use style::AnimationStyle;
