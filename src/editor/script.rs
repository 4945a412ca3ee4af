use std::io::Read;
use std::path::Path;

use anyhow::Context as _;

use crate::editor::context::Editor;
use crate::editor::input::InputEvent;
use crate::foundation::error::{FlowloopError, FlowloopResult};

/// A recorded sequence of input events, stored as a JSON array.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct EventScript {
    pub events: Vec<InputEvent>,
}

/// What replaying a script did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub events: usize,
    pub redraws: usize,
}

impl EventScript {
    pub fn new(events: Vec<InputEvent>) -> Self {
        Self { events }
    }

    pub fn from_json_str(s: &str) -> FlowloopResult<Self> {
        serde_json::from_str(s).map_err(|e| FlowloopError::serde(format!("event script: {e}")))
    }

    pub fn from_reader(r: impl Read) -> FlowloopResult<Self> {
        serde_json::from_reader(r).map_err(|e| FlowloopError::serde(format!("event script: {e}")))
    }

    pub fn from_path(path: &Path) -> FlowloopResult<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("open event script '{}'", path.display()))?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Dispatch every event in order, stopping at the first error.
    #[tracing::instrument(skip_all, fields(events = self.events.len()))]
    pub fn replay(&self, editor: &mut Editor) -> FlowloopResult<ReplayReport> {
        let mut report = ReplayReport::default();
        for (i, event) in self.events.iter().enumerate() {
            let redraw = editor.dispatch(event.clone()).map_err(|e| {
                tracing::warn!(index = i, error = %e, "event script step failed");
                e
            })?;
            report.events += 1;
            report.redraws += usize::from(redraw);
        }
        Ok(report)
    }
}
