//! The editing session: input dispatch, playback, rendering and export.

mod context;
mod export;
mod input;
mod mode;
mod script;

pub use context::Editor;
pub use export::{ExportOpts, ExportOutcome, UiState};
pub use input::{Control, InputEvent, PointerButton};
pub use mode::{Cursor, Mode};
pub use script::{EventScript, ReplayReport};
