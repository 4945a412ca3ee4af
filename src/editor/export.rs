use crate::animation::{EXPORT_FPS, FrameSampler};
use crate::editor::context::Editor;
use crate::encode::{FrameSink, SinkConfig};
use crate::foundation::core::Fps;
use crate::foundation::error::{FlowloopError, FlowloopResult};
use crate::render::{Decorations, FrameView, RenderBackend};
use crate::viewport::Camera;

/// UI affordances the host mirrors while an export runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UiState {
    /// The export button is clickable.
    pub export_enabled: bool,
    /// The loading overlay is shown.
    pub loading: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            export_enabled: true,
            loading: false,
        }
    }
}

impl UiState {
    fn busy() -> Self {
        Self {
            export_enabled: false,
            loading: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportOpts {
    pub fps: Fps,
    /// Passed to the sink; lower is better quality.
    pub quality: u8,
    pub workers: usize,
    /// Also draw nodes and the path polyline. Off by default: exports show background and markers.
    ///
    /// Frames are drawn through an identity camera, so marker widths and offsets are their
    /// unzoomed sizes whatever the live zoom is.
    pub include_scene: bool,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            fps: Fps {
                num: EXPORT_FPS,
                den: 1,
            },
            quality: 10,
            workers: 2,
            include_scene: false,
        }
    }
}

impl ExportOpts {
    pub fn with_fps(mut self, fps: Fps) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_scene(mut self, include_scene: bool) -> Self {
        self.include_scene = include_scene;
        self
    }
}

/// Summary of a finished export.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportOutcome {
    pub frames: u64,
    pub frame_delay_ms: f64,
    pub width: u32,
    pub height: u32,
}

impl Editor {
    /// Render one loop of the animation into `sink`: [`Editor::begin_export`] followed by
    /// [`Editor::run_export`].
    pub fn export(
        &mut self,
        backend: &mut dyn RenderBackend,
        sink: &mut dyn FrameSink,
        opts: &ExportOpts,
    ) -> FlowloopResult<ExportOutcome> {
        self.begin_export()?;
        self.run_export(backend, sink, opts)
    }

    /// Check that an export can start, stop live playback and mark the UI busy.
    ///
    /// Returns the busy [`UiState`] for the host to paint before frames are rendered. Playback
    /// cannot be restarted and no second export can begin until [`Editor::run_export`] or
    /// [`Editor::cancel_export`] restores the UI.
    pub fn begin_export(&mut self) -> FlowloopResult<UiState> {
        if !self.ui.export_enabled {
            return Err(FlowloopError::precondition("an export is already running"));
        }
        if self.scene().path().len() < 2 {
            return Err(FlowloopError::precondition(
                "set a path of at least two nodes before exporting",
            ));
        }
        self.stop_animation();
        self.ui = UiState::busy();
        tracing::debug!("export pending");
        Ok(self.ui)
    }

    /// Render and encode the frames of an export started with [`Editor::begin_export`].
    ///
    /// The UI is restored whether the export succeeds or fails; the host should redraw the live
    /// canvas afterwards.
    #[tracing::instrument(skip(self, backend, sink))]
    pub fn run_export(
        &mut self,
        backend: &mut dyn RenderBackend,
        sink: &mut dyn FrameSink,
        opts: &ExportOpts,
    ) -> FlowloopResult<ExportOutcome> {
        if !self.ui.loading {
            return Err(FlowloopError::precondition(
                "begin_export must succeed before run_export",
            ));
        }

        let result = self.export_frames(backend, sink, opts);

        self.ui = UiState::default();
        match &result {
            Ok(outcome) => tracing::info!(
                frames = outcome.frames,
                width = outcome.width,
                height = outcome.height,
                "export finished"
            ),
            Err(err) => tracing::warn!(error = %err, "export failed"),
        }
        result
    }

    /// Drop a pending export without rendering. Returns `false` when none was pending.
    pub fn cancel_export(&mut self) -> bool {
        if !self.ui.loading {
            return false;
        }
        self.ui = UiState::default();
        tracing::debug!("export cancelled");
        true
    }

    pub fn is_exporting(&self) -> bool {
        self.ui.loading
    }

    fn export_frames(
        &self,
        backend: &mut dyn RenderBackend,
        sink: &mut dyn FrameSink,
        opts: &ExportOpts,
    ) -> FlowloopResult<ExportOutcome> {
        let sampler = FrameSampler::new(self.settings(), opts.fps)?;
        let canvas = self.canvas();
        let path = self.scene().path_points();
        let nodes = if opts.include_scene {
            self.scene().nodes()
        } else {
            &[]
        };
        let decorations = if opts.include_scene {
            Decorations::default()
        } else {
            Decorations::markers_only()
        };

        tracing::info!(
            frames = sampler.frame_count(),
            markers = sampler.marker_count(),
            "export started"
        );
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: sampler.fps(),
            quality: opts.quality,
            workers: opts.workers,
        })?;

        for (idx, dots) in sampler.frames() {
            let view = FrameView {
                canvas,
                camera: Camera::default(),
                background: self.background(),
                nodes,
                path: &path,
                dots: &dots,
                style: self.style(),
                decorations,
            };
            let frame = backend.render(&view)?;
            sink.push_frame(idx, &frame)?;
        }
        sink.end()?;

        Ok(ExportOutcome {
            frames: sampler.frame_count(),
            frame_delay_ms: sampler.frame_delay_ms(),
            width: canvas.width,
            height: canvas.height,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/export.rs"]
mod tests;
