use crate::assets::Rgba8;
use crate::foundation::error::{FlowloopError, FlowloopResult};
use crate::render::label::LabelFont;
use crate::render::view::FrameView;

/// A rendered frame, row-major RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA8 of the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixel data.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

pub trait RenderBackend {
    fn render(&mut self, view: &FrameView<'_>) -> FlowloopResult<FrameRGBA>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    Cpu,
}

#[derive(Clone, Debug, Default)]
pub struct RenderOpts {
    /// Color painted under everything else; `None` leaves the frame transparent.
    pub clear_rgba: Option<Rgba8>,
    /// Font for node id labels; without one nodes are drawn unlabeled.
    pub label_font: Option<LabelFont>,
}

impl RenderOpts {
    pub fn with_clear_rgba(mut self, clear_rgba: Rgba8) -> Self {
        self.clear_rgba = Some(clear_rgba);
        self
    }

    pub fn with_label_font(mut self, font_bytes: Vec<u8>) -> Self {
        self.label_font = Some(LabelFont::new(font_bytes));
        self
    }
}

pub fn create_backend(
    kind: BackendKind,
    opts: &RenderOpts,
) -> FlowloopResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(opts.clone()))),
    }
}

pub(crate) fn canvas_dims_u16(width: u32, height: u32) -> FlowloopResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| FlowloopError::render("canvas width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FlowloopError::render("canvas height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(FlowloopError::render("canvas must be non-empty"));
    }
    Ok((w, h))
}
