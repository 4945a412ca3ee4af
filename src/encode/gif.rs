use std::io::Write;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::assets::Rgba8;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, mul_div255_u16};
use crate::foundation::error::{FlowloopError, FlowloopResult};
use crate::render::FrameRGBA;

/// Encoder speed range accepted by the GIF quantizer.
const GIF_SPEED_MIN: u8 = 1;
const GIF_SPEED_MAX: u8 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GifSinkOpts {
    /// Color translucent pixels are flattened over; GIF has no partial alpha.
    pub bg_rgba: Rgba8,
}

impl Default for GifSinkOpts {
    fn default() -> Self {
        Self {
            bg_rgba: Rgba8::rgb(255, 255, 255),
        }
    }
}

impl GifSinkOpts {
    pub fn with_bg_rgba(mut self, bg_rgba: Rgba8) -> Self {
        self.bg_rgba = bg_rgba;
        self
    }
}

struct Session {
    cfg: SinkConfig,
    delay: Delay,
    last: Option<FrameIndex>,
    frames: Vec<Frame>,
}

/// Looping animated GIF writer.
///
/// Frames are flattened to opaque RGBA on arrival and encoded in one pass at [`FrameSink::end`],
/// after which [`GifSink::into_inner`] hands back the writer.
pub struct GifSink<W: Write + Send> {
    out: W,
    opts: GifSinkOpts,
    session: Option<Session>,
    frames_written: usize,
}

impl<W: Write + Send> GifSink<W> {
    pub fn new(out: W, opts: GifSinkOpts) -> Self {
        Self {
            out,
            opts,
            session: None,
            frames_written: 0,
        }
    }

    /// Frames encoded by the last completed `end`.
    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> FrameSink for GifSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> FlowloopResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(FlowloopError::validation(
                "gif width/height must be non-zero",
            ));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(FlowloopError::validation(format!(
                "gif frames are limited to 65535x65535, got {}x{}",
                cfg.width, cfg.height
            )));
        }
        let numer_ms = cfg.fps.den.checked_mul(1000).ok_or_else(|| {
            FlowloopError::validation(format!(
                "fps denominator {} is too large for a gif frame delay",
                cfg.fps.den
            ))
        })?;
        let delay = Delay::from_numer_denom_ms(numer_ms, cfg.fps.num);
        tracing::debug!(
            width = cfg.width,
            height = cfg.height,
            delay_ms = cfg.fps.frame_duration_ms(),
            "gif sink started"
        );
        self.session = Some(Session {
            cfg,
            delay,
            last: None,
            frames: Vec::new(),
        });
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> FlowloopResult<()> {
        let Some(session) = self.session.as_mut() else {
            return Err(FlowloopError::precondition(
                "gif sink received a frame before begin",
            ));
        };
        if session.last.is_some_and(|last| idx <= last) {
            return Err(FlowloopError::validation(format!(
                "frames must arrive in increasing order, got {} after {:?}",
                idx.0, session.last
            )));
        }
        if frame.width != session.cfg.width || frame.height != session.cfg.height {
            return Err(FlowloopError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, session.cfg.width, session.cfg.height
            )));
        }
        let expected_len = frame.width as usize * frame.height as usize * 4;
        if frame.data.len() != expected_len {
            return Err(FlowloopError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }

        let mut rgba = vec![0u8; expected_len];
        flatten_to_opaque_rgba8(
            &mut rgba,
            &frame.data,
            frame.premultiplied,
            self.opts.bg_rgba,
        )?;
        let image = RgbaImage::from_raw(frame.width, frame.height, rgba)
            .ok_or_else(|| FlowloopError::resource("gif frame buffer has the wrong length"))?;
        session
            .frames
            .push(Frame::from_parts(image, 0, 0, session.delay));
        session.last = Some(idx);
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    fn end(&mut self) -> FlowloopResult<()> {
        let Some(session) = self.session.take() else {
            return Err(FlowloopError::precondition("gif sink ended before begin"));
        };
        let count = session.frames.len();
        let speed = session.cfg.quality.clamp(GIF_SPEED_MIN, GIF_SPEED_MAX);

        {
            let mut encoder = GifEncoder::new_with_speed(&mut self.out, i32::from(speed));
            encoder
                .set_repeat(Repeat::Infinite)
                .map_err(|e| FlowloopError::resource(format!("gif encoder: {e}")))?;
            encoder
                .encode_frames(session.frames)
                .map_err(|e| FlowloopError::resource(format!("gif encoder: {e}")))?;
        }
        self.out
            .flush()
            .map_err(|e| FlowloopError::resource(format!("flush gif output: {e}")))?;

        self.frames_written = count;
        tracing::debug!(frames = count, speed, "gif sink finished");
        Ok(())
    }
}

fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg: Rgba8,
) -> FlowloopResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(FlowloopError::validation(
            "flatten_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg_r = u16::from(bg.r);
    let bg_g = u16::from(bg.g);
    let bg_b = u16::from(bg.b);

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        let (r, g, b) = if src_is_premul {
            (
                u16::from(s[0]) + mul_div255_u16(bg_r, inv),
                u16::from(s[1]) + mul_div255_u16(bg_g, inv),
                u16::from(s[2]) + mul_div255_u16(bg_b, inv),
            )
        } else {
            (
                mul_div255_u16(u16::from(s[0]), a) + mul_div255_u16(bg_r, inv),
                mul_div255_u16(u16::from(s[1]), a) + mul_div255_u16(bg_g, inv),
                mul_div255_u16(u16::from(s[2]), a) + mul_div255_u16(bg_b, inv),
            )
        };

        d[0] = r.min(255) as u8;
        d[1] = g.min(255) as u8;
        d[2] = b.min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
