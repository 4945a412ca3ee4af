use std::sync::Arc;

use vello_cpu::kurbo::{self as ck, Shape as _};

use crate::assets::{BackgroundImage, Rgba8};
use crate::foundation::core::{Affine, Point, Vec2};
use crate::foundation::error::{FlowloopError, FlowloopResult};
use crate::path::point_at_progress;
use crate::render::backend::{FrameRGBA, RenderBackend, RenderOpts, canvas_dims_u16};
use crate::render::label::NodeLabels;
use crate::render::marker::{MARKER_SHADOW_COLOR, MarkerGeometry};
use crate::render::view::FrameView;
use crate::scene::Node;

const GRID_COLOR: Rgba8 = Rgba8::rgb(0xcc, 0xcc, 0xcc);
const GRID_OPACITY: f32 = 0.2;
// Zoomed far out the overlay would be a solid wash; skip it past this many lines per axis.
const GRID_MAX_LINES: f64 = 2048.0;

const PATH_COLOR: Rgba8 = Rgba8::rgb(0x34, 0x49, 0x5e);
const PATH_WIDTH_PX: f64 = 5.0;

const NODE_FILL: Rgba8 = Rgba8::rgb(0x29, 0x80, 0xb9);
const NODE_HIGHLIGHT: Rgba8 = Rgba8::rgba(0x45, 0xaa, 0xf2, 160);
const NODE_OUTLINE: Rgba8 = Rgba8::rgb(0x1e, 0x6b, 0x9a);
const NODE_OUTLINE_PX: f64 = 2.0;
const NODE_SHADOW: Rgba8 = Rgba8::rgba(0, 0, 0, 51);
const NODE_SHADOW_OFFSET_PX: f64 = 2.0;
const NODE_SHADOW_BLUR_PX: f64 = 5.0;
const HOVER_COLOR: Rgba8 = Rgba8::rgb(0xff, 0x98, 0x00);
const HOVER_GAP: f64 = 3.0;
const HOVER_WIDTH_PX: f64 = 3.0;

const RUBBER_BAND_COLOR: Rgba8 = Rgba8::rgb(0x00, 0x7b, 0xff);
const RUBBER_BAND_WIDTH_PX: f64 = 2.0;
const RUBBER_BAND_DASH_PX: f64 = 5.0;

// Blur is approximated by this many stacked translucent discs.
const SOFT_DISC_STEPS: u32 = 4;

/// CPU raster backend on top of `vello_cpu`.
pub struct CpuBackend {
    opts: RenderOpts,
    background: Option<CachedBackground>,
    labels: Option<NodeLabels>,
}

struct CachedBackground {
    source: Arc<Vec<u8>>,
    width: u32,
    height: u32,
    paint: vello_cpu::Image,
}

impl CpuBackend {
    pub fn new(opts: RenderOpts) -> Self {
        Self {
            opts,
            background: None,
            labels: None,
        }
    }

    pub fn opts(&self) -> &RenderOpts {
        &self.opts
    }

    fn background_paint(&mut self, bg: &BackgroundImage) -> FlowloopResult<vello_cpu::Image> {
        if let Some(cached) = &self.background
            && Arc::ptr_eq(&cached.source, &bg.rgba8_premul)
            && cached.width == bg.width
            && cached.height == bg.height
        {
            return Ok(cached.paint.clone());
        }

        let pixmap = image_premul_bytes_to_pixmap(&bg.rgba8_premul, bg.width, bg.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.background = Some(CachedBackground {
            source: Arc::clone(&bg.rgba8_premul),
            width: bg.width,
            height: bg.height,
            paint: paint.clone(),
        });
        Ok(paint)
    }

    /// Label shaper for the configured font, registered on first use.
    fn node_labels(&mut self) -> FlowloopResult<Option<&mut NodeLabels>> {
        if self.labels.is_none()
            && let Some(font) = &self.opts.label_font
        {
            self.labels = Some(NodeLabels::new(font)?);
        }
        Ok(self.labels.as_mut())
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(skip(self, view), fields(
        width = view.canvas.width,
        height = view.canvas.height,
        nodes = view.nodes.len(),
        dots = view.dots.len(),
    ))]
    fn render(&mut self, view: &FrameView<'_>) -> FlowloopResult<FrameRGBA> {
        let (w, h) = canvas_dims_u16(view.canvas.width, view.canvas.height)?;
        let background = view
            .background
            .map(|bg| self.background_paint(bg).map(|paint| (bg, paint)))
            .transpose()?;
        let clear_rgba = self.opts.clear_rgba;
        let mut labels = if view.decorations.show_scene && !view.nodes.is_empty() {
            self.node_labels()?
        } else {
            None
        };

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_paint_transform(ck::Affine::IDENTITY);
        let canvas_rect = ck::Rect::new(0.0, 0.0, f64::from(w), f64::from(h));

        if let Some(clear) = clear_rgba {
            ctx.set_transform(ck::Affine::IDENTITY);
            ctx.set_paint(clear.to_cpu());
            ctx.fill_rect(&canvas_rect);
        }

        let camera = view.camera.affine();
        let px = 1.0 / view.camera.zoom;
        ctx.set_transform(affine_to_cpu(camera));

        if let Some((bg, paint)) = background {
            // Stretched over the canvas bounds in world space.
            let sx = f64::from(view.canvas.width) / f64::from(bg.width);
            let sy = f64::from(view.canvas.height) / f64::from(bg.height);
            ctx.set_transform(affine_to_cpu(camera * Affine::scale_non_uniform(sx, sy)));
            ctx.set_paint(paint);
            ctx.fill_rect(&ck::Rect::new(
                0.0,
                0.0,
                f64::from(bg.width),
                f64::from(bg.height),
            ));
            ctx.set_transform(affine_to_cpu(camera));
        }

        if let Some(grid) = view.decorations.grid {
            draw_grid(&mut ctx, view, grid, px);
        }

        if view.decorations.show_scene {
            draw_path(&mut ctx, view.path, px);
            for node in view.nodes {
                let hovered = view.decorations.hovered == Some(node.id);
                draw_node(&mut ctx, node, hovered, px);
                if let Some(labels) = labels.as_deref_mut() {
                    let center = view.camera.screen_from_world(node.pos);
                    labels.draw(&mut ctx, node.id, point_to_cpu(center));
                    ctx.set_transform(affine_to_cpu(camera));
                }
            }
            if let (Some(to), Some(from)) = (view.decorations.rubber_band_to, view.path.last()) {
                draw_rubber_band(&mut ctx, *from, to, px);
            }
        }

        let geom = MarkerGeometry::for_zoom(view.style, view.camera.zoom);
        for dot in view.dots {
            let Some(pos) = point_at_progress(view.path, dot.progress) else {
                continue;
            };
            draw_marker(&mut ctx, view, &geom, pos);
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: view.canvas.width,
            height: view.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn draw_grid(ctx: &mut vello_cpu::RenderContext, view: &FrameView<'_>, size: f64, px: f64) {
    if !(size.is_finite() && size > 0.0) {
        return;
    }
    let visible = view.camera.visible_world_rect(view.canvas);
    let (i0, i1) = ((visible.x0 / size).floor(), (visible.x1 / size).ceil());
    let (j0, j1) = ((visible.y0 / size).floor(), (visible.y1 / size).ceil());
    let (Some(nx), Some(ny)) = (line_count(i0, i1), line_count(j0, j1)) else {
        tracing::trace!(size, "grid too dense at this zoom, skipped");
        return;
    };
    let (start_x, end_x) = (i0 * size, i1 * size);
    let (start_y, end_y) = (j0 * size, j1 * size);

    // Positions come from integer steps; `x += size` stalls once `size` drops below the float
    // spacing at `x`.
    let mut lines = ck::BezPath::new();
    for i in 0..=nx {
        let x = (i0 + f64::from(i)) * size;
        lines.move_to((x, start_y));
        lines.line_to((x, end_y));
    }
    for j in 0..=ny {
        let y = (j0 + f64::from(j)) * size;
        lines.move_to((start_x, y));
        lines.line_to((end_x, y));
    }

    ctx.push_opacity_layer(GRID_OPACITY);
    ctx.set_paint(GRID_COLOR.to_cpu());
    ctx.set_stroke(ck::Stroke::new(px));
    ctx.stroke_path(&lines);
    ctx.pop_layer();
}

/// Number of grid steps between two cell indices, or `None` when the span is not finite or too
/// dense to draw.
fn line_count(first: f64, last: f64) -> Option<u32> {
    let span = last - first;
    if !span.is_finite() || !(0.0..=GRID_MAX_LINES).contains(&span) {
        return None;
    }
    Some(span as u32)
}

fn draw_path(ctx: &mut vello_cpu::RenderContext, points: &[Point], px: f64) {
    let [first, rest @ ..] = points else {
        return;
    };
    if rest.is_empty() {
        return;
    }
    let mut line = ck::BezPath::new();
    line.move_to(point_to_cpu(*first));
    for p in rest {
        line.line_to(point_to_cpu(*p));
    }
    ctx.set_paint(PATH_COLOR.to_cpu());
    ctx.set_stroke(
        ck::Stroke::new(PATH_WIDTH_PX * px)
            .with_caps(ck::Cap::Round)
            .with_join(ck::Join::Round),
    );
    ctx.stroke_path(&line);
}

fn draw_node(ctx: &mut vello_cpu::RenderContext, node: &Node, hovered: bool, px: f64) {
    let shadow_offset = ck::Vec2::new(NODE_SHADOW_OFFSET_PX * px, NODE_SHADOW_OFFSET_PX * px);
    soft_disc(
        ctx,
        point_to_cpu(node.pos) + shadow_offset,
        node.radius,
        NODE_SHADOW,
        NODE_SHADOW_BLUR_PX * px,
        px,
    );

    let body = circle_path(node.pos, node.radius, px);
    ctx.set_paint(NODE_FILL.to_cpu());
    ctx.fill_path(&body);

    // Light spot up and to the left, fully inside the disc.
    let spot = node.pos - Vec2::new(node.radius / 3.0, node.radius / 3.0);
    ctx.set_paint(NODE_HIGHLIGHT.to_cpu());
    ctx.fill_path(&circle_path(spot, node.radius / 2.0, px));

    ctx.set_paint(NODE_OUTLINE.to_cpu());
    ctx.set_stroke(ck::Stroke::new(NODE_OUTLINE_PX * px));
    ctx.stroke_path(&body);

    if hovered {
        ctx.set_paint(HOVER_COLOR.to_cpu());
        ctx.set_stroke(ck::Stroke::new(HOVER_WIDTH_PX * px));
        ctx.stroke_path(&circle_path(node.pos, node.radius + HOVER_GAP, px));
    }
}

fn draw_rubber_band(ctx: &mut vello_cpu::RenderContext, from: Point, to: Point, px: f64) {
    let mut line = ck::BezPath::new();
    line.move_to(point_to_cpu(from));
    line.line_to(point_to_cpu(to));
    let dash = RUBBER_BAND_DASH_PX * px;
    ctx.set_paint(RUBBER_BAND_COLOR.to_cpu());
    ctx.set_stroke(
        ck::Stroke::new(RUBBER_BAND_WIDTH_PX * px)
            .with_dashes(0.0, [dash, dash]),
    );
    ctx.stroke_path(&line);
}

fn draw_marker(
    ctx: &mut vello_cpu::RenderContext,
    view: &FrameView<'_>,
    geom: &MarkerGeometry,
    pos: Point,
) {
    let px = 1.0 / view.camera.zoom;
    let style = view.style;
    if style.shadow() {
        soft_disc(
            ctx,
            point_to_cpu(pos) + ck::Vec2::new(geom.shadow_offset.x, geom.shadow_offset.y),
            geom.radius,
            MARKER_SHADOW_COLOR,
            geom.shadow_blur,
            px,
        );
    } else if style.glow() {
        soft_disc(
            ctx,
            point_to_cpu(pos),
            geom.radius,
            style.fill,
            geom.glow_blur,
            px,
        );
    }

    let body = circle_path(pos, geom.radius, px);
    ctx.set_paint(style.fill.to_cpu());
    ctx.fill_path(&body);
    ctx.set_paint(style.stroke.to_cpu());
    ctx.set_stroke(ck::Stroke::new(geom.stroke_width));
    ctx.stroke_path(&body);
}

/// A disc with a soft edge `blur` wide, built from stacked translucent discs.
fn soft_disc(
    ctx: &mut vello_cpu::RenderContext,
    center: ck::Point,
    radius: f64,
    color: Rgba8,
    blur: f64,
    px: f64,
) {
    let step_alpha = 1.0 / f64::from(SOFT_DISC_STEPS + 1);
    ctx.set_paint(color.scale_alpha(step_alpha).to_cpu());
    for i in (0..=SOFT_DISC_STEPS).rev() {
        let r = radius + blur * f64::from(i) / f64::from(SOFT_DISC_STEPS);
        ctx.fill_path(&ck::Circle::new(center, r).to_path(0.1 * px));
    }
}

fn circle_path(center: Point, radius: f64, px: f64) -> ck::BezPath {
    ck::Circle::new(point_to_cpu(center), radius).to_path(0.1 * px)
}

fn affine_to_cpu(a: Affine) -> ck::Affine {
    ck::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> ck::Point {
    ck::Point::new(p.x, p.y)
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> FlowloopResult<vello_cpu::Pixmap> {
    let (w, h) = canvas_dims_u16(width, height)?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(FlowloopError::render(
            "background image byte length mismatch",
        ));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
