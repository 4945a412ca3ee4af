use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use vello_cpu::kurbo as ck;

use crate::assets::Rgba8;
use crate::foundation::error::{FlowloopError, FlowloopResult};
use crate::scene::NodeId;

/// Label size on screen; constant at every zoom.
pub const LABEL_SIZE_PX: f32 = 12.0;
const LABEL_COLOR: Rgba8 = Rgba8::rgb(255, 255, 255);

/// Font bytes (TTF/OTF) used for node id labels.
#[derive(Clone)]
pub struct LabelFont(Arc<Vec<u8>>);

impl LabelFont {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Arc::new(bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LabelFont({} bytes)", self.0.len())
    }
}

/// Shapes node ids with Parley and draws them as glyph runs. Layouts are cached per id.
pub(crate) struct NodeLabels {
    shaper: Shaper,
    font: vello_cpu::peniko::FontData,
    layouts: HashMap<NodeId, parley::Layout<()>>,
}

struct Shaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family: String,
}

impl NodeLabels {
    pub(crate) fn new(font: &LabelFont) -> FlowloopResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            FlowloopError::validation("no font families registered from label font bytes")
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| FlowloopError::validation("label font family has no name"))?
            .to_string();
        tracing::debug!(%family, "label font registered");

        Ok(Self {
            shaper: Shaper {
                font_ctx,
                layout_ctx: parley::LayoutContext::new(),
                family,
            },
            font: vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(font.bytes().to_vec()),
                0,
            ),
            layouts: HashMap::new(),
        })
    }

    /// Draw `id` centered on `center`, in screen space. The label transform stays set afterwards.
    pub(crate) fn draw(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        id: NodeId,
        center: ck::Point,
    ) {
        let shaper = &mut self.shaper;
        let layout = self.layouts.entry(id).or_insert_with(|| shaper.shape(id));

        let half = ck::Vec2::new(
            f64::from(layout.width()) / 2.0,
            f64::from(layout.height()) / 2.0,
        );
        ctx.set_transform(ck::Affine::translate((center - half).to_vec2()));
        ctx.set_paint(LABEL_COLOR.to_cpu());

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }
}

impl Shaper {
    fn shape(&mut self, id: NodeId) -> parley::Layout<()> {
        let text = id.to_string();
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, &text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(LABEL_SIZE_PX));
        let mut layout: parley::Layout<()> = builder.build(&text);
        layout.break_all_lines(None);
        layout
    }
}
