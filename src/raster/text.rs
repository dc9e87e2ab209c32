use std::borrow::Cow;

use crate::error::{BoothError, Result};
use crate::raster::types::Color;

/// DejaVu Sans Bold, bundled so captions render the same on every machine
static BUNDLED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

/// RGBA8 brush color carried through Parley layout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrush {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl From<Color> for TextBrush {
    fn from(color: Color) -> Self {
        Self {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        }
    }
}

/// Stand-in for a symbol the bundled font has no glyph for
pub fn displayable(c: char) -> char {
    match c {
        '✨' => '✦',
        '💕' | '❤' => '♥',
        '⭐' | '🌟' => '★',
        other => other,
    }
}

fn substitute(text: &str) -> Cow<'_, str> {
    if text.chars().all(|c| displayable(c) == c) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().map(displayable).collect())
    }
}

/// One rasterized line of text in premultiplied RGBA8.
///
/// The line box starts `pad` pixels in from the top-left corner.
#[derive(Debug, Clone)]
pub struct TextBitmap {
    pub width: u32,
    pub height: u32,
    pub pad: u32,
    pub pixels: Vec<u8>,
}

/// Shaped line metrics, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineExtent {
    pub advance: f64,
    /// Distance from the top of the line box to the baseline
    pub baseline: f64,
    pub height: f64,
}

/// Lays out single lines with Parley and rasterizes them with vello_cpu.
///
/// Only the bundled font is registered; no system fonts are consulted.
pub struct TextRenderer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    family: String,
    font: vello_cpu::peniko::FontData,
}

impl TextRenderer {
    pub fn new() -> Result<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(BUNDLED_FONT.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| BoothError::generic("bundled font registered no families"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| BoothError::generic("bundled font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            font: vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(BUNDLED_FONT.to_vec()),
                0,
            ),
        })
    }

    fn layout(&mut self, text: &str, size_px: f32, color: Color) -> parley::Layout<TextBrush> {
        let text = substitute(text);
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, &*text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrush::from(color)));

        let mut layout: parley::Layout<TextBrush> = builder.build(&*text);
        layout.break_all_lines(None);
        layout
    }

    /// Measure one line without drawing it
    pub fn measure(&mut self, text: &str, size_px: f32) -> LineExtent {
        let layout = self.layout(text, size_px, Color::BLACK);
        extent_of(&layout)
    }

    /// Rasterize one line, shifted right and down by `offset` (sub-pixel).
    ///
    /// Returns `None` when nothing would be drawn.
    pub fn rasterize(
        &mut self,
        text: &str,
        size_px: f32,
        color: Color,
        offset: (f64, f64),
    ) -> Option<TextBitmap> {
        if text.is_empty() || color.a == 0 || !size_px.is_finite() || size_px <= 0.0 {
            return None;
        }

        let layout = self.layout(text, size_px, color);
        let extent = extent_of(&layout);
        if extent.advance <= 0.0 {
            return None;
        }

        // Glyph outlines may overhang the advance box slightly
        let pad = (size_px as f64 / 4.0).ceil();
        let width = (extent.advance + 2.0 * pad + 1.0).ceil();
        let height = (extent.height + 2.0 * pad + 1.0).ceil();
        if width > u16::MAX as f64 || height > u16::MAX as f64 {
            return None;
        }
        let (w, h) = (width as u16, height as u16);

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            pad + offset.0,
            pad + offset.1,
        )));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Some(TextBitmap {
            width: w as u32,
            height: h as u32,
            pad: pad as u32,
            pixels: pixmap.data_as_u8_slice().to_vec(),
        })
    }
}

fn extent_of(layout: &parley::Layout<TextBrush>) -> LineExtent {
    let baseline = layout
        .lines()
        .next()
        .map(|line| line.metrics().baseline as f64)
        .unwrap_or(0.0);
    LineExtent {
        advance: layout.width() as f64,
        baseline,
        height: layout.height() as f64,
    }
}

/// Undo premultiplication of one RGBA8 pixel
pub fn unpremultiply(px: [u8; 4]) -> [u8; 4] {
    let a = px[3] as u16;
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let un = |c: u8| -> u8 { ((c as u16 * 255 + a / 2) / a).min(255) as u8 };
    [un(px[0]), un(px[1]), un(px[2]), px[3]]
}
