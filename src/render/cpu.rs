use crate::countdown::format::format_remaining;
use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{CountdownError, CountdownResult};
use crate::render::frame::FrameRGBA;
use crate::render::style::CountdownStyle;
use crate::render::text::{FontSource, LineLayout, TextLayoutEngine};

/// CPU rasterizer for countdown frames, backed by `vello_cpu`.
///
/// Holds its own layout engine and raster context, so one instance serves one
/// worker thread and is reused across the frames that worker draws.
pub(crate) struct FrameRenderer {
    canvas: Canvas,
    width: u16,
    height: u16,
    font_size_px: f32,
    background: Rgb8,
    text_color: Rgb8,
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
    ctx: Option<vello_cpu::RenderContext>,
}

impl FrameRenderer {
    pub(crate) fn new(style: &CountdownStyle, font: &FontSource) -> CountdownResult<Self> {
        style.validate()?;
        let engine = TextLayoutEngine::new(font)?;
        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes().to_vec()),
            0,
        );
        Ok(Self {
            canvas: style.canvas,
            width: style.canvas.width_u16()?,
            height: style.canvas.height_u16()?,
            font_size_px: style.font_size_px,
            background: style.background,
            text_color: style.text_color,
            engine,
            font: font_data,
            ctx: None,
        })
    }

    /// Draw `format_remaining(remaining_secs)` centered on the background.
    pub(crate) fn render(&mut self, remaining_secs: i64) -> CountdownResult<FrameRGBA> {
        let text = format_remaining(remaining_secs);
        let line = self
            .engine
            .layout_line(&text, self.font_size_px, self.text_color)?;
        let (dx, dy) = centered_origin(self.canvas, &line);

        let mut ctx = match self.ctx.take() {
            Some(ctx) => ctx,
            None => vello_cpu::RenderContext::new(self.width, self.height),
        };
        ctx.reset();

        let bg = self.background;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.canvas.width),
            f64::from(self.canvas.height),
        ));

        ctx.set_transform(vello_cpu::kurbo::Affine::translate((dx, dy)));
        let mut drawn = 0usize;
        for layout_line in line.layout.lines() {
            for item in layout_line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, 255,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
                drawn += 1;
            }
        }
        if drawn == 0 {
            return Err(CountdownError::render(format!(
                "no glyph runs laid out for '{text}'"
            )));
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        let data = pixmap.data_as_u8_slice().to_vec();
        if data.len() != self.canvas.rgba_len() {
            return Err(CountdownError::render("pixmap byte len mismatch"));
        }
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data,
        })
    }
}

/// Top-left offset that centers the measured line box on the canvas.
fn centered_origin(canvas: Canvas, line: &LineLayout) -> (f64, f64) {
    let dx = (f64::from(canvas.width) - f64::from(line.width())) / 2.0;
    let dy = (f64::from(canvas.height) - f64::from(line.height())) / 2.0;
    (dx, dy)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
