use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{CountdownError, CountdownResult};

/// Font bytes loaded from disk, shared read-only by every frame job of a request.
#[derive(Clone, Debug)]
pub struct FontSource {
    path: PathBuf,
    bytes: Arc<Vec<u8>>,
    family: String,
}

impl FontSource {
    /// Read a font file and check that it registers at least one named family.
    pub fn load(path: impl AsRef<Path>) -> CountdownResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            CountdownError::font(format!("failed to read font '{}': {e}", path.display()))
        })?;
        Self::from_bytes(path, bytes)
    }

    /// Wrap in-memory font bytes; `origin` is only used for diagnostics.
    pub fn from_bytes(origin: impl Into<PathBuf>, bytes: Vec<u8>) -> CountdownResult<Self> {
        let origin = origin.into();
        let mut font_ctx = parley::FontContext::default();
        let family = register_family(&mut font_ctx, &bytes).map_err(|e| {
            CountdownError::font(format!("unusable font '{}': {e}", origin.display()))
        })?;
        Ok(Self {
            path: origin,
            bytes: Arc::new(bytes),
            family,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

fn register_family(font_ctx: &mut parley::FontContext, bytes: &[u8]) -> Result<String, String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| "no font families registered from font bytes".to_string())?;
    font_ctx
        .collection
        .family_name(family_id)
        .map(str::to_string)
        .ok_or_else(|| "registered font family has no name".to_string())
}

/// Measured single-line layout ready to be drawn.
pub(crate) struct LineLayout {
    pub(crate) layout: parley::Layout<Rgb8>,
}

impl LineLayout {
    pub(crate) fn width(&self) -> f32 {
        self.layout.width()
    }

    pub(crate) fn height(&self) -> f32 {
        self.layout.height()
    }
}

/// Per-worker Parley contexts with the countdown font registered.
///
/// Not shared between threads; each frame job owns one.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgb8>,
    family: String,
}

impl TextLayoutEngine {
    pub(crate) fn new(font: &FontSource) -> CountdownResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family = register_family(&mut font_ctx, font.bytes())
            .map_err(|e| CountdownError::font(format!("'{}': {e}", font.path().display())))?;
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
        })
    }

    /// Shape and lay out `text` on a single unbounded line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: Rgb8,
    ) -> CountdownResult<LineLayout> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CountdownError::validation(
                "text size must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgb8> = builder.build(text);
        layout.break_all_lines(None);

        if layout.lines().next().is_none() {
            return Err(CountdownError::render(format!(
                "text '{text}' produced no lines"
            )));
        }
        Ok(LineLayout { layout })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
