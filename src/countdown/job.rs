use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::countdown::sequence::FramePlan;
use crate::encode::gif::encode_animation;
use crate::foundation::core::Canvas;
use crate::foundation::error::CountdownResult;
use crate::render::pipeline::render_frames;
use crate::render::style::CountdownStyle;
use crate::render::text::FontSource;

/// One encoded countdown GIF, owned by the request that produced it.
#[derive(Clone, Debug)]
pub struct AnimationArtifact {
    id: Uuid,
    canvas: Canvas,
    distance: i64,
    frame_count: usize,
    bytes: Vec<u8>,
}

impl AnimationArtifact {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Clamped seconds-to-target shown by the first frame.
    pub fn distance(&self) -> i64 {
        self.distance
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn content_type(&self) -> &'static str {
        "image/gif"
    }

    /// Suggested download name, unique per artifact.
    pub fn file_name(&self) -> String {
        format!("countdown-{}.gif", self.id)
    }
}

/// Plan, render, and encode countdown animations with a fixed style and font.
///
/// Stateless between calls; one instance is shared by every request.
#[derive(Clone, Debug)]
pub struct CountdownJob {
    style: CountdownStyle,
    font_path: PathBuf,
}

impl CountdownJob {
    pub fn new(style: CountdownStyle, font_path: impl Into<PathBuf>) -> CountdownResult<Self> {
        style.validate()?;
        Ok(Self {
            style,
            font_path: font_path.into(),
        })
    }

    pub fn style(&self) -> &CountdownStyle {
        &self.style
    }

    pub fn font_path(&self) -> &Path {
        &self.font_path
    }

    pub fn plan(&self, end_time: i64, now: i64) -> FramePlan {
        FramePlan::with_budget(end_time, now, self.style.frame_budget)
    }

    /// Produce the animation for `end_time` as seen at `now` (both Unix seconds).
    ///
    /// The font is re-read on every call, so a missing or broken font fails
    /// this request only.
    #[tracing::instrument(
        skip(self, pool),
        fields(
            distance = tracing::field::Empty,
            frames = tracing::field::Empty,
            artifact = tracing::field::Empty
        )
    )]
    pub fn render(
        &self,
        end_time: i64,
        now: i64,
        pool: &rayon::ThreadPool,
    ) -> CountdownResult<AnimationArtifact> {
        let plan = self.plan(end_time, now);
        let span = tracing::Span::current();
        span.record("distance", plan.distance());
        span.record("frames", plan.len());

        let font = FontSource::load(&self.font_path)?;
        let frames = render_frames(&plan, &self.style, &font, pool)?;
        let bytes = encode_animation(
            &frames,
            self.style.canvas,
            self.style.frame_delay_cs,
            self.style.background,
            pool,
        )?;

        let id = Uuid::new_v4();
        span.record("artifact", tracing::field::display(id));
        tracing::debug!(bytes = bytes.len(), "countdown animation encoded");

        Ok(AnimationArtifact {
            id,
            canvas: self.style.canvas,
            distance: plan.distance(),
            frame_count: frames.len(),
            bytes,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/countdown/job.rs"]
mod tests;
