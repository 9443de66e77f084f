use crate::countdown::sequence::DEFAULT_FRAME_BUDGET;
use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{CountdownError, CountdownResult};

/// GIF delay unit is 1/100 s; 100 shows each frame for one second.
pub const DEFAULT_FRAME_DELAY_CS: u16 = 100;

/// Fixed layout and timing of every countdown animation.
#[derive(Clone, Debug, PartialEq)]
pub struct CountdownStyle {
    pub canvas: Canvas,
    pub font_size_px: f32,
    pub background: Rgb8,
    pub text_color: Rgb8,
    /// Frames rendered when the target is at least this many seconds away.
    pub frame_budget: u32,
    /// Per-frame display time in centiseconds.
    pub frame_delay_cs: u16,
}

impl Default for CountdownStyle {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 760,
                height: 160,
            },
            font_size_px: 80.0,
            background: Rgb8::WHITE,
            text_color: Rgb8::BLUE,
            frame_budget: DEFAULT_FRAME_BUDGET,
            frame_delay_cs: DEFAULT_FRAME_DELAY_CS,
        }
    }
}

impl CountdownStyle {
    pub fn validate(&self) -> CountdownResult<()> {
        self.canvas.validate()?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(CountdownError::validation(
                "font size must be finite and > 0",
            ));
        }
        if self.frame_budget == 0 {
            return Err(CountdownError::validation("frame budget must be >= 1"));
        }
        if self.frame_delay_cs == 0 {
            return Err(CountdownError::validation("frame delay must be >= 1cs"));
        }
        Ok(())
    }
}
