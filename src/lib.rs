//! Countdown timers rendered as animated GIFs and served over HTTP.
//!
//! # Pipeline overview
//!
//! 1. **Plan**: `(end_time, now) -> FramePlan` (clamped distance, one value per frame)
//! 2. **Render**: `FramePlan -> Vec<FrameRGBA>` (one `rayon` job per frame, CPU raster)
//! 3. **Encode**: `Vec<FrameRGBA> -> GIF` (Floyd-Steinberg dithering to the Plan 9 palette)
//! 4. **Serve**: `GET /countdown-gif?endTime=<unix-seconds>` returns the artifact
//!
//! Frames and artifacts live in memory for the duration of one request; nothing
//! is written to disk while serving.
#![forbid(unsafe_code)]

mod countdown;
mod encode;
mod foundation;
mod render;
mod server;

pub use countdown::format::format_remaining;
pub use countdown::job::{AnimationArtifact, CountdownJob};
pub use countdown::sequence::{
    DEFAULT_FRAME_BUDGET, FramePlan, FrameSpec, MAX_DISTANCE_SECS, unix_now,
};
pub use encode::gif::{GifAnimationEncoder, IndexedFrame, encode_animation, quantize_frame};
pub use encode::palette::Plan9Palette;
pub use foundation::core::{Canvas, FrameIndex, Rgb8};
pub use foundation::error::{CountdownError, CountdownResult};
pub use render::frame::FrameRGBA;
pub use render::pipeline::{build_thread_pool, render_frames};
pub use render::style::{CountdownStyle, DEFAULT_FRAME_DELAY_CS};
pub use render::text::FontSource;
pub use server::config::{DEFAULT_FONT_PATH, ServerConfig};
pub use server::error::{ApiError, ErrorBody};
pub use server::handler::{
    AppState, COUNTDOWN_PATH, CountdownQuery, countdown_gif, parse_end_time, router,
};
