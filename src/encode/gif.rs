use std::borrow::Cow;

use rayon::prelude::*;

use crate::encode::palette::Plan9Palette;
use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{CountdownError, CountdownResult};
use crate::render::frame::FrameRGBA;

/// One frame reduced to Plan 9 palette indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedFrame {
    pub width: u32,
    pub height: u32,
    /// One palette index per pixel, row-major.
    pub indices: Vec<u8>,
}

/// Flatten, Floyd-Steinberg dither, and index one frame against `palette`.
pub fn quantize_frame(
    frame: &FrameRGBA,
    palette: &Plan9Palette,
    matte: Rgb8,
) -> CountdownResult<IndexedFrame> {
    let canvas = Canvas {
        width: frame.width,
        height: frame.height,
    };
    canvas.validate()?;
    if frame.data.len() != canvas.rgba_len() {
        return Err(CountdownError::validation(
            "frame.data size mismatch with width*height*4",
        ));
    }

    let mut rgb = vec![0u8; (frame.width as usize) * (frame.height as usize) * 3];
    flatten_premul_to_rgb8(&mut rgb, &frame.data, matte)?;
    let mut img = image::RgbImage::from_raw(frame.width, frame.height, rgb)
        .ok_or_else(|| CountdownError::encode("rgb buffer does not match frame size"))?;

    image::imageops::dither(&mut img, palette);
    let indices = image::imageops::index_colors(&img, palette).into_raw();

    Ok(IndexedFrame {
        width: frame.width,
        height: frame.height,
        indices,
    })
}

/// Streaming animated GIF writer over a fixed global Plan 9 palette.
///
/// Frames are appended in call order with a constant delay; the animation
/// loops forever. Output only becomes available through [`finish`], so a
/// failed encode never yields a partial artifact.
///
/// [`finish`]: GifAnimationEncoder::finish
pub struct GifAnimationEncoder {
    canvas: Canvas,
    delay_cs: u16,
    palette: Plan9Palette,
    matte: Rgb8,
    encoder: gif::Encoder<Vec<u8>>,
    frames: usize,
}

impl GifAnimationEncoder {
    /// Start an animation of `canvas`-sized frames, each shown for `delay_cs` 1/100 s.
    pub fn new(canvas: Canvas, delay_cs: u16, matte: Rgb8) -> CountdownResult<Self> {
        canvas.validate()?;
        let palette = Plan9Palette::new();
        let mut encoder = gif::Encoder::new(
            Vec::new(),
            canvas.width_u16()?,
            canvas.height_u16()?,
            &palette.to_rgb_table(),
        )
        .map_err(|e| CountdownError::encode(format!("failed to start gif stream: {e}")))?;
        encoder
            .set_repeat(gif::Repeat::Infinite)
            .map_err(|e| CountdownError::encode(format!("failed to set gif repeat: {e}")))?;

        Ok(Self {
            canvas,
            delay_cs,
            palette,
            matte,
            encoder,
            frames: 0,
        })
    }

    pub fn palette(&self) -> &Plan9Palette {
        &self.palette
    }

    pub fn frames_written(&self) -> usize {
        self.frames
    }

    /// Quantize and append one RGBA frame.
    pub fn push_frame(&mut self, frame: &FrameRGBA) -> CountdownResult<()> {
        self.check_size(frame.width, frame.height)?;
        let indexed = quantize_frame(frame, &self.palette, self.matte)?;
        self.push_indexed(&indexed)
    }

    /// Append a frame that was already quantized against [`Plan9Palette`].
    pub fn push_indexed(&mut self, frame: &IndexedFrame) -> CountdownResult<()> {
        self.check_size(frame.width, frame.height)?;
        if frame.indices.len() != (frame.width as usize) * (frame.height as usize) {
            return Err(CountdownError::validation(
                "indexed frame length mismatch with width*height",
            ));
        }

        let gif_frame = gif::Frame {
            width: self.canvas.width_u16()?,
            height: self.canvas.height_u16()?,
            delay: self.delay_cs,
            buffer: Cow::Borrowed(frame.indices.as_slice()),
            ..gif::Frame::default()
        };
        self.encoder.write_frame(&gif_frame).map_err(|e| {
            CountdownError::encode(format!("failed to write gif frame {}: {e}", self.frames))
        })?;
        self.frames += 1;
        Ok(())
    }

    /// Write the trailer and return the encoded bytes.
    pub fn finish(self) -> CountdownResult<Vec<u8>> {
        if self.frames == 0 {
            return Err(CountdownError::validation(
                "gif animation must contain at least one frame",
            ));
        }
        self.encoder
            .into_inner()
            .map_err(|e| CountdownError::encode(format!("failed to finish gif stream: {e}")))
    }

    fn check_size(&self, width: u32, height: u32) -> CountdownResult<()> {
        if width != self.canvas.width || height != self.canvas.height {
            return Err(CountdownError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                width, height, self.canvas.width, self.canvas.height
            )));
        }
        Ok(())
    }
}

/// Encode `frames` in order into one GIF.
///
/// Quantization runs on `pool`; writing is sequential and follows slice order.
#[tracing::instrument(skip_all, fields(frames = frames.len()))]
pub fn encode_animation(
    frames: &[FrameRGBA],
    canvas: Canvas,
    delay_cs: u16,
    matte: Rgb8,
    pool: &rayon::ThreadPool,
) -> CountdownResult<Vec<u8>> {
    let mut enc = GifAnimationEncoder::new(canvas, delay_cs, matte)?;
    let palette = enc.palette().clone();

    let indexed = pool.install(|| {
        frames
            .par_iter()
            .map(|f| quantize_frame(f, &palette, matte))
            .collect::<CountdownResult<Vec<_>>>()
    })?;

    for frame in &indexed {
        enc.push_indexed(frame)?;
    }
    enc.finish()
}

/// Composite premultiplied RGBA8 over an opaque matte, dropping alpha.
fn flatten_premul_to_rgb8(dst: &mut [u8], src: &[u8], matte: Rgb8) -> CountdownResult<()> {
    if !src.len().is_multiple_of(4)
        || !dst.len().is_multiple_of(3)
        || dst.len() / 3 != src.len() / 4
    {
        return Err(CountdownError::validation(
            "flatten expects rgba8 input and rgb8 output of equal pixel count",
        ));
    }

    let bg = [
        u16::from(matte.r),
        u16::from(matte.g),
        u16::from(matte.b),
    ];
    for (d, s) in dst.chunks_exact_mut(3).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(&s[..3]);
            continue;
        }
        let inv = 255 - a;
        for c in 0..3 {
            d[c] = (u16::from(s[c]) + mul_div255(bg[c], inv)).min(255) as u8;
        }
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
