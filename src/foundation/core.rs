use crate::foundation::error::{CountdownError, CountdownResult};

/// 0-based position of a frame inside one animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameIndex(pub u32);

/// Pixel dimensions of every frame in an animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// Reject sizes that the raster context or the GIF container cannot hold.
    pub fn validate(self) -> CountdownResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CountdownError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(CountdownError::validation(format!(
                "canvas {}x{} exceeds the 65535px limit",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub(crate) fn width_u16(self) -> CountdownResult<u16> {
        self.width
            .try_into()
            .map_err(|_| CountdownError::validation("canvas width exceeds u16"))
    }

    pub(crate) fn height_u16(self) -> CountdownResult<u16> {
        self.height
            .try_into()
            .map_err(|_| CountdownError::validation("canvas height exceeds u16"))
    }

    /// Byte length of a tightly packed RGBA8 frame of this size.
    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// Opaque RGB8 color; also the Parley text brush.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLUE: Self = Self::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
