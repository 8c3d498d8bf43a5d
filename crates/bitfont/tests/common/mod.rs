//! Shared helpers for integration tests.

#![allow(dead_code)]

use bitfont::{FontResult, GlyphRasterizer, RasterizedGlyph};
use image::{GrayImage, Luma};

/// Deterministic rasterizer producing a gradient block per character.
///
/// Width is 4..=9 and height 6..=11 depending on the code point, the bitmap
/// holds a recognisable pattern, and descenders come from lowercase letters
/// below 'h'.
pub struct SyntheticRasterizer {
    pub calls: Vec<char>,
}

impl SyntheticRasterizer {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }
}

impl GlyphRasterizer for SyntheticRasterizer {
    fn pixel_size(&self) -> f32 {
        12.0
    }

    fn rasterize(&mut self, ch: char) -> FontResult<RasterizedGlyph> {
        self.calls.push(ch);
        let code = ch as u32;
        let width = 4 + code % 6;
        let height = 6 + code % 6;
        let bitmap = GrayImage::from_fn(width, height, |x, y| {
            Luma([((code * 7 + x * 13 + y * 29) % 251) as u8])
        });
        let descent = if ch.is_ascii_lowercase() && ch < 'h' { 2 } else { 0 };
        Ok(RasterizedGlyph {
            bitmap,
            bearing_x: (code % 3) as i32 - 1,
            bearing_y: height as i32 - descent,
            advance: (width as i32 + 1) * 64,
        })
    }
}

/// Paths where common systems keep a scalable font.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// First installed system font, if any.
pub fn system_font() -> Option<&'static str> {
    SYSTEM_FONTS
        .iter()
        .copied()
        .find(|path| std::path::Path::new(path).is_file())
}
