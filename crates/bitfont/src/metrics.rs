//! Per-glyph metrics in atlas pixel space and in render space.

use bitfont_core::math::Vec2;

/// Number of advance units per pixel; rasterizers report advances in 26.6 fixed point.
pub const ADVANCE_UNITS_PER_PIXEL: i32 = 64;

/// Pixel-space metrics of one glyph, as recorded by the atlas packer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GlyphMetrics {
    /// Left edge of the glyph's cell in the atlas image.
    pub x: u32,
    /// Top edge of the glyph's cell in the atlas image.
    pub y: u32,
    /// Bitmap width (not the padded cell width).
    pub width: u32,
    /// Bitmap height (not the padded cell height).
    pub height: u32,
    /// Horizontal offset from the pen to the bitmap's left edge.
    pub bearing_x: i32,
    /// Vertical offset from the baseline up to the bitmap's top edge.
    pub bearing_y: i32,
    /// Pen movement in 1/64 pixel units.
    pub advance: i32,
}

impl GlyphMetrics {
    /// Advance in whole pixels.
    pub fn advance_px(&self) -> f32 {
        self.advance as f32 / ADVANCE_UNITS_PER_PIXEL as f32
    }

    /// Distance from the baseline down to the bitmap's bottom edge; negative below the baseline.
    pub fn descent(&self) -> i32 {
        self.bearing_y - self.height as i32
    }

    /// Whether the `(x, y, width, height)` rectangle lies inside an image of the given size.
    pub fn fits_in(&self, image_width: u32, image_height: u32) -> bool {
        self.x.saturating_add(self.width) <= image_width
            && self.y.saturating_add(self.height) <= image_height
    }
}

/// Render-space metrics of one glyph, normalized to a target surface.
///
/// Positions are in normalized device units where the full surface spans
/// `[-1, 1]`; texture coordinates are in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderGlyph {
    pub size: Vec2,
    pub bearing: Vec2,
    pub advance: f32,
    /// Texture coordinate of the glyph's bottom-left corner.
    pub tex_origin: Vec2,
    /// Signed texture extent; `y` is negative because image rows run top-down.
    pub tex_size: Vec2,
}
