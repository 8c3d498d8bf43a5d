//! Normalization of pixel-space atlas metrics into render space.
//!
//! Render space is tied to a surface size. When the surface is resized,
//! build a new [`RenderFont`] from the atlas rather than updating the old one.

use bitfont_core::alloc::HashMap;
use bitfont_core::math::Vec2;
use bitfont_core::profiling::profile_function;

use crate::atlas::FontAtlas;
use crate::error::{FontError, FontResult};
use crate::metrics::{ADVANCE_UNITS_PER_PIXEL, GlyphMetrics, RenderGlyph};

/// Render-space metrics for every glyph of an atlas, for one surface size.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFont {
    glyphs: HashMap<char, RenderGlyph>,
    screen_size: Vec2,
    atlas_size: (u32, u32),
}

impl RenderFont {
    /// Normalize `atlas` for a surface of `screen_size` pixels.
    ///
    /// Fails with [`FontError::MissingImage`] if the atlas image is empty and
    /// with [`FontError::ImageTransferred`] if it was moved out, since texture
    /// coordinates need the image dimensions.
    pub fn from_atlas(atlas: &FontAtlas, screen_size: Vec2) -> FontResult<Self> {
        profile_function!();

        if !(screen_size.x.is_finite() && screen_size.y.is_finite())
            || screen_size.x <= 0.0
            || screen_size.y <= 0.0
        {
            return Err(FontError::InvalidSurfaceSize {
                width: screen_size.x,
                height: screen_size.y,
            });
        }

        let image = atlas.image()?;
        if image.width() == 0 || image.height() == 0 {
            return Err(FontError::MissingImage);
        }
        let image_size = Vec2::new(image.width() as f32, image.height() as f32);

        let glyphs: HashMap<char, RenderGlyph> = atlas
            .glyphs()
            .iter()
            .map(|(&ch, metrics)| (ch, normalize_glyph(metrics, image_size, screen_size)))
            .collect();

        tracing::debug!(
            "Normalized {} glyphs for a {}x{} surface",
            glyphs.len(),
            screen_size.x,
            screen_size.y
        );

        Ok(Self {
            glyphs,
            screen_size,
            atlas_size: image.dimensions(),
        })
    }

    /// Metrics for `ch`, or `None` when the font has no such glyph.
    pub fn glyph(&self, ch: char) -> Option<&RenderGlyph> {
        self.glyphs.get(&ch)
    }

    pub fn glyphs(&self) -> &HashMap<char, RenderGlyph> {
        &self.glyphs
    }

    /// Surface size this font was normalized for, in pixels.
    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    /// Dimensions of the atlas image the texture coordinates refer to.
    pub fn atlas_size(&self) -> (u32, u32) {
        self.atlas_size
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl FromIterator<(char, RenderGlyph)> for RenderFont {
    /// Assemble a font from precomputed render metrics, e.g. for tests or
    /// procedurally generated glyph sets. Surface and atlas sizes are left at zero.
    fn from_iter<I: IntoIterator<Item = (char, RenderGlyph)>>(iter: I) -> Self {
        Self {
            glyphs: iter.into_iter().collect(),
            screen_size: Vec2::ZERO,
            atlas_size: (0, 0),
        }
    }
}

/// Map one glyph's pixel metrics into render space.
///
/// The texture origin is the bottom-left of the bitmap and the texture
/// height is negative, because atlas rows are stored top-down.
pub fn normalize_glyph(metrics: &GlyphMetrics, image_size: Vec2, screen_size: Vec2) -> RenderGlyph {
    let width = metrics.width as f32;
    let height = metrics.height as f32;

    RenderGlyph {
        tex_origin: Vec2::new(
            metrics.x as f32 / image_size.x,
            (metrics.y as f32 + height) / image_size.y,
        ),
        tex_size: Vec2::new(width / image_size.x, -height / image_size.y),
        size: Vec2::new(2.0 * width / screen_size.x, 2.0 * height / screen_size.y),
        bearing: Vec2::new(
            2.0 * metrics.bearing_x as f32 / screen_size.x,
            2.0 * metrics.bearing_y as f32 / screen_size.y,
        ),
        advance: 2.0 * metrics.advance as f32 / (ADVANCE_UNITS_PER_PIXEL as f32 * screen_size.x),
    }
}
