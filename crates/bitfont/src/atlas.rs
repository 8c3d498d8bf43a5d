//! The packed font atlas: one intensity image plus pixel-space metrics.

use bitfont_core::alloc::HashMap;
use image::GrayImage;

use crate::error::{FontError, FontResult};
use crate::metrics::GlyphMetrics;

/// Ownership state of the atlas image.
///
/// The image can be moved out once, typically into a texture upload. After
/// that the atlas keeps its metrics but every image access fails with
/// [`FontError::ImageTransferred`].
#[derive(Debug, Clone, PartialEq)]
pub enum AtlasImage {
    Owned(GrayImage),
    Transferred,
}

/// A bitmap font: the packed glyph image and a metrics entry per code point.
///
/// Built by [`AtlasPacker`](crate::AtlasPacker) or loaded with
/// [`read_font`](crate::read_font). The image and metrics never change after
/// construction; the only state change is [`take_image`](Self::take_image).
#[derive(Debug, Clone, PartialEq)]
pub struct FontAtlas {
    glyphs: HashMap<char, GlyphMetrics>,
    image: AtlasImage,
}

impl FontAtlas {
    pub fn new(glyphs: HashMap<char, GlyphMetrics>, image: GrayImage) -> Self {
        Self {
            glyphs,
            image: AtlasImage::Owned(image),
        }
    }

    /// Metrics for `ch`, or `None` when the atlas has no such glyph.
    pub fn glyph(&self, ch: char) -> Option<&GlyphMetrics> {
        self.glyphs.get(&ch)
    }

    pub fn glyphs(&self) -> &HashMap<char, GlyphMetrics> {
        &self.glyphs
    }

    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// The atlas image, unless it was transferred away.
    pub fn image(&self) -> FontResult<&GrayImage> {
        match &self.image {
            AtlasImage::Owned(image) => Ok(image),
            AtlasImage::Transferred => Err(FontError::ImageTransferred),
        }
    }

    pub fn has_image(&self) -> bool {
        matches!(self.image, AtlasImage::Owned(_))
    }

    /// Move the image out. Succeeds exactly once.
    pub fn take_image(&mut self) -> FontResult<GrayImage> {
        match std::mem::replace(&mut self.image, AtlasImage::Transferred) {
            AtlasImage::Owned(image) => {
                tracing::debug!(
                    "Transferred {}x{} atlas image",
                    image.width(),
                    image.height()
                );
                Ok(image)
            }
            AtlasImage::Transferred => Err(FontError::ImageTransferred),
        }
    }

    /// Lowest descent and highest ascent over all glyphs, in pixels.
    ///
    /// Both start at zero, so a font whose glyphs all sit above the
    /// baseline reports a lower extreme of 0.
    pub fn vertical_extremes(&self) -> (i32, i32) {
        self.glyphs
            .values()
            .fold((0, 0), |(lo, hi), metrics| {
                (lo.min(metrics.descent()), hi.max(metrics.bearing_y))
            })
    }
}
