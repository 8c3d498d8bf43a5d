//! Glyph rasterization.
//!
//! The packer only needs "give me the bitmap and metrics for this code
//! point"; [`GlyphRasterizer`] is that seam. [`SwashRasterizer`] is the
//! production implementation, backed by cosmic-text's font database and
//! swash scaler.

use std::path::Path;
use std::sync::Arc;

use cosmic_text::{
    CacheKey, CacheKeyFlags, FontSystem, SubpixelBin, SwashCache, SwashContent, SwashImage,
    fontdb,
};
use image::GrayImage;

use crate::error::{FontError, FontResult};
use crate::metrics::ADVANCE_UNITS_PER_PIXEL;

/// A single rasterized glyph: an 8-bit coverage bitmap plus placement metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterizedGlyph {
    pub bitmap: GrayImage,
    /// Horizontal offset from the pen to the bitmap's left edge, in pixels.
    pub bearing_x: i32,
    /// Vertical offset from the baseline up to the bitmap's top edge, in pixels.
    pub bearing_y: i32,
    /// Pen movement in 1/64 pixel units.
    pub advance: i32,
}

impl RasterizedGlyph {
    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }
}

/// Something that can turn code points into glyph bitmaps at a fixed pixel size.
pub trait GlyphRasterizer {
    /// The pixel size every glyph is rendered at.
    fn pixel_size(&self) -> f32;

    /// Rasterize one code point.
    ///
    /// Code points the font has no glyph for render as the font's fallback
    /// glyph rather than failing.
    fn rasterize(&mut self, ch: char) -> FontResult<RasterizedGlyph>;
}

/// Rasterizer backed by cosmic-text and swash.
///
/// Owns its own font database holding exactly one font, so it can be
/// created for a single atlas build and dropped afterwards.
pub struct SwashRasterizer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    font_id: fontdb::ID,
    pixel_size: f32,
}

impl SwashRasterizer {
    /// Open a .ttf or .otf file.
    pub fn open(path: impl AsRef<Path>, pixel_size: f32) -> FontResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(FontError::FontFileNotFound(path.to_path_buf()));
        }
        let data = std::fs::read(path)?;
        tracing::debug!("Read {} bytes of font data from {}", data.len(), path.display());
        Self::from_bytes(data, pixel_size)
    }

    /// Load a font from memory. The first face in the data is used.
    pub fn from_bytes(data: Vec<u8>, pixel_size: f32) -> FontResult<Self> {
        if !pixel_size.is_finite() || pixel_size <= 0.0 {
            return Err(FontError::InvalidPixelSize(pixel_size));
        }

        let mut db = fontdb::Database::new();
        let ids = db.load_font_source(fontdb::Source::Binary(Arc::new(data)));
        let font_id = ids
            .first()
            .copied()
            .ok_or_else(|| FontError::FontLoadError("no font faces found in font data".into()))?;

        let mut font_system = FontSystem::new_with_locale_and_db(
            sys_locale::get_locale().unwrap_or_else(|| String::from("en-US")),
            db,
        );
        if font_system.get_font(font_id).is_none() {
            return Err(FontError::FontLoadError(
                "font face could not be parsed".into(),
            ));
        }

        Ok(Self {
            font_system,
            swash_cache: SwashCache::new(),
            font_id,
            pixel_size,
        })
    }

    fn cache_key(&self, glyph_id: u16) -> CacheKey {
        CacheKey {
            font_id: self.font_id,
            glyph_id,
            font_size_bits: self.pixel_size.to_bits(),
            x_bin: SubpixelBin::Zero,
            y_bin: SubpixelBin::Zero,
            flags: CacheKeyFlags::empty(),
        }
    }
}

impl GlyphRasterizer for SwashRasterizer {
    fn pixel_size(&self) -> f32 {
        self.pixel_size
    }

    fn rasterize(&mut self, ch: char) -> FontResult<RasterizedGlyph> {
        let font = self
            .font_system
            .get_font(self.font_id)
            .ok_or_else(|| FontError::FontLoadError("font face is no longer available".into()))?;

        let swash_font = font.as_swash();
        let glyph_id = swash_font.charmap().map(ch);
        if glyph_id == 0 {
            tracing::trace!("No glyph for {:?}, rendering the fallback glyph", ch);
        }
        let advance_px = swash_font
            .glyph_metrics(&[])
            .scale(self.pixel_size)
            .advance_width(glyph_id);
        let advance = (advance_px * ADVANCE_UNITS_PER_PIXEL as f32).round() as i32;

        let cache_key = self.cache_key(glyph_id);
        let glyph = match self
            .swash_cache
            .get_image_uncached(&mut self.font_system, cache_key)
        {
            Some(image) => RasterizedGlyph {
                bearing_x: image.placement.left,
                bearing_y: image.placement.top,
                bitmap: coverage_bitmap(ch, &image)?,
                advance,
            },
            None => RasterizedGlyph {
                bitmap: GrayImage::new(0, 0),
                bearing_x: 0,
                bearing_y: 0,
                advance,
            },
        };

        tracing::trace!(
            "Rasterized {:?}: {}x{} bearing ({}, {}) advance {}",
            ch,
            glyph.width(),
            glyph.height(),
            glyph.bearing_x,
            glyph.bearing_y,
            glyph.advance
        );
        Ok(glyph)
    }
}

/// Reduce a swash image to one byte of coverage per pixel.
fn coverage_bitmap(ch: char, image: &SwashImage) -> FontResult<GrayImage> {
    let width = image.placement.width;
    let height = image.placement.height;

    let data = match image.content {
        SwashContent::Mask => image.data.clone(),
        SwashContent::SubpixelMask => image
            .data
            .chunks_exact(4)
            .map(|px| ((px[0] as u16 + px[1] as u16 + px[2] as u16) / 3) as u8)
            .collect(),
        SwashContent::Color => {
            tracing::warn!("Glyph {:?} is a colour bitmap; keeping only its alpha", ch);
            image.data.chunks_exact(4).map(|px| px[3]).collect()
        }
    };

    GrayImage::from_raw(width, height, data).ok_or_else(|| {
        FontError::FontLoadError(format!(
            "bitmap for {:?} does not match its {}x{} placement",
            ch, width, height
        ))
    })
}
