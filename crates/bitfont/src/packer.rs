//! Grid packing of glyph bitmaps into a single atlas image.
//!
//! Every glyph gets a cell of the same size (the largest bitmap plus
//! padding), and cells are laid out row-major on a grid chosen by
//! [`best_grid_size`] to be as close to square as possible.

use std::path::Path;

use bitfont_core::alloc::HashMap;
use bitfont_core::profiling::{profile_function, profile_scope};
use image::{GrayImage, imageops};

use crate::atlas::FontAtlas;
use crate::config::{AtlasConfig, CharSet};
use crate::error::FontResult;
use crate::metrics::GlyphMetrics;
use crate::raster::{GlyphRasterizer, RasterizedGlyph, SwashRasterizer};

/// Choose a `(width, height)` grid, in cells, that holds `count` cells.
///
/// Starts at `ceil(sqrt(count))` columns and widens one column at a time
/// while the grid is no more than twice as wide as it is tall. The first
/// exact tiling wins; otherwise the candidate with the fewest empty cells in
/// its last row is kept.
///
/// ```
/// use bitfont::best_grid_size;
///
/// assert_eq!(best_grid_size(0), (0, 0));
/// assert_eq!(best_grid_size(4), (2, 2));
/// assert_eq!(best_grid_size(5), (3, 2));
/// ```
pub fn best_grid_size(count: u32) -> (u32, u32) {
    if count == 0 {
        return (0, 0);
    }

    let mut width = (count as f64).sqrt().ceil() as u32;
    let mut best = (width, count.div_ceil(width));
    let mut best_waste = u32::MAX;

    loop {
        let height = count.div_ceil(width);
        if width > 2 * height {
            break;
        }
        let remainder = count % width;
        if remainder == 0 {
            return (width, height);
        }
        let waste = width - remainder;
        if waste < best_waste {
            best = (width, height);
            best_waste = waste;
        }
        width += 1;
    }

    best
}

/// Packs rasterized glyphs into a [`FontAtlas`].
#[derive(Debug, Clone, Default)]
pub struct AtlasPacker {
    config: AtlasConfig,
}

impl AtlasPacker {
    pub fn new(config: AtlasConfig) -> Self {
        Self { config }
    }

    /// Rasterize every character once and pack the bitmaps into one image.
    ///
    /// Duplicate characters are dropped, keeping the first occurrence, so
    /// the atlas has exactly one entry per distinct character. Cell order
    /// follows `chars`. Either every glyph is packed or an error is
    /// returned.
    pub fn pack<R: GlyphRasterizer>(
        &self,
        rasterizer: &mut R,
        chars: &[char],
    ) -> FontResult<FontAtlas> {
        profile_function!();

        let charset = CharSet::new(chars.iter().copied());
        if charset.len() != chars.len() {
            tracing::warn!(
                "Dropped {} duplicate characters from atlas request",
                chars.len() - charset.len()
            );
        }

        let glyphs = {
            profile_scope!("rasterize");
            charset
                .chars()
                .iter()
                .map(|&ch| rasterizer.rasterize(ch).map(|glyph| (ch, glyph)))
                .collect::<FontResult<Vec<(char, RasterizedGlyph)>>>()?
        };

        let (cell_width, cell_height) = self.cell_size(&glyphs);
        let (grid_width, grid_height) = best_grid_size(glyphs.len() as u32);
        let image_width = self.config.align_width(grid_width * cell_width);
        let image_height = grid_height * cell_height;

        tracing::debug!(
            "Packing {} glyphs into a {}x{} grid of {}x{} cells ({}x{} image)",
            glyphs.len(),
            grid_width,
            grid_height,
            cell_width,
            cell_height,
            image_width,
            image_height
        );

        let mut image = GrayImage::new(image_width, image_height);
        let mut metrics = HashMap::with_capacity(glyphs.len());

        for (index, (ch, glyph)) in glyphs.iter().enumerate() {
            let index = index as u32;
            let x = (index % grid_width) * cell_width;
            let y = (index / grid_width) * cell_height;

            imageops::replace(&mut image, &glyph.bitmap, x as i64, y as i64);
            metrics.insert(
                *ch,
                GlyphMetrics {
                    x,
                    y,
                    width: glyph.width(),
                    height: glyph.height(),
                    bearing_x: glyph.bearing_x,
                    bearing_y: glyph.bearing_y,
                    advance: glyph.advance,
                },
            );
        }

        tracing::info!(
            "Built {}x{} font atlas with {} glyphs at {} px",
            image_width,
            image_height,
            metrics.len(),
            rasterizer.pixel_size()
        );

        Ok(FontAtlas::new(metrics, image))
    }

    /// Largest bitmap width and height, each plus the configured padding.
    fn cell_size(&self, glyphs: &[(char, RasterizedGlyph)]) -> (u32, u32) {
        if glyphs.is_empty() {
            return (0, 0);
        }
        let (max_width, max_height) = glyphs
            .iter()
            .fold((0, 0), |(w, h), (_, glyph)| {
                (w.max(glyph.width()), h.max(glyph.height()))
            });
        (max_width + self.config.padding, max_height + self.config.padding)
    }
}

/// Build an atlas from a font file.
///
/// The rasterizer lives only for the duration of this call.
pub fn build_atlas(
    font_path: impl AsRef<Path>,
    config: &AtlasConfig,
    chars: &[char],
) -> FontResult<FontAtlas> {
    config.validate()?;
    let mut rasterizer = SwashRasterizer::open(font_path, config.pixel_size)?;
    AtlasPacker::new(config.clone()).pack(&mut rasterizer, chars)
}

/// Build an atlas from font data already in memory.
pub fn build_atlas_from_bytes(
    font_data: Vec<u8>,
    config: &AtlasConfig,
    chars: &[char],
) -> FontResult<FontAtlas> {
    config.validate()?;
    let mut rasterizer = SwashRasterizer::from_bytes(font_data, config.pixel_size)?;
    AtlasPacker::new(config.clone()).pack(&mut rasterizer, chars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FontError;

    /// Produces a solid block per character, sized from the code point.
    struct BlockRasterizer {
        calls: usize,
    }

    impl GlyphRasterizer for BlockRasterizer {
        fn pixel_size(&self) -> f32 {
            16.0
        }

        fn rasterize(&mut self, ch: char) -> FontResult<RasterizedGlyph> {
            self.calls += 1;
            let code = ch as u32;
            let width = 3 + code % 5;
            let height = 6 + code % 4;
            Ok(RasterizedGlyph {
                bitmap: GrayImage::from_pixel(width, height, image::Luma([(code % 255) as u8 + 1])),
                bearing_x: 1,
                bearing_y: height as i32 - 2,
                advance: (width as i32 + 1) * 64,
            })
        }
    }

    struct FailingRasterizer;

    impl GlyphRasterizer for FailingRasterizer {
        fn pixel_size(&self) -> f32 {
            16.0
        }

        fn rasterize(&mut self, ch: char) -> FontResult<RasterizedGlyph> {
            if ch == 'c' {
                Err(FontError::FontLoadError("broken glyph".into()))
            } else {
                Ok(RasterizedGlyph {
                    bitmap: GrayImage::new(2, 2),
                    bearing_x: 0,
                    bearing_y: 2,
                    advance: 128,
                })
            }
        }
    }

    #[test]
    fn test_best_grid_size_known_values() {
        assert_eq!(best_grid_size(0), (0, 0));
        assert_eq!(best_grid_size(1), (1, 1));
        assert_eq!(best_grid_size(2), (2, 1));
        assert_eq!(best_grid_size(3), (2, 2));
        assert_eq!(best_grid_size(4), (2, 2));
        assert_eq!(best_grid_size(5), (3, 2));
        assert_eq!(best_grid_size(12), (4, 3));
        assert_eq!(best_grid_size(95), (12, 8));
    }

    #[test]
    fn test_best_grid_size_prefers_exact_tiling() {
        // 10 columns would leave 4 empty cells; 12 x 8 tiles 96 exactly.
        assert_eq!(best_grid_size(96), (12, 8));
        // 7 is prime: 3x3 leaves 2 empty, 4x2 leaves 1.
        assert_eq!(best_grid_size(7), (4, 2));
    }

    #[test]
    fn test_best_grid_size_properties() {
        for count in 1..=500u32 {
            let (w, h) = best_grid_size(count);
            assert!(w * h >= count, "grid {w}x{h} too small for {count}");
            assert!(w <= 2 * h, "grid {w}x{h} too wide for {count}");
        }
    }

    #[test]
    fn test_pack_places_cells_row_major() {
        let mut rasterizer = BlockRasterizer { calls: 0 };
        let chars: Vec<char> = "ABCDE".chars().collect();
        let atlas = AtlasPacker::default().pack(&mut rasterizer, &chars).unwrap();

        assert_eq!(rasterizer.calls, 5);
        assert_eq!(atlas.len(), 5);

        // Widths are 3..=7 and heights 7, 8, 9, 6, 7, so cells are 8x10 on a 3x2 grid.
        let image = atlas.image().unwrap();
        assert_eq!(image.width(), 24); // 3 * 8, already aligned
        assert_eq!(image.height(), 20); // 2 * 10

        let d = atlas.glyph('D').unwrap();
        assert_eq!((d.x, d.y), (0, 10));
        let c = atlas.glyph('C').unwrap();
        assert_eq!((c.x, c.y), (16, 0));
        assert_eq!((c.width, c.height), (5, 9));
    }

    #[test]
    fn test_pack_copies_bitmaps() {
        let mut rasterizer = BlockRasterizer { calls: 0 };
        let atlas = AtlasPacker::default()
            .pack(&mut rasterizer, &['A', 'B'])
            .unwrap();
        let image = atlas.image().unwrap();
        let b = atlas.glyph('B').unwrap();

        assert_eq!(image.get_pixel(b.x, b.y).0[0], 67);
        assert_eq!(image.get_pixel(b.x + b.width - 1, b.y + b.height - 1).0[0], 67);
        // Padding column to the right of 'A' stays empty.
        let a = atlas.glyph('A').unwrap();
        assert_eq!(image.get_pixel(a.x + a.width, a.y).0[0], 0);
    }

    #[test]
    fn test_pack_deduplicates() {
        let mut rasterizer = BlockRasterizer { calls: 0 };
        let atlas = AtlasPacker::default()
            .pack(&mut rasterizer, &['x', 'y', 'x', 'x'])
            .unwrap();
        assert_eq!(atlas.len(), 2);
        assert_eq!(rasterizer.calls, 2);
        assert_eq!(atlas.glyph('y').map(|m| m.y), Some(0));
    }

    #[test]
    fn test_pack_empty() {
        let mut rasterizer = BlockRasterizer { calls: 0 };
        let atlas = AtlasPacker::default().pack(&mut rasterizer, &[]).unwrap();
        assert!(atlas.is_empty());
        assert_eq!(atlas.image().unwrap().dimensions(), (0, 0));
    }

    #[test]
    fn test_pack_fails_as_a_whole() {
        let result = AtlasPacker::default().pack(&mut FailingRasterizer, &['a', 'b', 'c', 'd']);
        assert!(matches!(result, Err(FontError::FontLoadError(_))));
    }

    #[test]
    fn test_build_atlas_missing_font() {
        let result = build_atlas("no/such/font.otf", &AtlasConfig::small(), &['a']);
        assert!(matches!(result, Err(FontError::FontFileNotFound(_))));
    }

    #[test]
    fn test_build_atlas_rejects_bad_size() {
        let config = AtlasConfig::new().with_pixel_size(-1.0);
        let result = build_atlas_from_bytes(Vec::new(), &config, &['a']);
        assert!(matches!(result, Err(FontError::InvalidPixelSize(_))));
    }
}
