//! Atlas build configuration and character set helpers.

use std::ops::RangeInclusive;

use bitfont_core::alloc::HashSet;

use crate::error::{FontError, FontResult};

/// Every atlas width is a multiple of this, regardless of configuration.
pub const MIN_ROW_ALIGNMENT: u32 = 8;

/// Configuration for building a font atlas.
///
/// The defaults give one pixel of padding between cells and an atlas width
/// rounded up to a multiple of 8 bytes, which is what texture uploads with
/// the default unpack alignment expect for single-channel images. The width
/// is always a multiple of 8, whatever `row_alignment` says.
///
/// # Example
///
/// ```
/// use bitfont::AtlasConfig;
///
/// let config = AtlasConfig::medium().with_padding(2);
/// assert_eq!(config.pixel_size, 32.0);
/// assert_eq!(config.padding, 2);
/// assert_eq!(config.row_alignment, 8);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AtlasConfig {
    /// Nominal glyph size in pixels handed to the rasterizer.
    /// Default: 32.0
    pub pixel_size: f32,
    /// Pixels added to the widest and tallest glyph to form the cell size.
    /// Default: 1
    pub padding: u32,
    /// Atlas width is rounded up to a multiple of both this and
    /// [`MIN_ROW_ALIGNMENT`]. 0 and 1 add nothing beyond the minimum.
    /// Default: 8
    pub row_alignment: u32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            pixel_size: 32.0,
            padding: 1,
            row_alignment: 8,
        }
    }
}

impl AtlasConfig {
    /// Create default configuration (32 px glyphs).
    pub fn new() -> Self {
        Self::default()
    }

    /// Small glyphs (16 px), for labels and debug overlays.
    pub fn small() -> Self {
        Self {
            pixel_size: 16.0,
            ..Default::default()
        }
    }

    /// Medium glyphs (32 px).
    pub fn medium() -> Self {
        Self {
            pixel_size: 32.0,
            ..Default::default()
        }
    }

    /// Large glyphs (64 px), for titles or magnified text.
    pub fn large() -> Self {
        Self {
            pixel_size: 64.0,
            ..Default::default()
        }
    }

    /// Set the pixel size.
    pub fn with_pixel_size(mut self, pixel_size: f32) -> Self {
        self.pixel_size = pixel_size;
        self
    }

    /// Set the padding added to each cell.
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Set an extra row alignment for the atlas width.
    ///
    /// Combined with [`MIN_ROW_ALIGNMENT`]: `12` gives widths that are
    /// multiples of 24, and `0` keeps the default of 8.
    pub fn with_row_alignment(mut self, alignment: u32) -> Self {
        self.row_alignment = alignment;
        self
    }

    /// Check that the pixel size is usable by a rasterizer.
    pub fn validate(&self) -> FontResult<()> {
        if !self.pixel_size.is_finite() || self.pixel_size <= 0.0 {
            return Err(FontError::InvalidPixelSize(self.pixel_size));
        }
        Ok(())
    }

    /// Round an atlas width up to the configured alignment.
    pub fn align_width(&self, width: u32) -> u32 {
        width.next_multiple_of(self.effective_alignment())
    }

    /// Least common multiple of `row_alignment` and [`MIN_ROW_ALIGNMENT`].
    fn effective_alignment(&self) -> u32 {
        let requested = self.row_alignment.max(1);
        let mut a = requested;
        let mut b = MIN_ROW_ALIGNMENT;
        while b != 0 {
            (a, b) = (b, a % b);
        }
        requested / a * MIN_ROW_ALIGNMENT
    }
}

/// An ordered set of distinct characters to put in an atlas.
///
/// Order is significant: it decides which grid cell each glyph lands in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharSet {
    chars: Vec<char>,
}

impl CharSet {
    /// Build a set from any sequence, keeping the first occurrence of each character.
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        let mut seen = HashSet::new();
        let chars = chars.into_iter().filter(|ch| seen.insert(*ch)).collect();
        Self { chars }
    }

    /// Printable ASCII, U+0020 through U+007E.
    pub fn ascii_printable() -> Self {
        Self::from_ranges(&[' '..='~'])
    }

    /// The distinct characters of `text`, in first-seen order.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.chars())
    }

    /// Concatenate inclusive character ranges.
    pub fn from_ranges(ranges: &[RangeInclusive<char>]) -> Self {
        Self::new(ranges.iter().flat_map(|range| range.clone()))
    }

    /// The characters in placement order.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl FromIterator<char> for CharSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_presets() {
        assert_eq!(AtlasConfig::small().pixel_size, 16.0);
        assert_eq!(AtlasConfig::large().pixel_size, 64.0);
        assert_eq!(AtlasConfig::default(), AtlasConfig::medium());
    }

    #[test]
    fn test_validate_pixel_size() {
        assert!(AtlasConfig::new().validate().is_ok());
        assert!(matches!(
            AtlasConfig::new().with_pixel_size(0.0).validate(),
            Err(FontError::InvalidPixelSize(_))
        ));
        assert!(AtlasConfig::new().with_pixel_size(f32::NAN).validate().is_err());
        assert!(AtlasConfig::new().with_pixel_size(-4.0).validate().is_err());
    }

    #[test]
    fn test_align_width() {
        let config = AtlasConfig::new();
        assert_eq!(config.align_width(0), 0);
        assert_eq!(config.align_width(1), 8);
        assert_eq!(config.align_width(8), 8);
        assert_eq!(config.align_width(33), 40);

        // Alignment never drops below 8 bytes.
        let zero = config.clone().with_row_alignment(0);
        assert_eq!(zero.align_width(33), 40);
        let one = config.clone().with_row_alignment(1);
        assert_eq!(one.align_width(9), 16);

        // Custom alignments combine with the minimum.
        assert_eq!(config.clone().with_row_alignment(12).align_width(25), 48);
        assert_eq!(config.with_row_alignment(32).align_width(33), 64);
    }

    #[test]
    fn test_charset_dedup_keeps_order() {
        let set = CharSet::from_text("hello world");
        assert_eq!(set.chars(), &['h', 'e', 'l', 'o', ' ', 'w', 'r', 'd']);
    }

    #[test]
    fn test_charset_ascii() {
        let set = CharSet::ascii_printable();
        assert_eq!(set.len(), 95);
        assert_eq!(set.chars()[0], ' ');
        assert_eq!(set.chars()[94], '~');
    }

    #[test]
    fn test_charset_ranges_overlap() {
        let set = CharSet::from_ranges(&['a'..='c', 'b'..='d']);
        assert_eq!(set.chars(), &['a', 'b', 'c', 'd']);
        assert!(!set.is_empty());
    }
}
