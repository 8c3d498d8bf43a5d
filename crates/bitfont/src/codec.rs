//! Saving and loading a [`FontAtlas`] as a JSON metadata file plus a PNG image.
//!
//! The metadata maps each character (a one-character string) to its cell
//! and placement:
//!
//! ```json
//! {
//!   "A": { "position": [0, 0], "size": [19, 23], "bearing": [0, 23], "advance": 1216 }
//! }
//! ```
//!
//! The image is stored next to it under the same name with a `.png`
//! extension. Glyphs lying outside the image are logged on load, not rejected.

use std::collections::BTreeMap;
use std::fmt;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use bitfont_core::alloc::HashMap;
use image::{GrayImage, ImageFormat};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::atlas::FontAtlas;
use crate::error::{FontError, FontResult};
use crate::metrics::GlyphMetrics;

/// On-disk form of one glyph's metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct GlyphRecord {
    position: [u32; 2],
    size: [u32; 2],
    bearing: [i32; 2],
    advance: i32,
}

impl From<&GlyphMetrics> for GlyphRecord {
    fn from(m: &GlyphMetrics) -> Self {
        Self {
            position: [m.x, m.y],
            size: [m.width, m.height],
            bearing: [m.bearing_x, m.bearing_y],
            advance: m.advance,
        }
    }
}

impl From<GlyphRecord> for GlyphMetrics {
    fn from(r: GlyphRecord) -> Self {
        Self {
            x: r.position[0],
            y: r.position[1],
            width: r.size[0],
            height: r.size[1],
            bearing_x: r.bearing[0],
            bearing_y: r.bearing[1],
            advance: r.advance,
        }
    }
}

/// Metadata entries in document order, duplicates included.
///
/// Deserializing straight into a map would let a repeated key silently
/// replace the earlier entry.
struct MetadataEntries(Vec<(String, GlyphRecord)>);

impl<'de> Deserialize<'de> for MetadataEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = MetadataEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from characters to glyph records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, GlyphRecord>()? {
                    entries.push(entry);
                }
                Ok(MetadataEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Metadata and image paths for a font.
///
/// `font.json` pairs with `font.png` and vice versa (extension compared
/// case-insensitively); any other path gets both extensions appended.
pub fn font_file_paths(path: impl AsRef<Path>) -> (PathBuf, PathBuf) {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("json") => (path.to_path_buf(), path.with_extension("png")),
        Some("png") => (path.with_extension("json"), path.to_path_buf()),
        _ => {
            let mut json = path.as_os_str().to_owned();
            json.push(".json");
            let mut png = path.as_os_str().to_owned();
            png.push(".png");
            (PathBuf::from(json), PathBuf::from(png))
        }
    }
}

/// Serialize glyph metrics to the JSON metadata format, keys in code point order.
pub fn encode_metadata(glyphs: &HashMap<char, GlyphMetrics>) -> FontResult<String> {
    let records: BTreeMap<String, GlyphRecord> = glyphs
        .iter()
        .map(|(ch, metrics)| (ch.to_string(), GlyphRecord::from(metrics)))
        .collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Parse the JSON metadata format.
///
/// Each key must contain at least one character; only its first code point is used.
/// Two keys naming the same character are rejected.
pub fn decode_metadata(json: &str) -> FontResult<HashMap<char, GlyphMetrics>> {
    let entries: MetadataEntries = serde_json::from_str(json)?;
    entries_to_glyphs(entries)
}

fn entries_to_glyphs(entries: MetadataEntries) -> FontResult<HashMap<char, GlyphMetrics>> {
    let mut glyphs = HashMap::with_capacity(entries.0.len());

    for (key, record) in entries.0 {
        let mut chars = key.chars();
        let ch = chars
            .next()
            .ok_or_else(|| FontError::InvalidMetadata("empty character key".into()))?;
        if chars.next().is_some() {
            tracing::warn!("Metadata key {:?} has several characters; using {:?}", key, ch);
        }
        if glyphs.insert(ch, GlyphMetrics::from(record)).is_some() {
            return Err(FontError::InvalidMetadata(format!(
                "character {:?} appears more than once",
                ch
            )));
        }
    }

    Ok(glyphs)
}

/// Write the atlas as `<name>.json` + `<name>.png`, returning both paths.
///
/// Fails if the atlas image was transferred away or has zero area.
pub fn write_font(atlas: &FontAtlas, path: impl AsRef<Path>) -> FontResult<(PathBuf, PathBuf)> {
    let (json_path, png_path) = font_file_paths(path);
    let image = atlas.image()?;
    if image.width() == 0 || image.height() == 0 {
        return Err(FontError::MissingImage);
    }

    std::fs::write(&json_path, encode_metadata(atlas.glyphs())?)?;
    image.save_with_format(&png_path, ImageFormat::Png)?;

    tracing::info!(
        "Wrote {} glyphs to {} and {}",
        atlas.len(),
        json_path.display(),
        png_path.display()
    );
    Ok((json_path, png_path))
}

/// Read an atlas written by [`write_font`]. Both files must exist.
pub fn read_font(path: impl AsRef<Path>) -> FontResult<FontAtlas> {
    let (json_path, png_path) = font_file_paths(path);
    for required in [&json_path, &png_path] {
        if !required.is_file() {
            return Err(FontError::FontFileNotFound(required.clone()));
        }
    }

    let reader = BufReader::new(std::fs::File::open(&json_path)?);
    let entries: MetadataEntries = serde_json::from_reader(reader)?;
    let glyphs = entries_to_glyphs(entries)?;
    let image: GrayImage = image::open(&png_path)?.into_luma8();

    let outside = glyphs
        .values()
        .filter(|m| !m.fits_in(image.width(), image.height()))
        .count();
    if outside > 0 {
        tracing::warn!(
            "{} glyphs in {} lie outside the {}x{} image",
            outside,
            json_path.display(),
            image.width(),
            image.height()
        );
    }

    tracing::info!("Read {} glyphs from {}", glyphs.len(), json_path.display());
    Ok(FontAtlas::new(glyphs, image))
}
