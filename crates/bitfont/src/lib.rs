//! Bitfont - texture-backed bitmap fonts
//!
//! This crate builds a glyph atlas from a scalable font and turns strings
//! into textured quad meshes:
//! - Atlas packing: every requested glyph rasterized once and placed on a
//!   near-square grid of equal cells
//! - Normalization of atlas metrics into render space for a surface size
//! - Text layout into vertex/index buffers with a bounding box
//! - Saving and loading atlases as JSON metadata plus a PNG image
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bitfont::{AtlasConfig, CharSet, RenderFont, build_atlas, layout_text, write_font};
//! use bitfont_core::math::Vec2;
//!
//! # fn main() -> bitfont::FontResult<()> {
//! let chars = CharSet::ascii_printable();
//! let mut atlas = build_atlas("DejaVuSans.ttf", &AtlasConfig::medium(), chars.chars())?;
//! write_font(&atlas, "DejaVuSans-32")?;
//!
//! let font = RenderFont::from_atlas(&atlas, Vec2::new(1280.0, 720.0))?;
//! let layout = layout_text(&font, "Hello, World!", Vec2::ZERO);
//! let origin = layout.bounds.centered_origin();
//! let centered = layout_text(&font, "Hello, World!", origin);
//!
//! // Hand the image to a texture upload; the atlas keeps its metrics.
//! let image = atlas.take_image()?;
//! # let _ = (image, centered);
//! # Ok(())
//! # }
//! ```
//!
//! ## Examples
//!
//! ```bash
//! cargo run -p bitfont --example build_atlas -- DejaVuSans.ttf 32 out/DejaVuSans-32
//! cargo run -p bitfont --example show_text_mesh -- out/DejaVuSans-32 "Hello"
//! ```

pub mod atlas;
pub mod codec;
pub mod config;
pub mod error;
pub mod layout;
pub mod metrics;
pub mod packer;
pub mod raster;
pub mod render_font;

pub use atlas::{AtlasImage, FontAtlas};
pub use codec::{decode_metadata, encode_metadata, font_file_paths, read_font, write_font};
pub use config::{AtlasConfig, CharSet, MIN_ROW_ALIGNMENT};
pub use error::{FontError, FontResult};
pub use layout::{
    BoundingBox, Mesh, TextLayout, TextVertex, format_text, layout_chars, layout_text, text_bounds,
};
pub use metrics::{ADVANCE_UNITS_PER_PIXEL, GlyphMetrics, RenderGlyph};
pub use packer::{AtlasPacker, best_grid_size, build_atlas, build_atlas_from_bytes};
pub use raster::{GlyphRasterizer, RasterizedGlyph, SwashRasterizer};
pub use render_font::{RenderFont, normalize_glyph};
