//! Text layout: turning a string into a textured quad mesh.
//!
//! Layout is a single left-to-right pen walk. Each character with a glyph
//! becomes one quad; characters without one are skipped and do not move
//! the pen. There is no line breaking, kerning or shaping.

use std::fmt;

use bitfont_core::math::{PackedVec2, Vec2};
use bitfont_core::profiling::profile_function;

use crate::metrics::RenderGlyph;
use crate::render_font::RenderFont;

/// Vertex data for text rendering.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TextVertex {
    pub position: PackedVec2,
    pub tex_coords: PackedVec2,
}

impl TextVertex {
    pub fn new(position: Vec2, tex_coords: Vec2) -> Self {
        Self {
            position: position.into(),
            tex_coords: tex_coords.into(),
        }
    }
}

impl fmt::Display for TextVertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] -- [{}, {}]",
            self.position.x, self.position.y, self.tex_coords.x, self.tex_coords.y
        )
    }
}

/// Triangle mesh of laid-out text: four vertices and six indices per glyph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<TextVertex>,
    indices: Vec<u32>,
}

impl Mesh {
    pub const VERTICES_PER_QUAD: usize = 4;
    pub const INDICES_PER_QUAD: usize = 6;

    fn with_capacity(quads: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(quads * Self::VERTICES_PER_QUAD),
            indices: Vec::with_capacity(quads * Self::INDICES_PER_QUAD),
        }
    }

    /// Append a rectangle as two triangles.
    ///
    /// Corners go bottom-left, bottom-right, top-left, top-right; the
    /// triangles are (0, 1, 2) and (2, 1, 3).
    fn push_quad(&mut self, origin: Vec2, size: Vec2, tex_origin: Vec2, tex_size: Vec2) {
        let base = self.vertices.len() as u32;

        self.vertices.push(TextVertex::new(origin, tex_origin));
        self.vertices.push(TextVertex::new(
            origin + Vec2::new(size.x, 0.0),
            tex_origin + Vec2::new(tex_size.x, 0.0),
        ));
        self.vertices.push(TextVertex::new(
            origin + Vec2::new(0.0, size.y),
            tex_origin + Vec2::new(0.0, tex_size.y),
        ));
        self.vertices
            .push(TextVertex::new(origin + size, tex_origin + tex_size));

        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 1, base + 3]);
    }

    pub fn vertices(&self) -> &[TextVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / Self::VERTICES_PER_QUAD
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex data as bytes, ready for a buffer upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as bytes, ready for a buffer upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn into_parts(self) -> (Vec<TextVertex>, Vec<u32>) {
        (self.vertices, self.indices)
    }
}

impl fmt::Display for Mesh {
    /// One vertex per line, then one triangle per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for vertex in &self.vertices {
            writeln!(f, "{}", vertex)?;
        }
        for triangle in self.indices.chunks_exact(3) {
            writeln!(f, "{}, {}, {}", triangle[0], triangle[1], triangle[2])?;
        }
        Ok(())
    }
}

/// Extents of laid-out text, relative to the pen origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub min: Vec2,
    pub max: Vec2,
}

impl BoundingBox {
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Pen origin that centres the text on (0, 0).
    pub fn centered_origin(&self) -> Vec2 {
        let size = self.size();
        Vec2::new(-size.x / 2.0, -size.y / 2.0 - self.min.y)
    }

    /// Grow to cover one more glyph placed after everything seen so far.
    ///
    /// `min.x` stays at zero; the vertical extents start at zero and only widen.
    fn extend(&mut self, glyph: &RenderGlyph) {
        self.max.x += glyph.advance;
        self.max.y = self.max.y.max(glyph.bearing.y);
        self.min.y = self.min.y.min(glyph.bearing.y - glyph.size.y);
    }
}

/// Mesh and bounding box from one layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextLayout {
    pub mesh: Mesh,
    pub bounds: BoundingBox,
}

/// Lay out `text` starting with the pen at `origin`.
///
/// Characters the font has no glyph for are skipped without moving the pen.
pub fn layout_text(font: &RenderFont, text: &str, origin: Vec2) -> TextLayout {
    layout_chars(font, text.chars(), origin)
}

/// Lay out a sequence of code points starting with the pen at `origin`.
pub fn layout_chars(
    font: &RenderFont,
    chars: impl IntoIterator<Item = char>,
    origin: Vec2,
) -> TextLayout {
    profile_function!();

    let chars = chars.into_iter();
    let mut mesh = Mesh::with_capacity(chars.size_hint().0);
    let mut bounds = BoundingBox::default();
    let mut pen = origin;

    for ch in chars {
        let Some(glyph) = font.glyph(ch) else {
            tracing::trace!("Skipping {:?}: not in font", ch);
            continue;
        };

        let quad_origin = Vec2::new(
            pen.x + glyph.bearing.x,
            pen.y + glyph.bearing.y - glyph.size.y,
        );
        mesh.push_quad(quad_origin, glyph.size, glyph.tex_origin, glyph.tex_size);
        bounds.extend(glyph);
        pen.x += glyph.advance;
    }

    TextLayout { mesh, bounds }
}

/// Mesh for `text`; see [`layout_text`].
pub fn format_text(font: &RenderFont, text: &str, origin: Vec2) -> Mesh {
    layout_text(font, text, origin).mesh
}

/// Bounding box for `text`, independent of where it is drawn.
pub fn text_bounds(font: &RenderFont, text: &str) -> BoundingBox {
    let mut bounds = BoundingBox::default();
    for glyph in text.chars().filter_map(|ch| font.glyph(ch)) {
        bounds.extend(glyph);
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(advance: f32, bearing_y: f32, size_y: f32) -> RenderGlyph {
        RenderGlyph {
            size: Vec2::new(0.5, size_y),
            bearing: Vec2::new(0.25, bearing_y),
            advance,
            tex_origin: Vec2::new(0.0, 1.0),
            tex_size: Vec2::new(0.5, -1.0),
        }
    }

    fn font() -> RenderFont {
        [
            ('A', glyph(1.0, 10.0, 14.0)),
            ('B', glyph(1.0, 10.0, 14.0)),
            ('C', glyph(1.0, 10.0, 14.0)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_quad_geometry() {
        let layout = layout_text(&font(), "A", Vec2::new(1.0, 2.0));
        let v = layout.mesh.vertices();

        assert_eq!(v.len(), 4);
        // Bottom-left at pen + bearing - (0, size.y).
        assert_eq!(Vec2::from(v[0].position), Vec2::new(1.25, -2.0));
        assert_eq!(Vec2::from(v[1].position), Vec2::new(1.75, -2.0));
        assert_eq!(Vec2::from(v[2].position), Vec2::new(1.25, 12.0));
        assert_eq!(Vec2::from(v[3].position), Vec2::new(1.75, 12.0));

        assert_eq!(Vec2::from(v[0].tex_coords), Vec2::new(0.0, 1.0));
        assert_eq!(Vec2::from(v[3].tex_coords), Vec2::new(0.5, 0.0));
        assert_eq!(layout.mesh.indices(), &[0, 1, 2, 2, 1, 3]);
    }

    #[test]
    fn test_indices_offset_per_quad() {
        let mesh = format_text(&font(), "AB", Vec2::ZERO);
        assert_eq!(mesh.quad_count(), 2);
        assert_eq!(&mesh.indices()[6..], &[4, 5, 6, 6, 5, 7]);
    }

    #[test]
    fn test_pen_advances_on_x_only() {
        let mesh = format_text(&font(), "ABC", Vec2::new(0.0, 0.5));
        let bottoms: Vec<f32> = mesh.vertices().iter().step_by(4).map(|v| v.position.y).collect();
        let lefts: Vec<f32> = mesh.vertices().iter().step_by(4).map(|v| v.position.x).collect();
        assert_eq!(bottoms, vec![-3.5, -3.5, -3.5]);
        assert_eq!(lefts, vec![0.25, 1.25, 2.25]);
    }

    #[test]
    fn test_bounding_box() {
        let bounds = text_bounds(&font(), "ABC");
        assert_eq!(
            bounds,
            BoundingBox {
                min: Vec2::new(0.0, -4.0),
                max: Vec2::new(3.0, 10.0),
            }
        );
        assert_eq!(bounds.size(), Vec2::new(3.0, 14.0));
    }

    #[test]
    fn test_bounds_match_layout_walk() {
        let layout = layout_text(&font(), "CAB", Vec2::new(-0.5, 0.25));
        assert_eq!(layout.bounds, text_bounds(&font(), "CAB"));
    }

    #[test]
    fn test_vertical_bounds_start_at_zero() {
        let raised: RenderFont = [('^', glyph(1.0, 8.0, 2.0))].into_iter().collect();
        let bounds = text_bounds(&raised, "^^");
        // Lowest edge is 6 above the baseline, but min.y never rises above 0.
        assert_eq!(bounds.min.y, 0.0);
        assert_eq!(bounds.max.y, 8.0);

        let sunk: RenderFont = [(',', glyph(1.0, -1.0, 3.0))].into_iter().collect();
        let bounds = text_bounds(&sunk, ",");
        assert_eq!(bounds.max.y, 0.0);
        assert_eq!(bounds.min.y, -4.0);
    }

    #[test]
    fn test_centered_origin() {
        let bounds = text_bounds(&font(), "ABC");
        // size = (3, 14): x centred at -1.5, baseline placed so the box spans [-7, 7].
        assert_eq!(bounds.centered_origin(), Vec2::new(-1.5, -3.0));
    }

    #[test]
    fn test_empty_text() {
        let layout = layout_text(&font(), "", Vec2::ZERO);
        assert!(layout.mesh.is_empty());
        assert_eq!(layout.bounds, BoundingBox::default());
    }

    #[test]
    fn test_display_lists_vertices_then_triangles() {
        let mesh = format_text(&font(), "A", Vec2::ZERO);
        let text = mesh.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "[0.25, -4] -- [0, 1]");
        assert_eq!(lines[4], "0, 1, 2");
        assert_eq!(lines[5], "2, 1, 3");
    }

    #[test]
    fn test_vertex_bytes() {
        let mesh = format_text(&font(), "AB", Vec2::ZERO);
        assert_eq!(mesh.vertex_bytes().len(), 8 * 16);
        assert_eq!(mesh.index_bytes().len(), 12 * 4);
    }
}
