/// Fast vector math re-exported from [`glam`].
///
/// Render-space glyph metrics, pen positions and bounding boxes are all
/// [`Vec2`] values.
///
/// ```
/// use bitfont_core::math::Vec2;
///
/// let pen = Vec2::new(-1.0, 0.0);
/// let advanced = pen + Vec2::new(0.05, 0.0);
/// assert_eq!(advanced.y, 0.0);
/// ```
///
/// [`glam`]: https://docs.rs/glam
pub mod fast {
    pub use glam::*;
}

/// Packed vector types for vertex buffers.
///
/// These are `#[repr(C)]` and [`Pod`](bytemuck::Pod), so slices of them can be
/// cast to bytes with [`bytemuck::cast_slice`].
///
/// ```
/// use bitfont_core::math::{PackedVec2, Vec2};
///
/// let packed = PackedVec2::from(Vec2::new(0.5, -0.25));
/// let bytes: &[u8] = bytemuck::bytes_of(&packed);
/// assert_eq!(bytes.len(), 8);
/// ```
pub mod packed {
    use bytemuck::{Pod, Zeroable};

    /// A 2D vector with guaranteed `#[repr(C)]` layout.
    ///
    /// ```text
    /// Offset | Field | Size
    /// -------|-------|------
    /// 0      | x     | 4 bytes (f32)
    /// 4      | y     | 4 bytes (f32)
    /// Total: 8 bytes
    /// ```
    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
    pub struct Vec2 {
        pub x: f32,
        pub y: f32,
    }

    impl From<glam::Vec2> for Vec2 {
        fn from(v: glam::Vec2) -> Self {
            Self { x: v.x, y: v.y }
        }
    }

    impl From<Vec2> for glam::Vec2 {
        fn from(v: Vec2) -> Self {
            glam::Vec2::new(v.x, v.y)
        }
    }
}

pub use fast::*;
pub use packed::Vec2 as PackedVec2;
