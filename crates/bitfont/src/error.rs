use std::path::PathBuf;

/// Errors that can occur while building, loading or normalizing a bitmap font.
///
/// Every variant is a configuration error: it is fatal to the current
/// operation and retrying with the same input gives the same result.
/// A code point missing from an atlas is never an error.
#[derive(Debug, Clone)]
pub enum FontError {
    /// The rasterizer could not open or parse the font.
    FontLoadError(String),

    /// Font file not found.
    FontFileNotFound(PathBuf),

    /// Pixel size is zero, negative or not finite.
    InvalidPixelSize(f32),

    /// Target surface width or height is zero, negative or not finite.
    InvalidSurfaceSize { width: f32, height: f32 },

    /// The atlas carries no image, or an image with zero area.
    MissingImage,

    /// The atlas image was already moved out.
    ImageTransferred,

    /// The metadata document is malformed.
    InvalidMetadata(String),

    /// The raster image could not be encoded or decoded.
    ImageError(String),

    /// Generic IO error.
    IoError(String),
}

impl std::fmt::Display for FontError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontError::FontLoadError(msg) => write!(f, "Failed to load font: {}", msg),
            FontError::FontFileNotFound(path) => {
                write!(f, "Font file not found: {}", path.display())
            }
            FontError::InvalidPixelSize(size) => write!(f, "Invalid pixel size: {}", size),
            FontError::InvalidSurfaceSize { width, height } => {
                write!(f, "Invalid surface size: {}x{}", width, height)
            }
            FontError::MissingImage => write!(f, "Font atlas doesn't contain an image"),
            FontError::ImageTransferred => {
                write!(f, "Font atlas image has already been transferred")
            }
            FontError::InvalidMetadata(msg) => write!(f, "Invalid font metadata: {}", msg),
            FontError::ImageError(msg) => write!(f, "Atlas image error: {}", msg),
            FontError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for FontError {}

impl From<std::io::Error> for FontError {
    fn from(err: std::io::Error) -> Self {
        FontError::IoError(err.to_string())
    }
}

impl From<image::ImageError> for FontError {
    fn from(err: image::ImageError) -> Self {
        FontError::ImageError(err.to_string())
    }
}

impl From<serde_json::Error> for FontError {
    fn from(err: serde_json::Error) -> Self {
        FontError::InvalidMetadata(err.to_string())
    }
}

/// Result type for bitmap font operations.
pub type FontResult<T> = Result<T, FontError>;
