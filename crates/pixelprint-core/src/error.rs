/// Errors that can occur in the overlay.
///
/// Bad input text is never an error: characters without a glyph are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    /// Text was emitted, or a presenter created, before `initialize`.
    NotInitialized,

    /// `initialize` was called on an overlay that is already set up.
    AlreadyInitialized,

    /// The embedded atlas could not be decoded.
    AtlasDecode(String),

    /// The decoded atlas has unexpected dimensions.
    AtlasSize { width: u32, height: u32 },

    /// No GPU adapter or device could be acquired.
    GpuUnavailable(String),
}

impl std::fmt::Display for OverlayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlayError::NotInitialized => {
                write!(f, "Overlay used before initialize() was called")
            }
            OverlayError::AlreadyInitialized => write!(f, "Overlay is already initialized"),
            OverlayError::AtlasDecode(msg) => write!(f, "Failed to decode glyph atlas: {}", msg),
            OverlayError::AtlasSize { width, height } => write!(
                f,
                "Glyph atlas must be 128x128 but decoded to {}x{}",
                width, height
            ),
            OverlayError::GpuUnavailable(msg) => write!(f, "GPU unavailable: {}", msg),
        }
    }
}

impl std::error::Error for OverlayError {}

impl From<base64::DecodeError> for OverlayError {
    fn from(err: base64::DecodeError) -> Self {
        OverlayError::AtlasDecode(err.to_string())
    }
}

impl From<image::ImageError> for OverlayError {
    fn from(err: image::ImageError) -> Self {
        OverlayError::AtlasDecode(err.to_string())
    }
}

/// Result type for overlay operations.
pub type OverlayResult<T> = Result<T, OverlayError>;
