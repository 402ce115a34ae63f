//! Error types for the annotation engine.

use thiserror::Error;

/// Errors that can occur when setting up the annotation engine.
///
/// The engine has no I/O or network fault domain; the only fatal condition
/// is failed initialization. In-session geometry anomalies (degenerate
/// boxes, unknown identities) degrade to no-ops instead of erroring.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Image dimensions are unusable (non-positive, or the image never
    /// decoded). The engine must not be activated for this image.
    #[error("invalid image: {width}x{height} natural pixels, rendered width {rendered_width}")]
    InvalidImage {
        /// Natural image width reported by the loader
        width: u32,
        /// Natural image height reported by the loader
        height: u32,
        /// Width of the on-screen canvas
        rendered_width: f32,
    },
}

impl EngineError {
    /// Create an invalid image error.
    pub fn invalid_image(width: u32, height: u32, rendered_width: f32) -> Self {
        Self::InvalidImage {
            width,
            height,
            rendered_width,
        }
    }
}
