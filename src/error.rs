//! Configuration errors.
//!
//! The per-frame path never fails. These errors come only from the
//! caller-side constructors that validate configuration-time values.

use thiserror::Error;

/// Rejected configuration value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Frame rate must be finite and strictly positive.
    #[error("invalid frame rate {0}: must be finite and > 0")]
    InvalidFrameRate(f32),

    /// Zoom factor must be finite and strictly positive.
    #[error("invalid zoom factor {0}: must be finite and > 0")]
    InvalidZoomFactor(f32),

    /// Grid must have room for the camera row.
    #[error("invalid grid {width}x{height} with camera offset {camera_offset}")]
    InvalidGrid {
        width: u32,
        height: u32,
        camera_offset: u32,
    },

    /// Bounds must span a non-empty horizontal extent and a negative depth minimum.
    #[error("invalid bounds x=[{x_min}, {x_max}], z_min={z_min}")]
    InvalidBounds { x_min: f32, x_max: f32, z_min: f32 },

    /// Dead tracks must drain at least one point per frame.
    #[error("decay rate must be at least 1 point per frame")]
    InvalidDecayRate,

    /// History durations must be finite and strictly positive.
    #[error("invalid history duration {0}s")]
    InvalidHistoryWindow(f32),
}
