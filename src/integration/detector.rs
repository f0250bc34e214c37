//! Trait for the external detection and tracking subsystem.

use crate::tracker::Detection;
use crate::view::Pose;

/// Everything the view consumes for one acquired frame.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Monotonic frame timestamp in nanoseconds
    pub timestamp_ns: u64,
    /// Observer pose in the world frame
    pub pose: Pose,
    pub detections: Vec<Detection>,
    /// Whether the detector ran its own tracking for this frame
    pub is_tracked: bool,
}

impl FrameInput {
    pub fn new(timestamp_ns: u64, pose: Pose, detections: Vec<Detection>) -> Self {
        Self {
            timestamp_ns,
            pose,
            detections,
            is_tracked: true,
        }
    }
}

/// Source of frames of detections.
///
/// Implement this trait to connect a detector to the tracking view.
///
/// # Example
///
/// ```ignore
/// use trackview::{DetectionSource, FrameInput};
///
/// struct Recorded {
///     frames: std::vec::IntoIter<FrameInput>,
/// }
///
/// impl DetectionSource for Recorded {
///     type Error = std::convert::Infallible;
///
///     fn next_frame(&mut self) -> Result<Option<FrameInput>, Self::Error> {
///         Ok(self.frames.next())
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for acquisition failures.
    type Error;

    /// Acquire the next frame, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> Result<Option<FrameInput>, Self::Error>;
}
