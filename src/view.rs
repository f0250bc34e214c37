//! Top-down view: projection relative to the observer and draw emission.

mod assembly;
mod draw;
mod projector;

pub use assembly::TrackingView;
pub use draw::{Color, DrawInstruction, MarkerShape, MarkerTable};
pub use projector::{
    CameraIntrinsics, GridPoint, Pose, ProjectionBounds, ProjectionConfig, Projector, ZoomFactor,
};
