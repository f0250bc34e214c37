//! Track lifecycle management and observer-relative top-down projection.
//!
//! Per-frame detections carrying a detector identity are merged into
//! [`Track`]s by a [`TrackRegistry`], aged out when they stop reporting and
//! drained gradually once dead. A [`TrackingView`] projects every surviving
//! trajectory into a grid anchored to the observer's current [`Pose`] and
//! returns [`DrawInstruction`]s for an external renderer.

pub mod config;
pub mod error;
pub mod integration;
pub mod tracker;
pub mod view;

pub use config::{DetectionReference, ViewerConfig};
pub use error::ConfigError;
pub use integration::{DetectionBuilder, DetectionSource, FrameInput, TrackingPipeline};
pub use tracker::{
    Detection, FrameRate, FrameRatePolicy, ObjectClass, Track, TrackPoint, TrackPointState,
    TrackRegistry, TrackingState,
};
pub use view::{DrawInstruction, GridPoint, Pose, Projector, TrackingView};
