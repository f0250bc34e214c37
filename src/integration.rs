//! Integration with the external detection and tracking subsystem.
//!
//! This module provides the trait a detector implements to feed frames in,
//! and a pipeline that drives a [`TrackingView`](crate::view::TrackingView)
//! from it.

mod builder;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, FrameInput};
pub use pipeline::TrackingPipeline;
