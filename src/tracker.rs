mod detection;
mod frame_rate;
mod registry;
mod track_point;
mod tracklet;

pub use detection::{Detection, ObjectClass, TrackingState};
pub use frame_rate::{FrameRate, FrameRatePolicy, HistoryTiming};
pub use registry::{RegistryConfig, TrackRegistry};
pub use track_point::{TrackPoint, TrackPointState};
pub use tracklet::Track;
