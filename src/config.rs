//! Viewer configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tracker::{FrameRate, FrameRatePolicy, HistoryTiming, RegistryConfig};
use crate::view::ProjectionConfig;

/// Frame in which incoming detection positions are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionReference {
    /// Already in world coordinates
    #[default]
    World,
    /// Relative to the observer; lifted to world with the frame's pose
    Observer,
}

/// Every tunable of the tracking view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub fps: FrameRate,
    pub timing: HistoryTiming,
    pub registry: RegistryConfig,
    pub projection: ProjectionConfig,
    /// Tracks with fewer drawable samples are not rendered
    pub min_length_to_draw: usize,
    pub detection_reference: DetectionReference,
    /// Keep drawing dead tracks while they drain
    pub draw_fading_tracks: bool,
    /// Length of the scale bar in world units
    pub scale_bar_length: f32,
    pub scale_bar_label: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fps: FrameRate::default(),
            timing: HistoryTiming::default(),
            registry: RegistryConfig::default(),
            projection: ProjectionConfig::default(),
            min_length_to_draw: 3,
            detection_reference: DetectionReference::default(),
            draw_fading_tracks: true,
            scale_bar_length: 1000.0,
            scale_bar_label: "1m".to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timing.validate()?;
        self.registry.validate()?;
        self.projection.validate()
    }

    pub fn frame_rate_policy(&self) -> FrameRatePolicy {
        FrameRatePolicy::with_timing(self.fps, &self.timing)
    }
}
