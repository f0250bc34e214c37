//! Per-frame detections supplied by the external detector.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Object class reported by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectClass {
    Person,
    Vehicle,
    Bag,
    Animal,
    Electronics,
    FruitVegetable,
    Sport,
    #[default]
    Unknown,
}

/// Tracking state the detector attaches to each detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingState {
    /// The detector is not tracking this object
    Off,
    /// Tracked and confirmed in the current frame
    #[default]
    Ok,
    /// Lost by the detector, which is trying to re-acquire it
    Searching,
    /// About to be dropped by the detector
    Terminate,
}

/// Detection input for the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Identity assigned by the detector, stable across frames
    pub id: u32,
    /// Object class
    pub label: ObjectClass,
    /// 3D position
    pub position: Point3<f32>,
    /// Detector tracking state
    pub tracking_state: TrackingState,
}

impl Detection {
    pub fn new(
        id: u32,
        label: ObjectClass,
        position: Point3<f32>,
        tracking_state: TrackingState,
    ) -> Self {
        Self {
            id,
            label,
            position,
            tracking_state,
        }
    }

    /// Only confirmed detections create or extend tracks.
    #[inline]
    pub fn is_confirmed(&self) -> bool {
        self.tracking_state == TrackingState::Ok
    }

    /// Same detection relocated to `position`.
    pub fn with_position(&self, position: Point3<f32>) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}
