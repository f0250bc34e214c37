//! Builder for creating Detection objects.

use nalgebra::Point3;

use crate::tracker::{Detection, ObjectClass, TrackingState};

/// Builder for `Detection`s. Tracking state defaults to confirmed.
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    id: u32,
    label: ObjectClass,
    position: Point3<f32>,
    tracking_state: TrackingState,
}

impl DetectionBuilder {
    /// Create a builder for the detector identity `id`.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Set the object class.
    pub fn label(mut self, label: ObjectClass) -> Self {
        self.label = label;
        self
    }

    /// Set the 3D position.
    pub fn position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Point3::new(x, y, z);
        self
    }

    /// Set the detector tracking state.
    pub fn tracking_state(mut self, state: TrackingState) -> Self {
        self.tracking_state = state;
        self
    }

    /// Build the final `Detection`.
    pub fn build(self) -> Detection {
        Detection::new(self.id, self.label, self.position, self.tracking_state)
    }
}
