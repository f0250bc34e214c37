//! Single object trajectory (Track) and its lifecycle bookkeeping.

use std::collections::VecDeque;

use nalgebra::Point3;
use tracing::trace;

use crate::tracker::detection::{ObjectClass, TrackingState};
use crate::tracker::track_point::{TrackPoint, TrackPointState};

/// Trajectory of one detector identity.
///
/// A track keeps two sequences of the same samples: `positions` is the
/// rolling history and `positions_to_draw` is what the view renders. The
/// registry trims them on separate policies, which is why they are not
/// merged. Neither sequence ever holds decreasing timestamps.
#[derive(Debug, Clone)]
pub struct Track {
    /// Identity from the detector, opaque to the tracker
    id: u32,
    /// Object class of the detection that spawned this track
    label: ObjectClass,
    positions: VecDeque<TrackPoint>,
    positions_to_draw: VecDeque<TrackPoint>,
    /// Flips to false once, never back
    is_alive: bool,
    last_detected_timestamp: u64,
    /// Confirmed samples since the last recovery from a predicted point
    recovery_counter: u32,
    recovery_length: u32,
    /// Mirrors the most recent detection's state
    tracking_state: TrackingState,
}

impl Track {
    /// Start a track from its first confirmed detection.
    pub fn new(
        id: u32,
        label: ObjectClass,
        position: Point3<f32>,
        timestamp_ns: u64,
        recovery_length: u32,
    ) -> Self {
        let first = TrackPoint::detected(position, timestamp_ns);
        Self {
            id,
            label,
            positions: VecDeque::from([first]),
            positions_to_draw: VecDeque::from([first]),
            is_alive: true,
            last_detected_timestamp: timestamp_ns,
            recovery_counter: 0,
            recovery_length,
            tracking_state: TrackingState::Ok,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn label(&self) -> ObjectClass {
        self.label
    }

    pub fn is_alive(&self) -> bool {
        self.is_alive
    }

    pub fn last_detected_timestamp(&self) -> u64 {
        self.last_detected_timestamp
    }

    pub fn recovery_counter(&self) -> u32 {
        self.recovery_counter
    }

    pub fn tracking_state(&self) -> TrackingState {
        self.tracking_state
    }

    /// Full rolling history, oldest first.
    pub fn positions(&self) -> &VecDeque<TrackPoint> {
        &self.positions
    }

    /// Samples retained for drawing, oldest first.
    pub fn positions_to_draw(&self) -> &VecDeque<TrackPoint> {
        &self.positions_to_draw
    }

    /// Line segments through the drawable samples, oldest first.
    ///
    /// `Off` samples are skipped without breaking the line: each drawable
    /// sample connects to the next drawable one.
    pub fn drawable_segments(&self) -> impl Iterator<Item = (&TrackPoint, &TrackPoint)> {
        let drawable = self.positions_to_draw.iter().filter(|p| p.is_drawable());
        drawable.clone().zip(drawable.skip(1))
    }

    /// Append a confirmed sample.
    ///
    /// A sample older than the newest one already recorded is dropped so the
    /// sequences stay time-ordered.
    pub fn add_detected_point(&mut self, position: Point3<f32>, timestamp_ns: u64) {
        let last_state = match self.positions.back() {
            Some(last) if last.timestamp_ns() > timestamp_ns => {
                trace!(
                    id = self.id,
                    timestamp_ns,
                    last = last.timestamp_ns(),
                    "dropping out-of-order sample"
                );
                return;
            }
            Some(last) => last.state(),
            None => TrackPointState::Ok,
        };

        if last_state == TrackPointState::Predicted {
            self.recovery_counter = 0;
        } else if self.recovery_counter < self.recovery_length {
            self.recovery_counter += 1;
        }

        let point = TrackPoint::detected(position, timestamp_ns);
        self.positions.push_back(point);
        self.positions_to_draw.push_back(point);
        self.tracking_state = TrackingState::Ok;
        self.last_detected_timestamp = timestamp_ns;
    }

    pub(crate) fn mark_dead(&mut self) {
        self.is_alive = false;
    }

    /// Drop the oldest samples until both sequences fit in `window`.
    pub(crate) fn trim_to(&mut self, window: usize) {
        truncate_front(&mut self.positions, window);
        truncate_front(&mut self.positions_to_draw, window);
    }

    /// Drop up to `count` of the oldest samples from each sequence.
    ///
    /// Returns true once the drawing sequence is empty.
    pub(crate) fn decay(&mut self, count: usize) -> bool {
        let history = count.min(self.positions.len());
        self.positions.drain(..history);
        let drawn = count.min(self.positions_to_draw.len());
        self.positions_to_draw.drain(..drawn);
        self.positions_to_draw.is_empty()
    }
}

fn truncate_front(points: &mut VecDeque<TrackPoint>, window: usize) {
    let excess = points.len().saturating_sub(window);
    points.drain(..excess);
}
