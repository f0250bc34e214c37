use nalgebra::Point3;

/// How a trajectory sample was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackPointState {
    /// Confirmed by a detection
    #[default]
    Ok,
    /// Interpolated while the object was not observed
    Predicted,
    /// Not drawable; segments touching it are skipped
    Off,
}

/// A single immutable sample of a track's trajectory, in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    position: Point3<f32>,
    state: TrackPointState,
    timestamp_ns: u64,
}

impl TrackPoint {
    pub fn new(position: Point3<f32>, state: TrackPointState, timestamp_ns: u64) -> Self {
        Self {
            position,
            state,
            timestamp_ns,
        }
    }

    /// Sample confirmed by a detection at `timestamp_ns`.
    pub fn detected(position: Point3<f32>, timestamp_ns: u64) -> Self {
        Self::new(position, TrackPointState::Ok, timestamp_ns)
    }

    #[inline]
    pub fn position(&self) -> &Point3<f32> {
        &self.position
    }

    #[inline]
    pub fn state(&self) -> TrackPointState {
        self.state
    }

    #[inline]
    pub fn timestamp_ns(&self) -> u64 {
        self.timestamp_ns
    }

    #[inline]
    pub fn is_drawable(&self) -> bool {
        self.state != TrackPointState::Off
    }
}
