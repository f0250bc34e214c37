//! Frame-rate derived thresholds.
//!
//! Every time-based threshold of the tracker is a pure function of the
//! configured frame rate. The policy is an immutable value: reconfiguring
//! means building a new one and handing it to the registry.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// A validated, strictly positive frame rate in frames per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct FrameRate(f32);

impl FrameRate {
    pub fn new(fps: f32) -> Result<Self, ConfigError> {
        if fps.is_finite() && fps > 0.0 {
            Ok(Self(fps))
        } else {
            Err(ConfigError::InvalidFrameRate(fps))
        }
    }

    pub fn fps(self) -> f32 {
        self.0
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self(30.0)
    }
}

impl TryFrom<f32> for FrameRate {
    type Error = ConfigError;

    fn try_from(fps: f32) -> Result<Self, Self::Error> {
        Self::new(fps)
    }
}

impl From<FrameRate> for f32 {
    fn from(rate: FrameRate) -> Self {
        rate.0
    }
}

/// Durations and ratios the policy scales by the frame rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryTiming {
    /// Seconds of trajectory kept for a live track.
    pub history_seconds: f32,
    /// A track is declared lost after `fps / missing_frames_divisor` missed frames...
    pub missing_frames_divisor: f32,
    /// ...but never fewer than this many.
    pub missing_frames_floor: u64,
    /// Width of the smoothing window in seconds.
    pub smoothing_seconds: f32,
}

impl Default for HistoryTiming {
    fn default() -> Self {
        Self {
            history_seconds: 1.5,
            missing_frames_divisor: 6.0,
            missing_frames_floor: 4,
            smoothing_seconds: 0.08,
        }
    }
}

impl HistoryTiming {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for value in [
            self.history_seconds,
            self.missing_frames_divisor,
            self.smoothing_seconds,
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidHistoryWindow(value));
            }
        }
        Ok(())
    }
}

/// Thresholds derived from a frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRatePolicy {
    /// Expected nanoseconds between two frames.
    frame_interval_ns: u64,
    /// Number of samples kept in a live track's rolling window.
    history_window: usize,
    /// Missed frames after which a track stops being alive.
    max_missing_frames: u64,
    /// Samples in the trajectory smoothing window. Not consumed yet.
    smoothing_window: usize,
}

impl Default for FrameRatePolicy {
    fn default() -> Self {
        Self::from_fps(FrameRate::default())
    }
}

impl FrameRatePolicy {
    /// Derive the policy with the default timing ratios.
    ///
    /// At 30 fps this yields a 45 sample history, a 5 frame missing
    /// threshold and a 3 frame smoothing window.
    pub fn from_fps(fps: FrameRate) -> Self {
        Self::with_timing(fps, &HistoryTiming::default())
    }

    pub fn with_timing(fps: FrameRate, timing: &HistoryTiming) -> Self {
        let fps = f64::from(fps.fps());

        let frame_interval_ns = (NANOS_PER_SECOND / fps).ceil() as u64;
        let history_window = (f64::from(timing.history_seconds) * fps).floor() as usize;
        let max_missing_frames = ((fps / f64::from(timing.missing_frames_divisor)).floor() as u64)
            .max(timing.missing_frames_floor);
        let smoothing_window = (f64::from(timing.smoothing_seconds) * fps + 0.5).ceil() as usize;

        Self {
            frame_interval_ns,
            history_window,
            max_missing_frames,
            smoothing_window,
        }
    }

    pub fn frame_interval_ns(&self) -> u64 {
        self.frame_interval_ns
    }

    pub fn history_window(&self) -> usize {
        self.history_window
    }

    pub fn max_missing_frames(&self) -> u64 {
        self.max_missing_frames
    }

    pub fn smoothing_window(&self) -> usize {
        self.smoothing_window
    }

    /// Time without detection after which a track is no longer alive.
    pub fn missing_timeout_ns(&self) -> u64 {
        self.max_missing_frames.saturating_mul(self.frame_interval_ns)
    }
}
