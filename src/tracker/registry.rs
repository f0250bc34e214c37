//! Track registry: identity matching, aging and pruning.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::tracker::detection::Detection;
use crate::tracker::frame_rate::FrameRatePolicy;
use crate::tracker::tracklet::Track;

/// Lifecycle parameters that do not depend on the frame rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Confirmed samples needed before a recovered track counts as stable
    pub recovery_length: u32,
    /// Points drained from a dead track on every prune pass
    pub decay_rate: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            recovery_length: 5,
            decay_rate: 4,
        }
    }
}

impl RegistryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decay_rate == 0 {
            return Err(ConfigError::InvalidDecayRate);
        }
        Ok(())
    }
}

/// Owns every live and fading track.
///
/// At most one alive track exists per identity. Once a track dies it is
/// never matched again: a detection carrying the same identity later starts
/// an unrelated track.
#[derive(Debug, Clone, Default)]
pub struct TrackRegistry {
    tracks: Vec<Track>,
    policy: FrameRatePolicy,
    config: RegistryConfig,
}

impl TrackRegistry {
    pub fn new(policy: FrameRatePolicy, config: RegistryConfig) -> Self {
        Self {
            tracks: Vec::new(),
            policy,
            config,
        }
    }

    pub fn policy(&self) -> &FrameRatePolicy {
        &self.policy
    }

    /// Swap in thresholds derived from a new frame rate.
    ///
    /// Existing tracks are kept; the next prune applies the new window.
    pub fn set_policy(&mut self, policy: FrameRatePolicy) {
        self.policy = policy;
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// All tracks, alive and fading. Order is unspecified.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn alive_tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter().filter(|t| t.is_alive())
    }

    /// The alive track for `id`, if any.
    pub fn get(&self, id: u32) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id() == id && t.is_alive())
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Run one frame: ingest, then age, then prune.
    ///
    /// The order matters: aging must see this frame's detections before
    /// pruning drains anything.
    pub fn update(&mut self, detections: &[Detection], timestamp_ns: u64) {
        self.ingest(detections, timestamp_ns);
        self.age(timestamp_ns);
        self.prune();

        trace!(
            timestamp_ns,
            tracks = self.tracks.len(),
            alive = self.alive_tracks().count(),
            "registry updated"
        );
    }

    /// Extend alive tracks with their identity's detection, spawning a
    /// track for identities without one. Unconfirmed detections are ignored.
    pub fn ingest(&mut self, detections: &[Detection], timestamp_ns: u64) {
        for det in detections.iter().filter(|d| d.is_confirmed()) {
            match self
                .tracks
                .iter_mut()
                .find(|t| t.id() == det.id && t.is_alive())
            {
                Some(track) => track.add_detected_point(det.position, timestamp_ns),
                None => {
                    debug!(id = det.id, label = ?det.label, timestamp_ns, "new track");
                    self.tracks.push(Track::new(
                        det.id,
                        det.label,
                        det.position,
                        timestamp_ns,
                        self.config.recovery_length,
                    ));
                }
            }
        }
    }

    /// Mark tracks that missed too many frames as no longer alive.
    pub fn age(&mut self, timestamp_ns: u64) {
        let timeout = self.policy.missing_timeout_ns();
        for track in self.tracks.iter_mut().filter(|t| t.is_alive()) {
            let last = track.last_detected_timestamp();
            if last == timestamp_ns {
                continue;
            }
            let missing = timestamp_ns.saturating_sub(last);
            if missing >= timeout {
                debug!(id = track.id(), missing_ns = missing, "track lost");
                track.mark_dead();
            }
        }
    }

    /// Roll live tracks' windows forward and drain dead ones, removing
    /// tracks with nothing left to draw.
    pub fn prune(&mut self) {
        let window = self.policy.history_window();
        let decay_rate = self.config.decay_rate;

        self.tracks.retain_mut(|track| {
            if track.is_alive() {
                track.trim_to(window);
                return true;
            }
            let drained = track.decay(decay_rate);
            if drained {
                trace!(id = track.id(), "removing drained track");
            }
            !drained
        });
    }
}
