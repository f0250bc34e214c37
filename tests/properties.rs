//! Property tests for the registry lifecycle and the projector.

use nalgebra::Point3;
use proptest::prelude::*;
use trackview::tracker::RegistryConfig;
use trackview::view::ZoomFactor;
use trackview::{
    Detection, FrameRate, FrameRatePolicy, ObjectClass, Pose, Projector, Track, TrackRegistry,
    TrackingState,
};

/// One frame: the identities reported and how many intervals elapsed.
fn frame_strategy() -> impl Strategy<Value = (Vec<(u32, bool)>, u64)> {
    (
        proptest::collection::vec((0u32..6, proptest::bool::weighted(0.8)), 0..5),
        1u64..4,
    )
}

fn detections(ids: &[(u32, bool)]) -> Vec<Detection> {
    ids.iter()
        .map(|&(id, confirmed)| {
            let state = if confirmed {
                TrackingState::Ok
            } else {
                TrackingState::Searching
            };
            Detection::new(id, ObjectClass::Person, Point3::new(id as f32, 0.0, -1000.0), state)
        })
        .collect()
}

fn is_time_ordered(track: &Track) -> bool {
    let ordered = |points: Vec<u64>| points.windows(2).all(|w| w[0] <= w[1]);
    ordered(track.positions().iter().map(|p| p.timestamp_ns()).collect())
        && ordered(track.positions_to_draw().iter().map(|p| p.timestamp_ns()).collect())
}

proptest! {
    #[test]
    fn prop_registry_invariants(
        fps in 5.0f32..60.0,
        frames in proptest::collection::vec(frame_strategy(), 1..80),
    ) {
        let policy = FrameRatePolicy::from_fps(FrameRate::new(fps).unwrap());
        let interval = policy.frame_interval_ns();
        let window = policy.history_window();
        let mut registry = TrackRegistry::new(policy, RegistryConfig::default());
        let mut now = 0;

        for (ids, step) in frames {
            now += step * interval;
            // Dead tracks keyed by (identity, last detection): ingest never
            // touches a dead track, so the key is stable while it drains.
            let dead_before: Vec<((u32, u64), usize)> = registry
                .tracks()
                .iter()
                .filter(|t| !t.is_alive())
                .map(|t| ((t.id(), t.last_detected_timestamp()), t.positions_to_draw().len()))
                .collect();

            registry.update(&detections(&ids), now);

            for track in registry.tracks() {
                // monotonic history
                prop_assert!(is_time_ordered(track));
                // bounded history for live tracks
                if track.is_alive() {
                    prop_assert!(track.positions().len() <= window);
                    prop_assert!(track.positions_to_draw().len() <= window);
                } else {
                    // survivors of a decay pass still have something to draw
                    prop_assert!(!track.positions_to_draw().is_empty());
                }
            }

            // at most one alive track per identity
            for id in 0..6 {
                prop_assert!(registry.alive_tracks().filter(|t| t.id() == id).count() <= 1);
            }

            // dead tracks stay dead and shrink by the decay rate until removed
            for ((id, last), before) in dead_before {
                let found = registry
                    .tracks()
                    .iter()
                    .find(|t| t.id() == id && t.last_detected_timestamp() == last);
                match found {
                    Some(track) => {
                        prop_assert!(!track.is_alive());
                        prop_assert!(before > 4);
                        prop_assert_eq!(track.positions_to_draw().len(), before - 4);
                    }
                    None => prop_assert!(before <= 4),
                }
            }
        }
    }

    #[test]
    fn prop_identity_pose_projects_directly(
        x in -6000.0f32..6000.0,
        y in -1000.0f32..1000.0,
        z in -12000.0f32..0.0,
    ) {
        let projector = Projector::default();
        let world = Point3::new(x, y, z);
        prop_assert_eq!(
            projector.project(&world, &Pose::identity()),
            projector.to_grid_xz(x, z)
        );
    }

    #[test]
    fn prop_zoom_half_halves_steps(z_min in -50_000.0f32..-100.0) {
        let mut projector = Projector::default();
        projector.set_depth_range(z_min);
        let (x_step, z_step) = (projector.x_step(), projector.z_step());
        projector.zoom(ZoomFactor::new(0.5).unwrap());
        prop_assert_eq!(projector.x_step(), x_step / 2.0);
        prop_assert_eq!(projector.z_step(), z_step / 2.0);
        prop_assert!(projector.x_step() > 0.0 && projector.z_step() > 0.0);
    }
}
