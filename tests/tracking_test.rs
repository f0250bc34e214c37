use nalgebra::{Point3, UnitQuaternion, Vector3};
use trackview::tracker::RegistryConfig;
use trackview::view::ZoomFactor;
use trackview::{
    DetectionBuilder, FrameRate, FrameRatePolicy, ObjectClass, Pose, Projector, TrackRegistry,
    TrackingState,
};

fn registry_at(fps: f32) -> TrackRegistry {
    TrackRegistry::new(
        FrameRatePolicy::from_fps(FrameRate::new(fps).unwrap()),
        RegistryConfig::default(),
    )
}

#[test]
fn test_policy_at_thirty_fps() {
    let policy = FrameRatePolicy::from_fps(FrameRate::new(30.0).unwrap());
    assert_eq!(policy.history_window(), 45);
    assert_eq!(policy.max_missing_frames(), 5);
    assert_eq!(policy.smoothing_window(), 3);
}

#[test]
fn test_track_dies_when_absence_reaches_threshold() {
    let mut registry = registry_at(30.0);
    let interval = registry.policy().frame_interval_ns();
    let person = DetectionBuilder::new(7)
        .label(ObjectClass::Person)
        .position(0.0, 0.0, -3000.0)
        .build();

    // Frames 0..=4: detected
    for frame in 0..5 {
        registry.update(std::slice::from_ref(&person), frame * interval);
    }
    let last_seen = 4 * interval;

    // Absent for 1..=4 intervals: still alive
    for missed in 1..5 {
        registry.update(&[], last_seen + missed * interval);
        assert!(
            registry.get(7).is_some(),
            "track died after only {missed} missed intervals"
        );
    }

    // Absence reaches 5 intervals
    registry.update(&[], last_seen + 5 * interval);
    assert!(registry.get(7).is_none());
    let dead = &registry.tracks()[0];
    assert!(!dead.is_alive());
    assert_eq!(dead.positions_to_draw().len(), 1);
}

#[test]
fn test_dead_track_drains_four_points_per_pass() {
    let mut registry = registry_at(30.0);
    let interval = registry.policy().frame_interval_ns();
    let vehicle = DetectionBuilder::new(3)
        .label(ObjectClass::Vehicle)
        .position(100.0, 0.0, -5000.0)
        .build();

    // 14 samples, then 5 silent frames: the last one kills the track and
    // drains it to 10.
    for frame in 0..14 {
        registry.update(std::slice::from_ref(&vehicle), frame * interval);
    }
    for frame in 14..18 {
        registry.update(&[], frame * interval);
    }
    assert_eq!(registry.get(3).unwrap().positions_to_draw().len(), 14);
    registry.update(&[], 18 * interval);
    assert_eq!(registry.tracks()[0].positions_to_draw().len(), 10);

    let mut lengths = Vec::new();
    for frame in 19..21 {
        registry.update(&[], frame * interval);
        lengths.push(registry.tracks()[0].positions_to_draw().len());
    }
    registry.update(&[], 21 * interval);

    assert_eq!(lengths, vec![6, 2]);
    assert!(registry.is_empty(), "removed on the pass that empties it");
}

#[test]
fn test_searching_detection_does_not_keep_track_alive() {
    let mut registry = registry_at(30.0);
    let interval = registry.policy().frame_interval_ns();
    let builder = DetectionBuilder::new(1).label(ObjectClass::Person);

    registry.update(&[builder.clone().build()], 0);
    let searching = builder.tracking_state(TrackingState::Searching).build();
    for frame in 1..=5 {
        registry.update(std::slice::from_ref(&searching), frame * interval);
    }
    assert!(registry.get(1).is_none());
}

#[test]
fn test_identity_reappearing_is_a_new_track() {
    let mut registry = registry_at(30.0);
    let interval = registry.policy().frame_interval_ns();
    let det = DetectionBuilder::new(5).position(1.0, 0.0, -1.0).build();

    for frame in 0..20 {
        registry.update(std::slice::from_ref(&det), frame * interval);
    }
    registry.update(&[], 25 * interval);
    registry.update(std::slice::from_ref(&det), 26 * interval);

    let alive: Vec<_> = registry.alive_tracks().collect();
    assert_eq!(alive.len(), 1);
    assert_eq!(alive[0].positions().len(), 1);
    assert_eq!(registry.tracks().iter().filter(|t| t.id() == 5).count(), 2);
}

#[test]
fn test_projection_with_rotated_observer() {
    let projector = Projector::default();
    // Observer turned 90 degrees left: world -x is straight ahead.
    let pose = Pose::new(
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), std::f32::consts::FRAC_PI_2),
        Vector3::zeros(),
    );
    let ahead = projector.project(&Point3::new(-3000.0, 0.0, 0.0), &pose);
    let straight = projector.to_grid_xz(0.0, -3000.0);
    assert_eq!(ahead, straight);
}

#[test]
fn test_zoom_keeps_center_column() {
    let mut projector = Projector::default();
    let before = projector.to_grid_xz(0.0, 0.0);
    projector.zoom(ZoomFactor::new(0.5).unwrap());
    assert_eq!(projector.to_grid_xz(0.0, 0.0), before);
    // A point at the old half-width now sits on the edge
    assert_eq!(projector.to_grid_xz(3125.0, 0.0).x, 800);
}
