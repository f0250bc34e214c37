//! Per-frame view assembly: registry update followed by draw emission.

use tracing::{info, trace};

use crate::config::{DetectionReference, ViewerConfig};
use crate::error::ConfigError;
use crate::tracker::{Detection, FrameRate, Track, TrackRegistry, TrackingState};
use crate::view::draw::{Color, DrawInstruction, MarkerShape, MarkerTable};
use crate::view::projector::{CameraIntrinsics, GridPoint, Pose, Projector, ZoomFactor};

const TRACK_THICKNESS: u32 = 4;
const SCALE_BAR_MARGIN: i32 = 25;
const SCALE_BAR_ROW_OFFSET: i32 = 50;
const SCALE_TICK: i32 = 3;
const OBSERVER_HALF_WIDTH: u32 = 10;

/// Top-down tracking view relative to a moving observer.
///
/// Each frame completes ingest, aging and pruning before any instruction
/// is emitted, so a draw pass never sees a half-pruned track.
#[derive(Debug, Clone)]
pub struct TrackingView {
    config: ViewerConfig,
    registry: TrackRegistry,
    projector: Projector,
    markers: MarkerTable,
}

impl TrackingView {
    pub fn new(config: ViewerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    pub fn with_default_config() -> Self {
        Self::from_valid(ViewerConfig::default())
    }

    fn from_valid(config: ViewerConfig) -> Self {
        let registry = TrackRegistry::new(config.frame_rate_policy(), config.registry.clone());
        let projector = Projector::new(&config.projection);
        Self {
            config,
            registry,
            projector,
            markers: MarkerTable::default(),
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn registry(&self) -> &TrackRegistry {
        &self.registry
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn markers_mut(&mut self) -> &mut MarkerTable {
        &mut self.markers
    }

    pub fn with_markers(mut self, markers: MarkerTable) -> Self {
        self.markers = markers;
        self
    }

    /// Rederive the frame-rate policy. Existing tracks are kept.
    pub fn set_frame_rate(&mut self, fps: FrameRate) {
        self.config.fps = fps;
        let policy = self.config.frame_rate_policy();
        info!(
            fps = fps.fps(),
            history_window = policy.history_window(),
            max_missing_frames = policy.max_missing_frames(),
            "frame rate reconfigured"
        );
        self.registry.set_policy(policy);
    }

    pub fn set_camera_intrinsics(&mut self, intrinsics: CameraIntrinsics) {
        self.projector.set_camera_intrinsics(intrinsics);
    }

    pub fn set_depth_range(&mut self, z_min: f32) {
        self.projector.set_depth_range(z_min);
    }

    pub fn zoom(&mut self, factor: ZoomFactor) {
        self.projector.zoom(factor);
    }

    pub fn zoom_in(&mut self) {
        self.projector.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.projector.zoom_out();
    }

    /// Process one frame and return what to draw for it.
    ///
    /// With tracking enabled the registry is updated and trajectories are
    /// drawn; otherwise each raw detection gets a marker and the registry is
    /// left untouched.
    pub fn generate_view(
        &mut self,
        detections: &[Detection],
        timestamp_ns: u64,
        pose: &Pose,
        tracking_enabled: bool,
    ) -> Vec<DrawInstruction> {
        let lifted;
        let detections = match self.config.detection_reference {
            DetectionReference::World => detections,
            DetectionReference::Observer => {
                lifted = detections
                    .iter()
                    .map(|d| d.with_position(pose.to_world(&d.position)))
                    .collect::<Vec<_>>();
                &lifted[..]
            }
        };

        let instructions = if tracking_enabled {
            self.registry.update(detections, timestamp_ns);
            self.draw_tracks(pose)
        } else {
            self.draw_positions(detections, pose)
        };

        trace!(
            timestamp_ns,
            instructions = instructions.len(),
            "view generated"
        );
        instructions
    }

    fn draw_tracks(&self, pose: &Pose) -> Vec<DrawInstruction> {
        let mut out = Vec::new();
        for track in self.registry.tracks() {
            if !self.should_draw(track) {
                continue;
            }
            let color = Color::for_identity(track.id());
            for (a, b) in track.drawable_segments() {
                out.push(DrawInstruction::line(
                    self.projector.project(a.position(), pose),
                    self.projector.project(b.position(), pose),
                    color,
                    TRACK_THICKNESS,
                ));
            }

            if !track.is_alive() {
                continue;
            }
            let shape = self.markers.shape_for(track.label());
            if let (Some(last), Some(shape)) = (track.positions_to_draw().back(), shape) {
                out.push(DrawInstruction::marker(
                    self.projector.project(last.position(), pose),
                    shape,
                    color,
                ));
            }
        }
        out
    }

    fn should_draw(&self, track: &Track) -> bool {
        track.tracking_state() == TrackingState::Ok
            && (track.is_alive() || self.config.draw_fading_tracks)
            && track.positions_to_draw().len() >= self.config.min_length_to_draw
    }

    fn draw_positions(&self, detections: &[Detection], pose: &Pose) -> Vec<DrawInstruction> {
        detections
            .iter()
            .filter_map(|det| {
                let shape = self.markers.shape_for(det.label)?;
                Some(DrawInstruction::marker(
                    self.projector.project(&det.position, pose),
                    shape,
                    Color::for_identity(det.id),
                ))
            })
            .collect()
    }

    /// Static context: observer marker, field-of-view rays and scale bar.
    ///
    /// Only changes when bounds, grid or intrinsics change.
    pub fn background(&mut self) -> Vec<DrawInstruction> {
        let mut out = Vec::new();
        let camera = self.projector.camera_position();

        out.push(DrawInstruction::marker(
            camera.offset(0, 2),
            MarkerShape::FilledRect {
                half_width: OBSERVER_HALF_WIDTH,
                half_height: 2,
            },
            Color::OBSERVER,
        ));

        if let Some(fov) = self.projector.field_of_view() {
            let bounds = *self.projector.bounds();
            let depth = bounds.x_max / (fov / 2.0).tan();
            let half = (OBSERVER_HALF_WIDTH / 2) as i32;
            out.push(DrawInstruction::line(
                camera.offset(-half, 0),
                self.projector.to_grid_xz(bounds.x_min, -depth),
                Color::OBSERVER,
                1,
            ));
            out.push(DrawInstruction::line(
                camera.offset(half, 0),
                self.projector.to_grid_xz(bounds.x_max, -depth),
                Color::OBSERVER,
                1,
            ));
        }

        out.extend(self.scale_bar());
        out
    }

    fn scale_bar(&self) -> Vec<DrawInstruction> {
        let length = (self.config.scale_bar_length / self.projector.x_step()).round() as i32;
        let row = self.projector.grid_height() as i32 - SCALE_BAR_ROW_OFFSET;
        let start = GridPoint::new(SCALE_BAR_MARGIN, row);
        let end = start.offset(length, 0);

        vec![
            DrawInstruction::line(start, end, Color::BLACK, 1),
            DrawInstruction::line(
                start.offset(0, -SCALE_TICK),
                start.offset(0, SCALE_TICK),
                Color::BLACK,
                1,
            ),
            DrawInstruction::line(
                end.offset(0, -SCALE_TICK),
                end.offset(0, SCALE_TICK),
                Color::BLACK,
                1,
            ),
            DrawInstruction::Text {
                at: end.offset(5, 5),
                text: self.config.scale_bar_label.clone(),
                color: Color::BLACK,
            },
        ]
    }
}
