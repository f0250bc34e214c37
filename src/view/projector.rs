//! World to observer to grid projection.
//!
//! Points are first expressed in the observer's frame (so the view always
//! faces forward), then mapped onto a pixel grid spanning
//! `[x_min, x_max]` horizontally and `[z_min, 0]` in depth. Depth grows
//! negative in front of the observer, which sits `camera_offset` rows above
//! the bottom edge.

use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

/// Observer pose in the world frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose(Isometry3<f32>);

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    pub fn new(rotation: UnitQuaternion<f32>, translation: Vector3<f32>) -> Self {
        Self(Isometry3::from_parts(Translation3::from(translation), rotation))
    }

    pub fn identity() -> Self {
        Self(Isometry3::identity())
    }

    pub fn rotation(&self) -> &UnitQuaternion<f32> {
        &self.0.rotation
    }

    pub fn translation(&self) -> Vector3<f32> {
        self.0.translation.vector
    }

    /// Express a world point in the observer frame: `R⁻¹ (p − t)`.
    pub fn to_local(&self, world: &Point3<f32>) -> Point3<f32> {
        self.0.inverse_transform_point(world)
    }

    /// Lift an observer-frame point to world: `R p + t`.
    pub fn to_world(&self, local: &Point3<f32>) -> Point3<f32> {
        self.0.transform_point(local)
    }
}

impl From<Isometry3<f32>> for Pose {
    fn from(iso: Isometry3<f32>) -> Self {
        Self(iso)
    }
}

/// A validated, strictly positive zoom factor. Below 1 zooms in.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ZoomFactor(f32);

impl ZoomFactor {
    pub const IN: ZoomFactor = ZoomFactor(0.9);
    pub const OUT: ZoomFactor = ZoomFactor(1.0 / 0.9);

    pub fn new(factor: f32) -> Result<Self, ConfigError> {
        if factor.is_finite() && factor > 0.0 {
            Ok(Self(factor))
        } else {
            Err(ConfigError::InvalidZoomFactor(factor))
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

/// Visible extent in the observer frame, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionBounds {
    pub x_min: f32,
    pub x_max: f32,
    /// Farthest visible depth, negative (in front of the observer)
    pub z_min: f32,
}

impl Default for ProjectionBounds {
    fn default() -> Self {
        Self {
            x_min: -6250.0,
            x_max: 6250.0,
            z_min: -12500.0,
        }
    }
}

impl ProjectionBounds {
    /// Depth range with a symmetric horizontal extent half as wide.
    pub fn from_depth(z_min: f32) -> Self {
        let x_min = z_min / 2.0;
        Self {
            x_min,
            x_max: -x_min,
            z_min,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = self.x_min.is_finite() && self.x_max.is_finite() && self.z_min.is_finite();
        if !finite || self.x_max <= self.x_min || self.z_min >= 0.0 {
            return Err(ConfigError::InvalidBounds {
                x_min: self.x_min,
                x_max: self.x_max,
                z_min: self.z_min,
            });
        }
        Ok(())
    }

    fn scaled(&self, factor: f32) -> Self {
        Self {
            x_min: self.x_min * factor,
            x_max: self.x_max * factor,
            z_min: self.z_min * factor,
        }
    }
}

/// Output grid and bounds the projector starts with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub bounds: ProjectionBounds,
    pub grid_width: u32,
    pub grid_height: u32,
    /// Rows between the observer and the bottom edge of the grid
    pub camera_offset: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            bounds: ProjectionBounds::default(),
            grid_width: 800,
            grid_height: 800,
            camera_offset: 50,
        }
    }
}

impl ProjectionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height <= self.camera_offset {
            return Err(ConfigError::InvalidGrid {
                width: self.grid_width,
                height: self.grid_height,
                camera_offset: self.camera_offset,
            });
        }
        self.bounds.validate()
    }
}

/// Integer grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Horizontal focal length and sensor width, both in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    pub fx: f32,
    pub image_width: u32,
}

impl CameraIntrinsics {
    /// Horizontal field of view in radians.
    pub fn horizontal_fov(&self) -> f32 {
        2.0 * (self.image_width as f32 / (2.0 * self.fx)).atan()
    }
}

/// Maps world points onto the top-down grid.
///
/// Steps are always positive: `x_step = (x_max − x_min) / grid_width` and
/// `z_step = |z_min| / (grid_height − camera_offset)`, so depth 0 lands on
/// the camera row.
#[derive(Debug, Clone)]
pub struct Projector {
    bounds: ProjectionBounds,
    grid_width: u32,
    grid_height: u32,
    camera_offset: u32,
    x_step: f32,
    z_step: f32,
    intrinsics: Option<CameraIntrinsics>,
    fov: Option<f32>,
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(&ProjectionConfig::default())
    }
}

impl Projector {
    /// Build from a config. Invalid grids or bounds give degenerate steps
    /// (zero, infinite or NaN) rather than panicking; run
    /// [`ProjectionConfig::validate`] first.
    pub fn new(config: &ProjectionConfig) -> Self {
        let mut projector = Self {
            bounds: config.bounds,
            grid_width: config.grid_width,
            grid_height: config.grid_height,
            camera_offset: config.camera_offset,
            x_step: 0.0,
            z_step: 0.0,
            intrinsics: None,
            fov: None,
        };
        projector.update_steps();
        projector
    }

    fn update_steps(&mut self) {
        self.x_step = (self.bounds.x_max - self.bounds.x_min) / self.grid_width as f32;
        // Depth 0 sits on the camera row, so the depth span covers only the rows above it
        self.z_step = self.bounds.z_min.abs() / self.camera_row() as f32;
    }

    pub fn bounds(&self) -> &ProjectionBounds {
        &self.bounds
    }

    pub fn x_step(&self) -> f32 {
        self.x_step
    }

    pub fn z_step(&self) -> f32 {
        self.z_step
    }

    pub fn grid_width(&self) -> u32 {
        self.grid_width
    }

    pub fn grid_height(&self) -> u32 {
        self.grid_height
    }

    /// Grid row of the observer. Zero when the offset exceeds the grid.
    pub fn camera_row(&self) -> u32 {
        self.grid_height.saturating_sub(self.camera_offset)
    }

    /// Grid position of the observer.
    pub fn camera_position(&self) -> GridPoint {
        GridPoint::new((self.grid_width / 2) as i32, self.camera_row() as i32)
    }

    /// Fit the view to a depth range, with a symmetric horizontal extent
    /// half as wide.
    pub fn set_depth_range(&mut self, z_min: f32) {
        self.set_bounds(ProjectionBounds::from_depth(z_min));
    }

    pub fn set_bounds(&mut self, bounds: ProjectionBounds) {
        self.bounds = bounds;
        self.update_steps();
    }

    /// Scale the visible extent. Grid resolution is unchanged.
    pub fn zoom(&mut self, factor: ZoomFactor) {
        self.bounds = self.bounds.scaled(factor.value());
        self.update_steps();
        info!(
            factor = factor.value(),
            x_min = self.bounds.x_min,
            x_max = self.bounds.x_max,
            z_min = self.bounds.z_min,
            "view zoomed"
        );
    }

    pub fn zoom_in(&mut self) {
        self.zoom(ZoomFactor::IN);
    }

    pub fn zoom_out(&mut self) {
        self.zoom(ZoomFactor::OUT);
    }

    /// Map an observer-frame point onto the grid, using its horizontal (x)
    /// and depth (z) components.
    pub fn to_grid(&self, local: &Point3<f32>) -> GridPoint {
        self.to_grid_xz(local.x, local.z)
    }

    pub fn to_grid_xz(&self, x: f32, z: f32) -> GridPoint {
        GridPoint::new(
            ((x - self.bounds.x_min) / self.x_step).round() as i32,
            ((z - self.bounds.z_min) / self.z_step).round() as i32,
        )
    }

    /// World point to grid, relative to the observer's current pose.
    pub fn project(&self, world: &Point3<f32>, pose: &Pose) -> GridPoint {
        self.to_grid(&pose.to_local(world))
    }

    pub fn set_camera_intrinsics(&mut self, intrinsics: CameraIntrinsics) {
        self.intrinsics = Some(intrinsics);
        self.invalidate_fov();
    }

    /// Drop the cached field of view; the next query recomputes it.
    pub fn invalidate_fov(&mut self) {
        self.fov = None;
    }

    /// Horizontal field of view, computed once from the intrinsics.
    pub fn field_of_view(&mut self) -> Option<f32> {
        if self.fov.is_none() {
            self.fov = self.intrinsics.map(|i| i.horizontal_fov());
        }
        self.fov
    }
}
