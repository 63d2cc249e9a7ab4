//! Viewport sizing: camera, cover-fit factors and composite plane scale.
//!
//! These types avoid platform APIs; the web frontend feeds them CSS sizes and
//! the device pixel ratio on every resize event.

use crate::constants::*;
use glam::{Mat4, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(distance: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: INITIAL_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Distance from the eye to the origin along the view axis.
    #[inline]
    pub fn distance(&self) -> f32 {
        (self.eye - self.target).length()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CAMERA_DISTANCE)
    }
}

/// Vertical field of view (radians) that makes a world-space span of
/// `height` exactly fill the view at `distance`.
#[inline]
pub fn fov_for_height(height: f32, distance: f32) -> f32 {
    2.0 * (height / (2.0 * distance)).atan()
}

/// UV multipliers that crop the source footage like CSS `background-size: cover`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFit {
    pub x: f32,
    pub y: f32,
}

impl Default for CoverFit {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

pub fn cover_fit(width: f32, height: f32, image_aspect: f32) -> CoverFit {
    if height / width > image_aspect {
        CoverFit {
            x: (width / height) * image_aspect,
            y: 1.0,
        }
    } else {
        CoverFit {
            x: 1.0,
            y: (height / width) / image_aspect,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaledAxis {
    X,
    Y,
}

/// Non-uniform scale of the composite plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneScale {
    pub x: f32,
    pub y: f32,
}

impl Default for PlaneScale {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

impl PlaneScale {
    /// Stretch the plane along the dominant viewport axis. Only that axis is
    /// written; the other keeps whatever value an earlier resize left behind.
    pub fn fit_aspect(&mut self, aspect: f32) -> ScaledAxis {
        if aspect > 1.0 {
            self.x = aspect;
            ScaledAxis::X
        } else {
            self.y = 1.0 / aspect;
            ScaledAxis::Y
        }
    }
}

/// Host drawable size in CSS pixels plus the capped device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f64,
}

impl Viewport {
    /// Returns `None` for empty or non-finite sizes.
    pub fn new(
        width: f32,
        height: f32,
        device_pixel_ratio: f64,
        max_pixel_ratio: f64,
    ) -> Option<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return None;
        }
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Some(Self {
            width,
            height,
            pixel_ratio: dpr.min(max_pixel_ratio),
        })
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Backing store size in device pixels, never below 1×1.
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.width as f64 * self.pixel_ratio).floor() as u32;
        let h = (self.height as f64 * self.pixel_ratio).floor() as u32;
        (w.max(1), h.max(1))
    }
}

/// Everything the resize handler owns: camera, cover-fit factors and plane
/// scale, kept coupled so FOV and plane scale never disagree.
#[derive(Clone, Debug, PartialEq)]
pub struct Stage {
    pub viewport: Option<Viewport>,
    pub camera: Camera,
    pub cover: CoverFit,
    pub plane_scale: PlaneScale,
    image_aspect: f32,
    apparent_height: f32,
    max_pixel_ratio: f64,
}

impl Stage {
    pub fn new(
        image_aspect: f32,
        camera_distance: f32,
        apparent_height: f32,
        max_pixel_ratio: f64,
    ) -> Self {
        Self {
            viewport: None,
            camera: Camera::new(camera_distance),
            cover: CoverFit::default(),
            plane_scale: PlaneScale::default(),
            image_aspect,
            apparent_height,
            max_pixel_ratio,
        }
    }

    /// Recompute camera, cover-fit and plane scale for a new drawable size.
    ///
    /// Returns `None` and leaves all state untouched when the size is
    /// degenerate; otherwise returns the plane axis that was rescaled.
    pub fn resize(
        &mut self,
        width: f32,
        height: f32,
        device_pixel_ratio: f64,
    ) -> Option<ScaledAxis> {
        let viewport = Viewport::new(width, height, device_pixel_ratio, self.max_pixel_ratio)?;
        self.viewport = Some(viewport);
        self.camera.aspect = viewport.aspect();
        self.cover = cover_fit(width, height, self.image_aspect);
        self.camera.fovy_radians = fov_for_height(self.apparent_height, self.camera.distance());
        Some(self.plane_scale.fit_aspect(self.camera.aspect))
    }

    /// `(width, height, cover_x, cover_y)` as consumed by the composite program.
    pub fn resolution(&self) -> Vec4 {
        let (w, h) = self
            .viewport
            .map(|v| (v.width, v.height))
            .unwrap_or((0.0, 0.0));
        Vec4::new(w, h, self.cover.x, self.cover.y)
    }

    pub fn backing_size(&self) -> Option<(u32, u32)> {
        self.viewport.map(|v| v.backing_size())
    }

    /// Model matrix of the composite plane (unit quad at `PLANE_Z`).
    pub fn plane_model(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, PLANE_Z))
            * Mat4::from_scale(Vec3::new(self.plane_scale.x, self.plane_scale.y, 1.0))
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(IMAGE_ASPECT, CAMERA_DISTANCE, APPARENT_HEIGHT, MAX_PIXEL_RATIO)
    }
}

/// Model matrix of the backdrop video plane.
pub fn backdrop_model() -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, 0.0, BACKDROP_Z))
        * Mat4::from_scale(Vec3::new(BACKDROP_SIZE[0], BACKDROP_SIZE[1], 1.0))
}
