use crate::constants::PLANE_Z;
use crate::viewport::{Camera, Stage};
use glam::{Vec2, Vec3, Vec4};
use std::cell::Cell;
use std::rc::Rc;

/// Shared handle to the last pointer hit on the composite plane.
///
/// The pointer projector is the only writer; the particle recycle step reads
/// it every frame. A miss never clears it.
#[derive(Clone, Debug, Default)]
pub struct TargetPoint(Rc<Cell<Vec3>>);

impl TargetPoint {
    pub fn new(initial: Vec3) -> Self {
        Self(Rc::new(Cell::new(initial)))
    }

    #[inline]
    pub fn get(&self) -> Vec3 {
        self.0.get()
    }

    #[inline]
    fn set(&self, p: Vec3) {
        self.0.set(p);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

/// Map client-space pixels to NDC (x right, y up). `None` for an empty area.
#[inline]
pub fn client_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Option<Vec2> {
    if !(width > 0.0 && height > 0.0) {
        return None;
    }
    Some(Vec2::new((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0))
}

/// World-space ray from the camera eye through an NDC point.
pub fn camera_ray(camera: &Camera, ndc: Vec2) -> Ray {
    let inv = camera.view_projection().inverse();
    let p = inv * Vec4::new(ndc.x, ndc.y, 0.5, 1.0);
    let p: Vec3 = p.truncate() / p.w;
    Ray {
        origin: camera.eye,
        dir: (p - camera.eye).normalize(),
    }
}

/// Axis-aligned rectangle facing +Z, used as the pick target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickPlane {
    pub center: Vec3,
    pub half_extents: Vec2,
}

impl PickPlane {
    /// The composite plane: a unit quad at `PLANE_Z` with the stage's scale.
    pub fn composite(stage: &Stage) -> Self {
        Self {
            center: Vec3::new(0.0, 0.0, PLANE_Z),
            half_extents: Vec2::new(stage.plane_scale.x.abs(), stage.plane_scale.y.abs()) * 0.5,
        }
    }

    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        if ray.dir.z.abs() <= 1e-6 {
            return None;
        }
        let t = (self.center.z - ray.origin.z) / ray.dir.z;
        if t < 0.0 {
            return None;
        }
        let hit = ray.origin + ray.dir * t;
        let d = hit - self.center;
        (d.x.abs() <= self.half_extents.x && d.y.abs() <= self.half_extents.y).then_some(hit)
    }
}

/// Turns pointer moves into writes of the shared [`TargetPoint`].
#[derive(Clone, Debug)]
pub struct PointerProjector {
    target: TargetPoint,
}

impl PointerProjector {
    pub fn new(target: TargetPoint) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &TargetPoint {
        &self.target
    }

    /// Cast from client coordinates against the composite plane. On a hit the
    /// target point is overwritten and returned; on a miss (or before the
    /// first resize) it is left as is.
    pub fn project(&self, client: Vec2, stage: &Stage) -> Option<Vec3> {
        let viewport = stage.viewport?;
        let ndc = client_to_ndc(client.x, client.y, viewport.width, viewport.height)?;
        let ray = camera_ray(&stage.camera, ndc);
        let hit = PickPlane::composite(stage).intersect(&ray)?;
        self.target.set(hit);
        Some(hit)
    }
}
