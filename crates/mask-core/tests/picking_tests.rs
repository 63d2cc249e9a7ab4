// Host-side tests for pointer projection onto the composite plane.

use glam::{Vec2, Vec3};
use mask_core::*;

fn approx3(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < 1e-4
}

fn sized_stage(w: f32, h: f32) -> Stage {
    let mut stage = Stage::default();
    stage.resize(w, h, 1.0);
    stage
}

#[test]
fn client_to_ndc_maps_center_and_corners() {
    assert_eq!(client_to_ndc(400.0, 300.0, 800.0, 600.0), Some(Vec2::ZERO));
    assert_eq!(
        client_to_ndc(0.0, 0.0, 800.0, 600.0),
        Some(Vec2::new(-1.0, 1.0))
    );
    assert_eq!(
        client_to_ndc(800.0, 600.0, 800.0, 600.0),
        Some(Vec2::new(1.0, -1.0))
    );
    assert_eq!(client_to_ndc(1.0, 1.0, 0.0, 600.0), None);
}

#[test]
fn center_ray_looks_down_the_view_axis() {
    let stage = sized_stage(800.0, 600.0);
    let ray = camera_ray(&stage.camera, Vec2::ZERO);
    assert!(approx3(ray.origin, Vec3::new(0.0, 0.0, CAMERA_DISTANCE)));
    assert!(approx3(ray.dir, Vec3::new(0.0, 0.0, -1.0)));
}

#[test]
fn pointer_at_center_hits_plane_center() {
    let stage = sized_stage(800.0, 600.0);
    let target = TargetPoint::default();
    let projector = PointerProjector::new(target.clone());
    let hit = projector
        .project(Vec2::new(400.0, 300.0), &stage)
        .expect("center ray must hit the plane");
    assert!(approx3(hit, Vec3::new(0.0, 0.0, PLANE_Z)));
    assert!(approx3(target.get(), hit));
}

#[test]
fn pointer_hit_follows_screen_direction() {
    let stage = sized_stage(800.0, 600.0);
    let projector = PointerProjector::new(TargetPoint::default());
    let right_top = projector
        .project(Vec2::new(700.0, 100.0), &stage)
        .expect("inside the viewport");
    assert!(right_top.x > 0.0);
    assert!(right_top.y > 0.0);
    assert!((right_top.z - PLANE_Z).abs() < 1e-4);
}

#[test]
fn miss_keeps_last_target() {
    let stage = sized_stage(800.0, 600.0);
    let target = TargetPoint::default();
    let projector = PointerProjector::new(target.clone());
    let first = projector
        .project(Vec2::new(500.0, 200.0), &stage)
        .expect("hit");
    // far outside the canvas: the ray passes beside the plane
    assert_eq!(projector.project(Vec2::new(-2000.0, 300.0), &stage), None);
    assert_eq!(target.get(), first);
}

#[test]
fn projection_before_first_resize_is_ignored() {
    let stage = Stage::default();
    let target = TargetPoint::new(Vec3::new(0.1, 0.2, 0.3));
    let projector = PointerProjector::new(target.clone());
    assert_eq!(projector.project(Vec2::new(10.0, 10.0), &stage), None);
    assert_eq!(target.get(), Vec3::new(0.1, 0.2, 0.3));
}

#[test]
fn pick_plane_rejects_parallel_and_backward_rays() {
    let plane = PickPlane {
        center: Vec3::new(0.0, 0.0, PLANE_Z),
        half_extents: Vec2::splat(0.5),
    };
    let parallel = Ray {
        origin: Vec3::new(0.0, 0.0, 2.0),
        dir: Vec3::X,
    };
    assert_eq!(plane.intersect(&parallel), None);
    let backward = Ray {
        origin: Vec3::new(0.0, 0.0, 2.0),
        dir: Vec3::Z,
    };
    assert_eq!(plane.intersect(&backward), None);
    let straight = Ray {
        origin: Vec3::new(0.25, -0.25, 2.0),
        dir: Vec3::NEG_Z,
    };
    let hit = plane.intersect(&straight).expect("hit");
    assert!(approx3(hit, Vec3::new(0.25, -0.25, PLANE_Z)));
}

#[test]
fn pick_plane_follows_stage_scale() {
    let stage = sized_stage(800.0, 600.0);
    let plane = PickPlane::composite(&stage);
    assert!((plane.half_extents.x - 2.0 / 3.0).abs() < 1e-5);
    assert_eq!(plane.half_extents.y, 0.5);
    let outside = Ray {
        origin: Vec3::new(0.7, 0.0, 2.0),
        dir: Vec3::NEG_Z,
    };
    assert_eq!(plane.intersect(&outside), None);
}
