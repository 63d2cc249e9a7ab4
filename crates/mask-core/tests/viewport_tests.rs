// Host-side tests for resize math: cover-fit, camera FOV and plane scale.

use mask_core::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn cover_fit_pins_exactly_one_axis() {
    let sizes = [
        (800.0, 600.0),
        (600.0, 800.0),
        (1920.0, 1080.0),
        (390.0, 844.0),
        (1000.0, 1000.0),
        (3000.0, 100.0),
    ];
    for (w, h) in sizes {
        let c = cover_fit(w, h, IMAGE_ASPECT);
        let ones = [c.x, c.y].iter().filter(|v| **v == 1.0).count();
        assert_eq!(ones, 1, "{w}x{h} gave {c:?}");
        if h / w > IMAGE_ASPECT {
            assert_eq!(c.y, 1.0);
            assert!(approx(c.x, (w / h) * IMAGE_ASPECT));
        } else {
            assert_eq!(c.x, 1.0);
            assert!(approx(c.y, (h / w) / IMAGE_ASPECT));
        }
    }
}

#[test]
fn fov_fills_apparent_height_at_camera_distance() {
    let fov = fov_for_height(APPARENT_HEIGHT, CAMERA_DISTANCE);
    assert!(approx(fov, 2.0 * (0.25f32).atan()));
    // visible height at the distance equals the requested height
    let visible = 2.0 * CAMERA_DISTANCE * (fov * 0.5).tan();
    assert!(approx(visible, APPARENT_HEIGHT));
}

#[test]
fn landscape_resize_scales_x_only() {
    let mut stage = Stage::default();
    let axis = stage.resize(800.0, 600.0, 1.0);
    assert_eq!(axis, Some(ScaledAxis::X));
    assert!(approx(stage.camera.aspect, 4.0 / 3.0));
    assert!(approx(stage.plane_scale.x, 4.0 / 3.0));
    assert_eq!(stage.plane_scale.y, 1.0);
    assert!(approx(
        stage.camera.fovy_radians,
        fov_for_height(APPARENT_HEIGHT, CAMERA_DISTANCE)
    ));
}

#[test]
fn portrait_after_landscape_keeps_previous_x() {
    let mut stage = Stage::default();
    stage.resize(800.0, 600.0, 1.0);
    let axis = stage.resize(600.0, 800.0, 1.0);
    assert_eq!(axis, Some(ScaledAxis::Y));
    assert!(approx(stage.plane_scale.y, 4.0 / 3.0));
    // x is stale from the landscape pass, as intended
    assert!(approx(stage.plane_scale.x, 4.0 / 3.0));
}

#[test]
fn square_viewport_takes_portrait_branch() {
    let mut stage = Stage::default();
    assert_eq!(stage.resize(500.0, 500.0, 1.0), Some(ScaledAxis::Y));
    assert_eq!(stage.plane_scale.y, 1.0);
}

#[test]
fn resize_is_idempotent() {
    let mut stage = Stage::default();
    stage.resize(1280.0, 720.0, 2.0);
    let first = stage.clone();
    stage.resize(1280.0, 720.0, 2.0);
    assert_eq!(stage, first);
}

#[test]
fn degenerate_sizes_leave_state_untouched() {
    let mut stage = Stage::default();
    stage.resize(800.0, 600.0, 1.0);
    let before = stage.clone();
    assert_eq!(stage.resize(0.0, 600.0, 1.0), None);
    assert_eq!(stage.resize(800.0, 0.0, 1.0), None);
    assert_eq!(stage.resize(f32::NAN, 600.0, 1.0), None);
    assert_eq!(stage, before);
}

#[test]
fn resolution_packs_size_and_cover() {
    let mut stage = Stage::default();
    assert_eq!(stage.resolution(), glam::Vec4::new(0.0, 0.0, 1.0, 1.0));
    stage.resize(800.0, 600.0, 1.0);
    let r = stage.resolution();
    assert_eq!((r.x, r.y), (800.0, 600.0));
    assert_eq!((r.z, r.w), (stage.cover.x, stage.cover.y));
}

#[test]
fn pixel_ratio_is_capped() {
    let mut stage = Stage::default();
    stage.resize(800.0, 600.0, 3.0);
    assert_eq!(stage.backing_size(), Some((1600, 1200)));
    stage.resize(800.0, 600.0, 1.5);
    assert_eq!(stage.backing_size(), Some((1200, 900)));
}

#[test]
fn backing_size_never_below_one_pixel() {
    let vp = Viewport::new(0.2, 0.2, 1.0, MAX_PIXEL_RATIO).expect("positive size");
    assert_eq!(vp.backing_size(), (1, 1));
    assert!(Viewport::new(-1.0, 10.0, 1.0, MAX_PIXEL_RATIO).is_none());
}

#[test]
fn plane_model_places_scaled_quad() {
    let mut stage = Stage::default();
    stage.resize(800.0, 600.0, 1.0);
    let corner = stage.plane_model().transform_point3(glam::Vec3::new(0.5, 0.5, 0.0));
    assert!(approx(corner.x, 2.0 / 3.0));
    assert!(approx(corner.y, 0.5));
    assert!(approx(corner.z, PLANE_Z));
    let edge = backdrop_model().transform_point3(glam::Vec3::new(0.5, 0.5, 0.0));
    assert!(approx(edge.x, 1.1));
    assert!(approx(edge.z, BACKDROP_Z));
}
