// Host-side tests for the CPU reference of the composite program.

use glam::{Vec2, Vec4};
use mask_core::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

// background that encodes its sample position in red/green
fn uv_bg(uv: Vec2) -> Vec4 {
    Vec4::new(uv.x, uv.y, 0.5, 1.0)
}

#[test]
fn strength_is_clamped_for_all_inputs() {
    assert_eq!(mask_strength(Vec4::new(1.0, 0.0, 0.0, 1.0)), 1.0);
    assert!(approx(mask_strength(Vec4::new(0.1, 0.0, 0.0, 0.5)), 0.15));
    assert_eq!(mask_strength(Vec4::ZERO), 0.0);
    for r in 0..=10 {
        for a in 0..=10 {
            let s = mask_strength(Vec4::new(r as f32 * 0.2, 0.0, 0.0, a as f32 * 0.2));
            assert!((0.0..=1.0).contains(&s), "strength {s} out of range");
        }
    }
}

#[test]
fn cover_uv_keeps_center_and_scales_around_it() {
    let cover = CoverFit { x: 0.5, y: 1.0 };
    assert_eq!(cover_uv(Vec2::splat(0.5), cover), Vec2::splat(0.5));
    assert_eq!(cover_uv(Vec2::new(0.0, 0.0), cover), Vec2::new(0.25, 0.0));
    assert_eq!(cover_uv(Vec2::new(0.3, 0.7), CoverFit::default()), Vec2::new(0.3, 0.7));
}

#[test]
fn ripple_offset_vanishes_at_full_strength() {
    let uv = Vec2::new(0.4, 0.6);
    assert_eq!(ripple_uv(uv, 1.0), uv);
    let shifted = ripple_uv(uv, 0.0);
    assert!(approx(shifted.x, 0.5));
    assert!(approx(shifted.y, 0.7));
}

#[test]
fn ripple_mode_gates_and_offsets_background() {
    let cover = CoverFit { x: 0.8, y: 1.0 };
    let uv = Vec2::new(0.25, 0.75);
    let mask = |_: Vec2| Vec4::new(0.2, 0.0, 0.0, 1.0);
    let out = shade(CompositeMode::Ripple, uv, cover, mask, uv_bg);
    let strength = 0.6;
    let expected = uv_bg(cover_uv(uv, cover) + Vec2::splat(0.4 * RIPPLE_OFFSET)) * strength;
    assert!((out - expected).abs().max_element() < 1e-5);

    let empty = shade(CompositeMode::Ripple, uv, cover, |_| Vec4::ZERO, uv_bg);
    assert_eq!(empty, Vec4::ZERO);
}

#[test]
fn mask_is_sampled_at_plane_uv() {
    let cover = CoverFit { x: 0.5, y: 1.0 };
    let uv = Vec2::new(0.1, 0.9);
    let mask = move |at: Vec2| {
        assert_eq!(at, uv);
        Vec4::ONE
    };
    shade(CompositeMode::Ripple, uv, cover, mask, uv_bg);
}

#[test]
fn alpha_mode_multiplies_mask_alpha_only() {
    let cover = CoverFit { x: 1.0, y: 0.5 };
    let uv = Vec2::new(0.5, 0.0);
    let out = shade(
        CompositeMode::AlphaMask,
        uv,
        cover,
        |_| Vec4::new(0.0, 0.0, 0.0, 0.25),
        uv_bg,
    );
    assert_eq!(out, Vec4::new(0.5, 0.25, 0.5, 0.25));
}

#[test]
fn modes_parse_display_and_toggle() {
    assert_eq!("ripple".parse::<CompositeMode>(), Ok(CompositeMode::Ripple));
    assert_eq!("Alpha".parse::<CompositeMode>(), Ok(CompositeMode::AlphaMask));
    assert!("sepia".parse::<CompositeMode>().is_err());
    let err = " Sepia ".parse::<CompositeMode>().unwrap_err();
    assert_eq!(err, UnknownMode("sepia".to_string()));
    assert_eq!(err.to_string(), "unknown composite mode 'sepia'");
    assert_eq!(CompositeMode::default(), CompositeMode::Ripple);
    assert_eq!(CompositeMode::Ripple.toggled(), CompositeMode::AlphaMask);
    assert_eq!(CompositeMode::AlphaMask.toggled(), CompositeMode::Ripple);
    for mode in [CompositeMode::Ripple, CompositeMode::AlphaMask] {
        assert_eq!(mode.to_string().parse::<CompositeMode>(), Ok(mode));
    }
    assert_eq!(CompositeMode::Ripple.as_u32(), 0);
    assert_eq!(CompositeMode::AlphaMask.as_u32(), 1);
}

#[test]
fn shader_constants_match_reference() {
    assert!(COMPOSITE_WGSL.contains(&format!("const MASK_GAIN: f32 = {:?};", MASK_GAIN)));
    assert!(COMPOSITE_WGSL.contains(&format!("const RIPPLE_OFFSET: f32 = {:?};", RIPPLE_OFFSET)));
    assert!(COMPOSITE_WGSL.contains("fn vs_plane"));
    assert!(COMPOSITE_WGSL.contains("fn fs_composite"));
    assert!(BACKDROP_WGSL.contains("fn vs_plane"));
    assert!(BACKDROP_WGSL.contains("fn fs_backdrop"));
    assert!(MASK_WGSL.contains("fn vs_sprite"));
    assert!(MASK_WGSL.contains("fn fs_sprite"));
}
