// Host-side integration tests for the blob particle pool.

use glam::Vec3;
use mask_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_field(seed: u64) -> ParticleField {
    ParticleField::with_rng(&SketchConfig::default(), StdRng::seed_from_u64(seed))
}

fn xy_distance(a: Vec3, b: Vec3) -> f32 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

#[test]
fn pool_has_default_size_and_initial_ring() {
    let field = seeded_field(7);
    assert_eq!(field.len(), PARTICLE_COUNT);
    for p in field.particles() {
        let r = xy_distance(p.position, Vec3::ZERO);
        assert!(
            (INITIAL_RADIUS_MIN - 1e-5..=INITIAL_RADIUS_MAX + 1e-5).contains(&r),
            "initial radius {r} out of range"
        );
        assert_eq!(p.position.z, PARTICLE_Z);
        assert!((LIFE_MIN..=LIFE_MAX).contains(&p.life));
    }
}

#[test]
fn life_stays_within_cycle_bounds() {
    let mut field = seeded_field(1);
    let target = Vec3::new(0.2, -0.1, PLANE_Z);
    for frame in 0..600 {
        field.advance(target);
        for p in field.particles() {
            assert!(
                p.life >= LIFE_MIN && p.life <= LIFE_MAX,
                "life {} escaped at frame {frame}",
                p.life
            );
        }
    }
}

#[test]
fn expired_particles_restart_near_target() {
    let mut field = seeded_field(3);
    let target = Vec3::new(0.3, -0.2, PLANE_Z);
    let mut wraps = 0;
    for _ in 0..200 {
        let before: Vec<Particle> = field.particles().to_vec();
        field.advance(target);
        for (b, a) in before.iter().zip(field.particles()) {
            let stepped = b.life + LIFE_STEP;
            if stepped > LIFE_MAX {
                wraps += 1;
                assert_eq!(a.life, LIFE_MIN);
                let r = xy_distance(a.position, target);
                assert!(
                    (RESPAWN_RADIUS_MIN - 1e-5..=RESPAWN_RADIUS_MAX + 1e-5).contains(&r),
                    "respawn radius {r} out of range"
                );
                assert_eq!(a.position.z, PARTICLE_Z);
                // scale comes from the stepped life, before the wrap
                assert_eq!(a.scale, scale_for_life(stepped));
            } else {
                assert_eq!(a.life, stepped);
                assert_eq!(a.position, b.position);
                assert_eq!(a.scale, scale_for_life(a.life));
            }
        }
    }
    assert!(wraps >= PARTICLE_COUNT, "expected every particle to wrap at least once");
}

#[test]
fn advance_reports_recycled_count() {
    let mut field = seeded_field(11);
    let total: usize = (0..126).map(|_| field.advance(Vec3::ZERO)).sum();
    // a full cycle is 4π / 0.1 ≈ 125.7 steps, so everything wraps once
    assert!(total >= PARTICLE_COUNT);
    assert_eq!(field.len(), PARTICLE_COUNT);
}

#[test]
fn scale_follows_half_phase_sine_and_can_flip() {
    assert!((scale_for_life(0.0)).abs() < 1e-6);
    assert!((scale_for_life(std::f32::consts::PI) - 1.0).abs() < 1e-6);
    assert!((scale_for_life(-std::f32::consts::PI) + 1.0).abs() < 1e-6);
    assert!(scale_for_life(-1.0) < 0.0);
}

#[test]
fn instances_mirror_particle_transforms() {
    let mut field = seeded_field(5);
    field.advance(Vec3::ZERO);
    let mut out = Vec::new();
    field.fill_instances(&mut out);
    assert_eq!(out.len(), field.len());
    for (inst, p) in out.iter().zip(field.particles()) {
        assert_eq!(
            inst.pos_scale,
            [p.position.x, p.position.y, p.position.z, p.scale]
        );
    }
    // reuses the buffer instead of appending
    field.fill_instances(&mut out);
    assert_eq!(out.len(), field.len());
}

#[test]
fn same_seed_same_animation() {
    let mut a = seeded_field(99);
    let mut b = seeded_field(99);
    let target = Vec3::new(-0.1, 0.25, PLANE_Z);
    for _ in 0..150 {
        a.advance(target);
        b.advance(target);
    }
    assert_eq!(a.particles(), b.particles());
}

#[test]
fn custom_pool_size_is_fixed() {
    let config = SketchConfig {
        particle_count: 7,
        ..SketchConfig::default()
    };
    let mut field = ParticleField::with_rng(&config, StdRng::seed_from_u64(2));
    for _ in 0..300 {
        field.advance(Vec3::ZERO);
    }
    assert_eq!(field.len(), 7);
}
