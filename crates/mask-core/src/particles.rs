//! Fixed pool of blob particles that feed the mask pass.
//!
//! Each particle runs a phase clock (`life`) that drives its sprite scale.
//! When the clock passes `LIFE_MAX` it restarts at `LIFE_MIN` and the particle
//! jumps to a fresh spot on a small ring around the current target point.

use crate::config::{SketchConfig, SpawnRange};
use crate::constants::{LIFE_MAX, LIFE_MIN, PARTICLE_Z, SCALE_PHASE};
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Uniform sprite scale; negative values mirror the sprite.
    pub scale: f32,
    pub life: f32,
}

/// Per-instance vertex data for the shared sprite quad.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub pos_scale: [f32; 4],
}

impl Particle {
    #[inline]
    pub fn instance(&self) -> ParticleInstance {
        ParticleInstance {
            pos_scale: [self.position.x, self.position.y, self.position.z, self.scale],
        }
    }
}

#[inline]
pub fn scale_for_life(life: f32) -> f32 {
    (life * SCALE_PHASE).sin()
}

/// Point on a ring of random radius around `center`, using the x = sin θ,
/// y = cos θ convention. `z` is pinned to the particle layer.
fn ring_point<R: Rng>(rng: &mut R, center: Vec3, radius: SpawnRange) -> Vec3 {
    let angle = rng.gen_range(0.0..TAU);
    let r = rng.gen_range(radius.min..=radius.max);
    Vec3::new(
        center.x + angle.sin() * r,
        center.y + angle.cos() * r,
        PARTICLE_Z,
    )
}

pub struct ParticleField {
    particles: Vec<Particle>,
    rng: StdRng,
    life_step: f32,
    respawn_radius: SpawnRange,
}

impl ParticleField {
    pub fn new(config: &SketchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: &SketchConfig, mut rng: StdRng) -> Self {
        let particles = (0..config.particle_count)
            .map(|_| {
                let position = ring_point(&mut rng, Vec3::ZERO, config.initial_radius);
                let life = rng.gen_range(LIFE_MIN..=LIFE_MAX);
                Particle {
                    position,
                    scale: scale_for_life(life),
                    life,
                }
            })
            .collect::<Vec<_>>();
        Self {
            particles,
            rng,
            life_step: config.life_step,
            respawn_radius: config.respawn_radius,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advance every particle by one fixed life step and recycle the expired
    /// ones around `target`. Returns how many particles were recycled.
    ///
    /// Scale is taken from the stepped life before the wrap check, so a
    /// recycled particle shows one frame at the tail of its previous cycle.
    pub fn advance(&mut self, target: Vec3) -> usize {
        let mut recycled = 0;
        for p in &mut self.particles {
            p.life += self.life_step;
            p.scale = scale_for_life(p.life);
            if p.life > LIFE_MAX {
                p.life = LIFE_MIN;
                p.position = ring_point(&mut self.rng, target, self.respawn_radius);
                recycled += 1;
            }
        }
        recycled
    }

    /// Write the current transforms into `out`, reusing its allocation.
    pub fn fill_instances(&self, out: &mut Vec<ParticleInstance>) {
        out.clear();
        out.extend(self.particles.iter().map(Particle::instance));
    }
}
