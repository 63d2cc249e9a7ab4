//! Runtime configuration gathered from the tuning constants.
//!
//! `SketchConfig::default()` reproduces the authored look. Front ends may
//! override individual fields (for example from a URL query) and must call
//! [`SketchConfig::validate`] before handing the config to [`crate::Sketch`].

use crate::composite::CompositeMode;
use crate::constants::*;
use crate::error::SketchError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnRange {
    pub min: f32,
    pub max: f32,
}

impl SpawnRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    fn validate(&self) -> Result<(), SketchError> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min < 0.0 || self.min > self.max
        {
            return Err(SketchError::RadiusRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SketchConfig {
    pub particle_count: usize,
    pub life_step: f32,
    pub time_step: f32,
    pub initial_radius: SpawnRange,
    pub respawn_radius: SpawnRange,
    pub image_aspect: f32,
    pub camera_distance: f32,
    pub apparent_height: f32,
    pub max_pixel_ratio: f64,
    pub mode: CompositeMode,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            life_step: LIFE_STEP,
            time_step: TIME_STEP,
            initial_radius: SpawnRange::new(INITIAL_RADIUS_MIN, INITIAL_RADIUS_MAX),
            respawn_radius: SpawnRange::new(RESPAWN_RADIUS_MIN, RESPAWN_RADIUS_MAX),
            image_aspect: IMAGE_ASPECT,
            camera_distance: CAMERA_DISTANCE,
            apparent_height: APPARENT_HEIGHT,
            max_pixel_ratio: MAX_PIXEL_RATIO,
            mode: CompositeMode::default(),
            seed: None,
        }
    }
}

impl SketchConfig {
    pub fn validate(&self) -> Result<(), SketchError> {
        if self.particle_count == 0 {
            return Err(SketchError::EmptyPool);
        }
        if self.particle_count > MAX_PARTICLES {
            return Err(SketchError::TooManyParticles {
                count: self.particle_count,
                max: MAX_PARTICLES,
            });
        }
        positive("life_step", self.life_step)?;
        positive("time_step", self.time_step)?;
        positive("image_aspect", self.image_aspect)?;
        positive("camera_distance", self.camera_distance)?;
        positive("apparent_height", self.apparent_height)?;
        self.initial_radius.validate()?;
        self.respawn_radius.validate()?;
        if self.max_pixel_ratio.is_nan() || self.max_pixel_ratio < 1.0 {
            return Err(SketchError::PixelRatioCap(self.max_pixel_ratio));
        }
        Ok(())
    }

    /// Apply a single `key=value` override. Returns `false` for unknown keys
    /// or unparsable values, leaving the config untouched.
    pub fn apply_override(&mut self, key: &str, value: &str) -> bool {
        match key {
            "mode" => match value.parse::<CompositeMode>() {
                Ok(m) => {
                    self.mode = m;
                    true
                }
                Err(_) => false,
            },
            "seed" => match value.parse::<u64>() {
                Ok(s) => {
                    self.seed = Some(s);
                    true
                }
                Err(_) => false,
            },
            "particles" => match value.parse::<usize>() {
                Ok(n) if (1..=MAX_PARTICLES).contains(&n) => {
                    self.particle_count = n;
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), SketchError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SketchError::NonPositive { name, value })
    }
}
