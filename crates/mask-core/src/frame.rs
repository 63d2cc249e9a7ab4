//! Per-frame driver state shared by every front end.

use crate::composite::{CompositeMode, SceneUniforms};
use crate::config::SketchConfig;
use crate::error::SketchError;
use crate::particles::ParticleField;
use crate::picking::{PointerProjector, TargetPoint};
use crate::viewport::{ScaledAxis, Stage};
use glam::{Vec2, Vec3};
use instant::Instant;
use std::time::Duration;

/// Fixed-step time accumulator. Animation speed follows the display refresh
/// rate, not wall-clock time.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameClock {
    time: f32,
    step: f32,
    frames: u64,
}

impl FrameClock {
    pub fn new(step: f32) -> Self {
        Self {
            time: 0.0,
            step,
            frames: 0,
        }
    }

    pub fn tick(&mut self) -> f32 {
        self.time += self.step;
        self.frames += 1;
        self.time
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Rolling frame-rate measurement over a fixed number of frames.
pub struct FrameStats {
    window: u32,
    frames: u32,
    window_start: Instant,
}

impl FrameStats {
    pub fn new(window: u32) -> Self {
        Self {
            window: window.max(1),
            frames: 0,
            window_start: Instant::now(),
        }
    }

    /// Count one frame at `now`. Returns the average FPS whenever a window
    /// completes.
    pub fn record(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        if self.frames < self.window {
            return None;
        }
        let elapsed = now.duration_since(self.window_start);
        let fps = fps_over(self.frames, elapsed);
        self.frames = 0;
        self.window_start = now;
        Some(fps)
    }
}

fn fps_over(frames: u32, elapsed: Duration) -> f32 {
    let secs = elapsed.as_secs_f32();
    if secs > 0.0 {
        frames as f32 / secs
    } else {
        0.0
    }
}

/// What one call to [`Sketch::step`] did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUpdate {
    pub time: f32,
    pub recycled: usize,
    pub target: Vec3,
}

/// Platform-independent half of the sketch: particle pool, resize state,
/// pointer projection and the composite uniforms.
pub struct Sketch {
    config: SketchConfig,
    field: ParticleField,
    stage: Stage,
    projector: PointerProjector,
    target: TargetPoint,
    clock: FrameClock,
    uniforms: SceneUniforms,
}

impl Sketch {
    pub fn new(config: SketchConfig) -> Result<Self, SketchError> {
        config.validate()?;
        let target = TargetPoint::default();
        let projector = PointerProjector::new(target.clone());
        let stage = Stage::new(
            config.image_aspect,
            config.camera_distance,
            config.apparent_height,
            config.max_pixel_ratio,
        );
        log::info!(
            "[sketch] particles={} mode={} seed={:?}",
            config.particle_count,
            config.mode,
            config.seed
        );
        Ok(Self {
            field: ParticleField::new(&config),
            stage,
            projector,
            target,
            clock: FrameClock::new(config.time_step),
            uniforms: SceneUniforms {
                mode: config.mode,
                ..SceneUniforms::default()
            },
            config,
        })
    }

    /// Advance time and particles by one frame. Rendering follows.
    pub fn step(&mut self) -> FrameUpdate {
        let time = self.clock.tick();
        self.uniforms.time = time;
        let target = self.target.get();
        let recycled = self.field.advance(target);
        FrameUpdate {
            time,
            recycled,
            target,
        }
    }

    /// Returns `None` (and changes nothing) for a degenerate size.
    pub fn resize(
        &mut self,
        width: f32,
        height: f32,
        device_pixel_ratio: f64,
    ) -> Option<ScaledAxis> {
        let axis = self.stage.resize(width, height, device_pixel_ratio)?;
        self.uniforms.resolution = self.stage.resolution();
        Some(axis)
    }

    pub fn pointer_move(&self, client_x: f32, client_y: f32) -> Option<Vec3> {
        self.projector.project(Vec2::new(client_x, client_y), &self.stage)
    }

    pub fn toggle_mode(&mut self) -> CompositeMode {
        self.uniforms.mode = self.uniforms.mode.toggled();
        self.uniforms.mode
    }

    pub fn set_mode(&mut self, mode: CompositeMode) {
        self.uniforms.mode = mode;
    }

    #[inline]
    pub fn mode(&self) -> CompositeMode {
        self.uniforms.mode
    }

    #[inline]
    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    #[inline]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    #[inline]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    #[inline]
    pub fn uniforms(&self) -> &SceneUniforms {
        &self.uniforms
    }

    #[inline]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Read handle to the shared target point.
    pub fn target_point(&self) -> TargetPoint {
        self.target.clone()
    }
}
