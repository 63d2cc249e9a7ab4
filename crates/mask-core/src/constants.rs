use std::f32::consts::TAU;

// Shared visual tuning constants used by the simulation, the resize math and
// the web frontend.

// Particle pool
pub const PARTICLE_COUNT: usize = 50;
// Upper bound on the pool; keeps the instance buffer size well inside u32/u64.
pub const MAX_PARTICLES: usize = 4096;
pub const LIFE_STEP: f32 = 0.1; // per frame, not wall-clock scaled
pub const LIFE_MIN: f32 = -TAU;
pub const LIFE_MAX: f32 = TAU;
pub const SCALE_PHASE: f32 = 0.5; // scale = sin(life * SCALE_PHASE)
pub const PARTICLE_Z: f32 = 0.1;
pub const SPRITE_SIZE: f32 = 0.3; // edge length of the shared sprite quad

// Spawn rings: initial placement around the origin, recycling around the target
pub const INITIAL_RADIUS_MIN: f32 = 0.1;
pub const INITIAL_RADIUS_MAX: f32 = 0.2;
pub const RESPAWN_RADIUS_MIN: f32 = 0.05;
pub const RESPAWN_RADIUS_MAX: f32 = 0.14;

// Frame clock
pub const TIME_STEP: f32 = 0.05;
pub const STATS_WINDOW_FRAMES: u32 = 300;

// Cover-fit source image (width / height of the authored footage)
pub const IMAGE_ASPECT: f32 = 2333.0 / 3500.0;

// Camera
pub const CAMERA_DISTANCE: f32 = 2.0;
pub const APPARENT_HEIGHT: f32 = 1.0; // world height that should fill the view at CAMERA_DISTANCE
pub const INITIAL_FOV_DEG: f32 = 70.0;
pub const CAMERA_NEAR: f32 = 0.001;
pub const CAMERA_FAR: f32 = 1000.0;

// Scene layout
pub const PLANE_Z: f32 = 0.1; // composite plane (unit quad, scaled on resize)
pub const BACKDROP_Z: f32 = 0.0;
pub const BACKDROP_SIZE: [f32; 2] = [2.2, 1.0];

// Render surface
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Composite program
pub const MASK_GAIN: f32 = 3.0;
pub const RIPPLE_OFFSET: f32 = 0.1;
