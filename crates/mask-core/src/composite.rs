//! Composite fragment program: mode selection and a CPU reference of the
//! WGSL in `shaders/composite.wgsl`. The two must stay in step.

use crate::constants::{MASK_GAIN, RIPPLE_OFFSET};
use crate::error::UnknownMode;
use crate::viewport::CoverFit;
use glam::{Vec2, Vec4};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompositeMode {
    /// Mask strength gates the video and offsets its UV near mask edges.
    #[default]
    Ripple,
    /// Plain video with the mask alpha multiplied in.
    AlphaMask,
}

impl CompositeMode {
    pub fn toggled(self) -> Self {
        match self {
            CompositeMode::Ripple => CompositeMode::AlphaMask,
            CompositeMode::AlphaMask => CompositeMode::Ripple,
        }
    }

    /// Value of the `mode` uniform.
    pub fn as_u32(self) -> u32 {
        match self {
            CompositeMode::Ripple => 0,
            CompositeMode::AlphaMask => 1,
        }
    }
}

impl fmt::Display for CompositeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositeMode::Ripple => f.write_str("ripple"),
            CompositeMode::AlphaMask => f.write_str("alpha"),
        }
    }
}

impl FromStr for CompositeMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ripple" => Ok(CompositeMode::Ripple),
            "alpha" | "alpha-mask" | "alphamask" => Ok(CompositeMode::AlphaMask),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// Re-centre and scale a plane UV so the video covers the plane without
/// stretching.
#[inline]
pub fn cover_uv(uv: Vec2, cover: CoverFit) -> Vec2 {
    (uv - Vec2::splat(0.5)) * Vec2::new(cover.x, cover.y) + Vec2::splat(0.5)
}

#[inline]
pub fn mask_strength(mask: Vec4) -> f32 {
    (mask.w * mask.x * MASK_GAIN).clamp(0.0, 1.0)
}

/// Background sample position: shifted diagonally where the mask is weak.
#[inline]
pub fn ripple_uv(cover_uv: Vec2, strength: f32) -> Vec2 {
    cover_uv + Vec2::splat((1.0 - strength) * RIPPLE_OFFSET)
}

/// Evaluate one fragment on the CPU. `mask` and `bg` stand in for the two
/// texture samplers and receive plane-space UVs.
pub fn shade(
    mode: CompositeMode,
    uv: Vec2,
    cover: CoverFit,
    mask: impl Fn(Vec2) -> Vec4,
    bg: impl Fn(Vec2) -> Vec4,
) -> Vec4 {
    let new_uv = cover_uv(uv, cover);
    let m = mask(uv);
    match mode {
        CompositeMode::Ripple => {
            let strength = mask_strength(m);
            bg(ripple_uv(new_uv, strength)) * strength
        }
        CompositeMode::AlphaMask => {
            let t = bg(new_uv);
            Vec4::new(t.x, t.y, t.z, t.w * m.w)
        }
    }
}

/// CPU-side copy of the composite uniform set.
///
/// `resolution` only changes on resize; `time` and `mode` every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneUniforms {
    pub time: f32,
    pub resolution: Vec4,
    pub mode: CompositeMode,
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            time: 0.0,
            resolution: Vec4::ZERO,
            mode: CompositeMode::default(),
        }
    }
}
