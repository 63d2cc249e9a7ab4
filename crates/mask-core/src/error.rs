use thiserror::Error;

/// Configuration problems caught before the sketch starts running.
///
/// Per-frame work never fails; degenerate runtime inputs (zero-size viewport,
/// a pointer ray that misses the plane) are reported through `Option`/`bool`
/// return values instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SketchError {
    #[error("particle pool must hold at least one particle")]
    EmptyPool,
    #[error("particle pool of {count} exceeds the limit of {max}")]
    TooManyParticles { count: usize, max: usize },
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("spawn radius range {min}..{max} is invalid")]
    RadiusRange { min: f32, max: f32 },
    #[error("pixel ratio cap must be at least 1, got {0}")]
    PixelRatioCap(f64),
}

/// A composite mode name that matches neither `ripple` nor `alpha`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown composite mode '{0}'")]
pub struct UnknownMode(pub String);
