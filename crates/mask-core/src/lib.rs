pub mod composite;
pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod particles;
pub mod picking;
pub mod viewport;

// Shaders bundled as string constants
pub static MASK_WGSL: &str = include_str!("../shaders/mask.wgsl");
pub static BACKDROP_WGSL: &str = include_str!("../shaders/backdrop.wgsl");
pub static COMPOSITE_WGSL: &str = include_str!("../shaders/composite.wgsl");

pub use composite::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use frame::*;
pub use particles::*;
pub use picking::*;
pub use viewport::*;
