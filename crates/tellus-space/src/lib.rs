//! Star backdrop: deterministic point-cloud generation and distance-attenuated
//! point-sprite rendering.

pub mod renderer;
pub mod starfield;

pub use renderer::{STARFIELD_SHADER_SOURCE, StarInstance, StarfieldRenderer};
pub use starfield::{CUBE_SIDE, StarfieldGenerator};
