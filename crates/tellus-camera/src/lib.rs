//! Orbit camera control and the geographic readout derived from it.

pub mod geo;
pub mod orbit;

pub use geo::GeoCoord;
pub use orbit::OrbitController;
