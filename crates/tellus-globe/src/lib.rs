//! The globe itself: sphere mesh, ordered texture assembly, and the three
//! render layers (surface, atmosphere shell, cloud shell).

pub mod assembly;
pub mod atmosphere;
pub mod clouds;
pub mod mesh;
pub mod surface;

pub use assembly::{GlobeAssembly, GlobeStats};
pub use atmosphere::AtmosphereRenderer;
pub use clouds::CloudRenderer;
pub use mesh::GlobeMesh;
pub use surface::{GlobeVertex, SurfaceRenderer};
