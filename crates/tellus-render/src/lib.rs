//! wgpu rendering foundation: GPU context and surface management, camera,
//! depth buffer, and texture upload.

pub mod camera;
pub mod depth;
pub mod gpu;
pub mod texture;

pub use camera::{Camera, CameraUniform, Projection};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use texture::{GpuTexture, upload_rgba_texture};
