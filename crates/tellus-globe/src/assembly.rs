//! CPU-side globe assembly: mesh generation plus the ordered texture fetch
//! sequence, with progress milestones reported along the way.
//!
//! Assembly involves no GPU work, so ordering and failure behavior are
//! testable without a device. Renderer construction happens afterwards
//! from the returned bundle.

use image::RgbaImage;
use tellus_assets::{ImageFetcher, LoadMilestone, ProgressSink, TextureLoadError};
use tellus_config::{GlobeConfig, TextureConfig};

use super::mesh::GlobeMesh;

/// Summary numbers for the HUD readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobeStats {
    /// Vertices in the sphere mesh.
    pub vertex_count: u32,
    /// Remote textures loaded.
    pub texture_count: u32,
}

/// Everything needed to build the GPU renderers: the shared mesh and the
/// four decoded texture maps.
pub struct GlobeAssembly {
    /// Unit sphere shared by the surface and both shells.
    pub mesh: GlobeMesh,
    /// Color (albedo) map.
    pub color: RgbaImage,
    /// Bump (height) map.
    pub bump: RgbaImage,
    /// Specular (ocean mask) map.
    pub specular: RgbaImage,
    /// Cloud layer map.
    pub clouds: RgbaImage,
    /// HUD stats.
    pub stats: GlobeStats,
}

impl GlobeAssembly {
    /// Generate the mesh and fetch all four maps in order.
    ///
    /// Milestones fire strictly in sequence; the first fetch error aborts
    /// the whole assembly, so `Complete` is only ever reported after every
    /// map has decoded.
    pub fn load(
        fetcher: &dyn ImageFetcher,
        textures: &TextureConfig,
        globe: &GlobeConfig,
        sink: &mut dyn ProgressSink,
    ) -> Result<Self, TextureLoadError> {
        let mesh = GlobeMesh::generate(globe.segments);
        sink.on_progress(LoadMilestone::GeometryReady);

        let color = fetcher.fetch(&textures.color_url)?;
        sink.on_progress(LoadMilestone::ColorLoaded);

        let bump = fetcher.fetch(&textures.bump_url)?;
        sink.on_progress(LoadMilestone::BumpLoaded);

        let specular = fetcher.fetch(&textures.specular_url)?;
        sink.on_progress(LoadMilestone::SpecularLoaded);

        let clouds = fetcher.fetch(&textures.clouds_url)?;

        let stats = GlobeStats {
            vertex_count: mesh.vertex_count(),
            texture_count: 4,
        };
        log::info!(
            "Globe assembly complete: {} vertices, {} textures",
            stats.vertex_count,
            stats.texture_count
        );
        sink.on_progress(LoadMilestone::Complete);

        Ok(Self {
            mesh,
            color,
            bump,
            specular,
            clouds,
            stats,
        })
    }
}
