//! Atmosphere glow: a slightly inflated back-face shell blended additively
//! so a blue rim hugs the globe's silhouette.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use tellus_render::DepthBuffer;

use super::mesh::GlobeMesh;
use super::surface::GlobeVertex;

/// WGSL source for the atmosphere shell shader.
pub const ATMOSPHERE_SHADER_SOURCE: &str = include_str!("atmosphere.wgsl");

/// Sky-blue glow color.
pub const ATMOSPHERE_COLOR: [f32; 3] = [0.3, 0.6, 1.0];
/// Rim falloff coefficient: intensity is `(falloff - n.z)^2` in view space.
pub const ATMOSPHERE_FALLOFF: f32 = 0.7;

/// GPU uniform for the atmosphere pass.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct AtmosphereUniform {
    /// Model matrix (shell scale, no spin; the glow is view dependent only).
    pub model: [[f32; 4]; 4],
    /// View matrix, for computing view-space normals.
    pub view: [[f32; 4]; 4],
    pub color: [f32; 3],
    pub falloff: f32,
}

/// Renders the additive atmosphere shell.
pub struct AtmosphereRenderer {
    /// The render pipeline.
    pub pipeline: wgpu::RenderPipeline,
    /// Vertex buffer for the shell sphere.
    pub vertex_buffer: wgpu::Buffer,
    /// Index buffer for the shell sphere.
    pub index_buffer: wgpu::Buffer,
    /// Number of indices.
    pub index_count: u32,
    /// Atmosphere uniform buffer.
    pub uniform_buffer: wgpu::Buffer,
    /// Camera bind group (group 0).
    pub camera_bind_group: wgpu::BindGroup,
    /// Atmosphere bind group (group 1).
    pub atmosphere_bind_group: wgpu::BindGroup,
    shell_scale: f32,
}

impl AtmosphereRenderer {
    /// Create the atmosphere renderer over the shared sphere mesh.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        mesh: &GlobeMesh,
        camera_buffer: &wgpu::Buffer,
        shell_scale: f32,
    ) -> Self {
        use wgpu::util::DeviceExt;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("atmosphere-shader"),
            source: wgpu::ShaderSource::Wgsl(ATMOSPHERE_SHADER_SOURCE.into()),
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("atmosphere-camera-bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: std::num::NonZeroU64::new(80),
                    },
                    count: None,
                }],
            });

        let atmosphere_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("atmosphere-bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: std::num::NonZeroU64::new(
                            std::mem::size_of::<AtmosphereUniform>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("atmosphere-pipeline-layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &atmosphere_bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("atmosphere-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_atmosphere"),
                buffers: &[GlobeVertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                // Only the far hemisphere draws, so the glow appears as a rim
                // around the silhouette rather than a haze over the surface.
                cull_mode: Some(wgpu::Face::Front),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthBuffer::FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::GreaterEqual, // reverse-Z
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_atmosphere"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                        alpha: wgpu::BlendComponent::OVER,
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        let vertices = GlobeVertex::from_mesh(mesh);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("atmosphere-vertices"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("atmosphere-indices"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("atmosphere-uniform"),
            size: std::mem::size_of::<AtmosphereUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("atmosphere-camera-bind-group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let atmosphere_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("atmosphere-bind-group"),
            layout: &atmosphere_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            uniform_buffer,
            camera_bind_group,
            atmosphere_bind_group,
            shell_scale,
        }
    }

    /// Update the uniform buffer with the current view matrix.
    pub fn update_uniform(&self, queue: &wgpu::Queue, view: Mat4) {
        let uniform = AtmosphereUniform {
            model: Mat4::from_scale(glam::Vec3::splat(self.shell_scale)).to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            color: ATMOSPHERE_COLOR,
            falloff: ATMOSPHERE_FALLOFF,
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Draw the glow shell. Runs after the opaque surface.
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.atmosphere_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atmosphere_uniform_size_and_alignment() {
        let size = std::mem::size_of::<AtmosphereUniform>();
        assert_eq!(size, 144);
        assert_eq!(size % 16, 0);
    }

    #[test]
    fn test_rim_intensity_formula() {
        // Mirrors the shader: intensity peaks at the silhouette where the
        // view-space normal is perpendicular to the view axis.
        let intensity = |n_z: f32| (ATMOSPHERE_FALLOFF - n_z).max(0.0).powi(2);
        let rim = intensity(0.0);
        let facing = intensity(1.0);
        let away = intensity(-1.0);
        assert!((rim - 0.49).abs() < 1e-6);
        assert_eq!(facing, 0.0);
        assert!(away > rim);
    }
}
