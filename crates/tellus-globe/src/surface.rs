//! GPU pipeline for the globe surface: textured sphere with bump-perturbed
//! Blinn-Phong lighting and a specular ocean mask.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use image::RgbaImage;
use tellus_render::{DepthBuffer, GpuTexture, upload_rgba_texture};

use super::mesh::GlobeMesh;

/// WGSL source for the globe surface shader.
pub const SURFACE_SHADER_SOURCE: &str = include_str!("surface.wgsl");

/// Scene lighting: a soft ambient fill plus one strong directional light
/// from the upper front right.
pub const AMBIENT_INTENSITY: f32 = 0.3;
pub const LIGHT_DIRECTION: [f32; 3] = [5.0, 3.0, 5.0];
pub const LIGHT_INTENSITY: f32 = 2.0;
/// Dark grey specular tint so ocean highlights stay subtle.
pub const SPECULAR_TINT: [f32; 3] = [0.2, 0.2, 0.2];

/// Vertex layout shared by the surface and shell pipelines.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GlobeVertex {
    /// Position on the unit sphere.
    pub position: [f32; 3],
    /// Normal (same as position for a unit sphere).
    pub normal: [f32; 3],
    /// Equirectangular UV.
    pub uv: [f32; 2],
}

impl GlobeVertex {
    /// Vertex buffer layout for the globe shaders.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlobeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 24,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }

    /// Interleave a mesh into GPU vertex data.
    pub fn from_mesh(mesh: &GlobeMesh) -> Vec<GlobeVertex> {
        (0..mesh.positions.len())
            .map(|i| GlobeVertex {
                position: mesh.positions[i].to_array(),
                normal: mesh.normals[i].to_array(),
                uv: mesh.uvs[i],
            })
            .collect()
    }
}

/// GPU uniform for the surface pass.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SurfaceUniform {
    /// Model matrix (Y-axis spin).
    pub model: [[f32; 4]; 4],
    /// Directional light direction in world space (not normalized here).
    pub light_direction: [f32; 3],
    pub light_intensity: f32,
    pub specular_tint: [f32; 3],
    pub shininess: f32,
    pub ambient: f32,
    pub bump_scale: f32,
    pub _pad: [f32; 2],
}

/// Renders the opaque globe surface.
pub struct SurfaceRenderer {
    /// The render pipeline.
    pub pipeline: wgpu::RenderPipeline,
    /// Vertex buffer for the sphere.
    pub vertex_buffer: wgpu::Buffer,
    /// Index buffer for the sphere.
    pub index_buffer: wgpu::Buffer,
    /// Number of indices.
    pub index_count: u32,
    /// Surface uniform buffer.
    pub uniform_buffer: wgpu::Buffer,
    /// Camera bind group (group 0).
    pub camera_bind_group: wgpu::BindGroup,
    /// Surface bind group: uniform + three maps + sampler (group 1).
    pub surface_bind_group: wgpu::BindGroup,
    /// Color (albedo) map.
    pub color_map: GpuTexture,
    /// Bump (height) map.
    pub bump_map: GpuTexture,
    /// Specular (ocean) mask.
    pub specular_map: GpuTexture,
    bump_scale: f32,
    shininess: f32,
}

impl SurfaceRenderer {
    /// Create the surface renderer, uploading the three maps to the GPU.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        mesh: &GlobeMesh,
        camera_buffer: &wgpu::Buffer,
        color: &RgbaImage,
        bump: &RgbaImage,
        specular: &RgbaImage,
        bump_scale: f32,
        shininess: f32,
    ) -> Self {
        use wgpu::util::DeviceExt;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("surface-shader"),
            source: wgpu::ShaderSource::Wgsl(SURFACE_SHADER_SOURCE.into()),
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("surface-camera-bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: std::num::NonZeroU64::new(80),
                    },
                    count: None,
                }],
            });

        let texture_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };

        let surface_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("surface-bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: std::num::NonZeroU64::new(
                                std::mem::size_of::<SurfaceUniform>() as u64,
                            ),
                        },
                        count: None,
                    },
                    texture_entry(1),
                    texture_entry(2),
                    texture_entry(3),
                    wgpu::BindGroupLayoutEntry {
                        binding: 4,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("surface-pipeline-layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &surface_bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("surface-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_surface"),
                buffers: &[GlobeVertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthBuffer::FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::GreaterEqual, // reverse-Z
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_surface"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None, // opaque
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        let vertices = GlobeVertex::from_mesh(mesh);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("surface-vertices"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("surface-indices"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let color_map = upload_rgba_texture(
            device,
            queue,
            "surface-color-map",
            color.as_raw(),
            color.width(),
            color.height(),
        );
        let bump_map = upload_rgba_texture(
            device,
            queue,
            "surface-bump-map",
            bump.as_raw(),
            bump.width(),
            bump.height(),
        );
        let specular_map = upload_rgba_texture(
            device,
            queue,
            "surface-specular-map",
            specular.as_raw(),
            specular.width(),
            specular.height(),
        );

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("surface-uniform"),
            size: std::mem::size_of::<SurfaceUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("surface-camera-bind-group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let surface_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("surface-bind-group"),
            layout: &surface_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&color_map.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&bump_map.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(&specular_map.view),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::Sampler(&color_map.sampler),
                },
            ],
        });

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            uniform_buffer,
            camera_bind_group,
            surface_bind_group,
            color_map,
            bump_map,
            specular_map,
            bump_scale,
            shininess,
        }
    }

    /// Update the uniform buffer with the current spin angle.
    pub fn update_uniform(&self, queue: &wgpu::Queue, rotation_angle: f32) {
        let uniform = SurfaceUniform {
            model: Mat4::from_rotation_y(rotation_angle).to_cols_array_2d(),
            light_direction: LIGHT_DIRECTION,
            light_intensity: LIGHT_INTENSITY,
            specular_tint: SPECULAR_TINT,
            shininess: self.shininess,
            ambient: AMBIENT_INTENSITY,
            bump_scale: self.bump_scale,
            _pad: [0.0; 2],
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Draw the opaque surface.
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.surface_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_globe_vertex_layout() {
        let layout = GlobeVertex::layout();
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.attributes.len(), 3);
        assert_eq!(layout.attributes[2].offset, 24);
    }

    #[test]
    fn test_surface_uniform_size_and_alignment() {
        let size = std::mem::size_of::<SurfaceUniform>();
        assert_eq!(size, 112);
        assert_eq!(size % 16, 0);
    }

    #[test]
    fn test_vertex_interleave_preserves_count() {
        let mesh = GlobeMesh::generate(8);
        let vertices = GlobeVertex::from_mesh(&mesh);
        assert_eq!(vertices.len() as u32, mesh.vertex_count());
        assert_eq!(vertices[0].uv, mesh.uvs[0]);
    }
}
