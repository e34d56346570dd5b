//! Cloud layer: a translucent textured shell that spins independently of
//! the surface below it.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use image::RgbaImage;
use tellus_render::{DepthBuffer, GpuTexture, upload_rgba_texture};

use super::mesh::GlobeMesh;
use super::surface::{AMBIENT_INTENSITY, GlobeVertex, LIGHT_DIRECTION, LIGHT_INTENSITY};

/// WGSL source for the cloud shell shader.
pub const CLOUDS_SHADER_SOURCE: &str = include_str!("clouds.wgsl");

/// GPU uniform for the cloud pass.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CloudUniform {
    /// Model matrix (shell scale times independent Y-axis spin).
    pub model: [[f32; 4]; 4],
    pub light_direction: [f32; 3],
    pub light_intensity: f32,
    pub ambient: f32,
    /// Layer opacity multiplier applied to the texture's alpha.
    pub opacity: f32,
    pub _pad: [f32; 2],
}

/// Renders the translucent cloud shell.
pub struct CloudRenderer {
    /// The render pipeline.
    pub pipeline: wgpu::RenderPipeline,
    /// Vertex buffer for the shell sphere.
    pub vertex_buffer: wgpu::Buffer,
    /// Index buffer for the shell sphere.
    pub index_buffer: wgpu::Buffer,
    /// Number of indices.
    pub index_count: u32,
    /// Cloud uniform buffer.
    pub uniform_buffer: wgpu::Buffer,
    /// Camera bind group (group 0).
    pub camera_bind_group: wgpu::BindGroup,
    /// Cloud bind group: uniform + map + sampler (group 1).
    pub cloud_bind_group: wgpu::BindGroup,
    /// Cloud texture.
    pub cloud_map: GpuTexture,
    shell_scale: f32,
    opacity: f32,
}

impl CloudRenderer {
    /// Create the cloud renderer, uploading the cloud map to the GPU.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        mesh: &GlobeMesh,
        camera_buffer: &wgpu::Buffer,
        clouds: &RgbaImage,
        shell_scale: f32,
        opacity: f32,
    ) -> Self {
        use wgpu::util::DeviceExt;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("clouds-shader"),
            source: wgpu::ShaderSource::Wgsl(CLOUDS_SHADER_SOURCE.into()),
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("clouds-camera-bgl"),
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

        let cloud_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("clouds-bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: std::num::NonZeroU64::new(
                                std::mem::size_of::<CloudUniform>() as u64,
                            ),
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("clouds-pipeline-layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &cloud_bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("clouds-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_clouds"),
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
                // Translucent: test against the surface but never occlude it.
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::GreaterEqual, // reverse-Z
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_clouds"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        let vertices = GlobeVertex::from_mesh(mesh);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("clouds-vertices"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("clouds-indices"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let cloud_map = upload_rgba_texture(
            device,
            queue,
            "clouds-map",
            clouds.as_raw(),
            clouds.width(),
            clouds.height(),
        );

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("clouds-uniform"),
            size: std::mem::size_of::<CloudUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("clouds-camera-bind-group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let cloud_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("clouds-bind-group"),
            layout: &cloud_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&cloud_map.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&cloud_map.sampler),
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
            cloud_bind_group,
            cloud_map,
            shell_scale,
            opacity,
        }
    }

    /// Update the uniform buffer with the cloud layer's own spin angle.
    pub fn update_uniform(&self, queue: &wgpu::Queue, rotation_angle: f32) {
        let uniform = CloudUniform {
            model: (Mat4::from_rotation_y(rotation_angle)
                * Mat4::from_scale(Vec3::splat(self.shell_scale)))
            .to_cols_array_2d(),
            light_direction: LIGHT_DIRECTION,
            light_intensity: LIGHT_INTENSITY,
            ambient: AMBIENT_INTENSITY,
            opacity: self.opacity,
            _pad: [0.0; 2],
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Draw the cloud shell. Runs last so it blends over everything beneath.
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.cloud_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
