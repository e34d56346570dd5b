//! GPU-side starfield renderer: camera-facing point sprites drawn as
//! instanced quads so distant stars shrink with perspective.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use tellus_render::DepthBuffer;

/// WGSL source for the starfield point-sprite shader.
pub const STARFIELD_SHADER_SOURCE: &str = include_str!("starfield.wgsl");

/// World-space half-extent of a star sprite. Small enough that stars stay
/// point-like even at the minimum camera distance.
const STAR_POINT_SIZE: f32 = 0.02;

/// Per-instance data: one star position in the field's local space.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct StarInstance {
    /// Star position before the field's slow rotation is applied.
    pub position: [f32; 3],
}

impl StarInstance {
    /// Instance buffer layout for the starfield shader.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<StarInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// GPU uniform for the starfield pass.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct StarUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Rotation of the whole field around the Y axis.
    pub model: [[f32; 4]; 4],
    /// Camera right vector, used to orient sprites toward the camera.
    pub camera_right: [f32; 3],
    /// World-space half-extent of each sprite.
    pub point_size: f32,
    /// Camera up vector.
    pub camera_up: [f32; 3],
    pub _pad: f32,
}

/// Renders the star backdrop as instanced billboard quads.
pub struct StarfieldRenderer {
    /// The render pipeline for the starfield pass.
    pub pipeline: wgpu::RenderPipeline,
    /// Per-star instance buffer.
    pub instance_buffer: wgpu::Buffer,
    /// Number of stars in the instance buffer.
    pub star_count: u32,
    /// GPU uniform buffer.
    pub uniform_buffer: wgpu::Buffer,
    /// Bind group for the uniform.
    pub bind_group: wgpu::BindGroup,
}

impl StarfieldRenderer {
    /// Create a new starfield renderer from pre-generated star positions.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        stars: &[Vec3],
    ) -> Self {
        use wgpu::util::DeviceExt;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("starfield-shader"),
            source: wgpu::ShaderSource::Wgsl(STARFIELD_SHADER_SOURCE.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("starfield-bind-group-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: std::num::NonZeroU64::new(
                        std::mem::size_of::<StarUniform>() as u64
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("starfield-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("starfield-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_star"),
                buffers: &[StarInstance::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthBuffer::FORMAT,
                // Stars draw first and never write depth; the globe simply
                // paints over them.
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::GreaterEqual, // reverse-Z
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_star"),
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

        let instances: Vec<StarInstance> = stars
            .iter()
            .map(|p| StarInstance {
                position: p.to_array(),
            })
            .collect();

        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("starfield-instances"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("starfield-uniform"),
            size: std::mem::size_of::<StarUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("starfield-bind-group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        log::info!("Starfield renderer created with {} stars", stars.len());

        Self {
            pipeline,
            instance_buffer,
            star_count: instances.len() as u32,
            uniform_buffer,
            bind_group,
        }
    }

    /// Update the uniform buffer with current frame state.
    pub fn update_uniform(
        &self,
        queue: &wgpu::Queue,
        view_proj: Mat4,
        rotation_angle: f32,
        camera_right: Vec3,
        camera_up: Vec3,
    ) {
        let uniform = StarUniform {
            view_proj: view_proj.to_cols_array_2d(),
            model: Mat4::from_rotation_y(rotation_angle).to_cols_array_2d(),
            camera_right: camera_right.to_array(),
            point_size: STAR_POINT_SIZE,
            camera_up: camera_up.to_array(),
            _pad: 0.0,
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Draw all stars. Must run before the globe so occluded stars are
    /// simply painted over.
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        render_pass.draw(0..6, 0..self.star_count);
    }
}
