//! Window creation and the frame loop via winit.
//!
//! [`App`] implements winit's [`ApplicationHandler`]: the window and GPU
//! resources come up in `resumed`, the globe assembles synchronously with
//! progress shown in the title bar, and each `RedrawRequested` advances the
//! scene one frame and immediately schedules the next.

use std::sync::Arc;
use std::time::Instant;

use tellus_assets::{HttpFetcher, LoadMilestone, ProgressSink};
use tellus_camera::{GeoCoord, OrbitController};
use tellus_config::Config;
use tellus_globe::{
    AtmosphereRenderer, CloudRenderer, GlobeAssembly, GlobeStats, SurfaceRenderer,
};
use tellus_input::{InputSnapshot, KeyboardState, MouseState};
use tellus_render::{Camera, DepthBuffer, RenderContext, SurfaceError, init_render_context_blocking};
use tellus_space::{StarfieldGenerator, StarfieldRenderer};
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::fps::FpsCounter;
use crate::hud;
use crate::rotation::RotationState;

/// Window attributes from the loaded configuration.
fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(hud::loading_title(&config.window.title, 0))
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

/// Reports load progress into the window title.
struct TitleSink<'a> {
    window: &'a Window,
    title: &'a str,
}

impl ProgressSink for TitleSink<'_> {
    fn on_progress(&mut self, milestone: LoadMilestone) {
        info!("Load progress: {}% ({milestone:?})", milestone.percent());
        self.window
            .set_title(&hud::loading_title(self.title, milestone.percent()));
    }
}

/// The four GPU renderers, created together once assembly succeeds.
struct Scene {
    starfield: StarfieldRenderer,
    surface: SurfaceRenderer,
    atmosphere: AtmosphereRenderer,
    clouds: CloudRenderer,
    stats: GlobeStats,
}

/// Application state driving the winit event loop.
pub struct App {
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    depth_buffer: Option<DepthBuffer>,
    camera_buffer: Option<wgpu::Buffer>,
    scene: Option<Scene>,
    camera: Camera,
    orbit: OrbitController,
    rotation: RotationState,
    fps: FpsCounter,
    last_fps: u32,
    keyboard: KeyboardState,
    mouse: MouseState,
    config: Config,
    start_time: Instant,
}

impl App {
    /// Create the application state from a loaded configuration.
    pub fn new(config: Config) -> Self {
        let mut camera = Camera::default();
        camera.set_aspect_ratio(config.window.width as f32, config.window.height as f32);
        let orbit = OrbitController::new(config.orbit.clone());

        Self {
            window: None,
            gpu: None,
            depth_buffer: None,
            camera_buffer: None,
            scene: None,
            camera,
            orbit,
            rotation: RotationState::default(),
            fps: FpsCounter::new(0),
            last_fps: 0,
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
            config,
            start_time: Instant::now(),
        }
    }

    /// Assemble the globe and build all renderers. The fetches block, with
    /// milestones mirrored into the title bar as they pass.
    fn build_scene(&mut self, window: &Window, gpu: &RenderContext) -> Option<Scene> {
        let mut sink = TitleSink {
            window,
            title: &self.config.window.title,
        };
        let assembly = match GlobeAssembly::load(
            &HttpFetcher,
            &self.config.textures,
            &self.config.globe,
            &mut sink,
        ) {
            Ok(assembly) => assembly,
            Err(e) => {
                error!("Globe assembly failed: {e}");
                window.set_title(&hud::load_failed_title(&self.config.window.title));
                return None;
            }
        };

        let camera_buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera-uniform"),
            size: std::mem::size_of::<tellus_render::CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let stars = StarfieldGenerator::new(
            self.config.globe.star_seed,
            self.config.globe.star_count,
        )
        .generate();
        let starfield = StarfieldRenderer::new(&gpu.device, gpu.surface_format, &stars);

        let surface = SurfaceRenderer::new(
            &gpu.device,
            &gpu.queue,
            gpu.surface_format,
            &assembly.mesh,
            &camera_buffer,
            &assembly.color,
            &assembly.bump,
            &assembly.specular,
            self.config.globe.bump_scale,
            self.config.globe.shininess,
        );

        let atmosphere = AtmosphereRenderer::new(
            &gpu.device,
            gpu.surface_format,
            &assembly.mesh,
            &camera_buffer,
            self.config.globe.atmosphere_scale,
        );

        let clouds = CloudRenderer::new(
            &gpu.device,
            &gpu.queue,
            gpu.surface_format,
            &assembly.mesh,
            &camera_buffer,
            &assembly.clouds,
            self.config.globe.cloud_scale,
            self.config.globe.cloud_opacity,
        );

        self.camera_buffer = Some(camera_buffer);
        info!(
            "Scene ready: {} vertices, {} textures, {} stars",
            assembly.stats.vertex_count,
            assembly.stats.texture_count,
            stars.len()
        );

        Some(Scene {
            starfield,
            surface,
            atmosphere,
            clouds,
            stats: assembly.stats,
        })
    }

    /// Advance the simulation one frame and draw it.
    fn render_frame(&mut self) -> Result<(), SurfaceError> {
        let (Some(window), Some(gpu), Some(depth), Some(scene), Some(camera_buffer)) = (
            self.window.as_ref(),
            self.gpu.as_ref(),
            self.depth_buffer.as_ref(),
            self.scene.as_ref(),
            self.camera_buffer.as_ref(),
        ) else {
            return Ok(());
        };

        // Input drives the orbit; rotation advances unconditionally.
        let snapshot = InputSnapshot::capture(&self.keyboard, &self.mouse);
        self.keyboard.clear_transients();
        self.mouse.clear_transients();

        self.orbit.consume(&snapshot);
        self.orbit.update();
        self.orbit.apply(&mut self.camera);
        self.rotation.advance();

        let now_ms = self.start_time.elapsed().as_millis() as u64;
        if let Some(fps) = self.fps.sample(now_ms) {
            self.last_fps = fps;
        }
        let coord = GeoCoord::from_view_direction(self.camera.forward());
        let fps = self.config.debug.show_fps.then_some(self.last_fps);
        window.set_title(&hud::status_title(
            &self.config.window.title,
            coord,
            fps,
            scene.stats,
        ));

        // Upload per-frame uniforms.
        let camera_uniform = self.camera.to_uniform();
        gpu.queue
            .write_buffer(camera_buffer, 0, bytemuck::cast_slice(&[camera_uniform]));
        scene.surface.update_uniform(&gpu.queue, self.rotation.globe);
        scene.clouds.update_uniform(&gpu.queue, self.rotation.clouds);
        scene
            .atmosphere
            .update_uniform(&gpu.queue, self.camera.view_matrix());
        scene.starfield.update_uniform(
            &gpu.queue,
            self.camera.view_projection_matrix(),
            self.rotation.stars,
            self.camera.right(),
            self.camera.up(),
        );

        let surface_texture = gpu.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("globe-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(DepthBuffer::CLEAR_VALUE),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            // Back to front: stars, opaque surface, then the blended shells.
            scene.starfield.render(&mut pass);
            scene.surface.render(&mut pass);
            scene.atmosphere.render(&mut pass);
            scene.clouds.render(&mut pass);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        window.request_redraw();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = window_attributes_from_config(&self.config);
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let gpu = match init_render_context_blocking(window.clone(), self.config.window.vsync) {
            Ok(gpu) => gpu,
            Err(e) => {
                error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.camera
            .set_aspect_ratio(size.width as f32, size.height as f32);
        self.depth_buffer = Some(DepthBuffer::new(&gpu.device, size.width, size.height));
        self.fps = FpsCounter::new(self.start_time.elapsed().as_millis() as u64);

        self.scene = self.build_scene(&window, &gpu);
        if self.scene.is_some() {
            // Kick off the frame loop; each frame schedules the next.
            window.request_redraw();
        }
        // On assembly failure the window stays up showing the failure title,
        // with no frame loop behind it.

        self.gpu = Some(gpu);
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                let (w, h) = (new_size.width, new_size.height);
                self.camera.set_aspect_ratio(w as f32, h as f32);
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(w, h);
                    if let Some(depth) = &mut self.depth_buffer {
                        depth.resize(&gpu.device, w.max(1), h.max(1));
                    }
                }
                info!("Window resized to {w}x{h}");
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.keyboard.process_event(&event);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse.on_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.mouse.on_scroll(delta);
            }
            WindowEvent::RedrawRequested => match self.render_frame() {
                Ok(()) => {}
                Err(SurfaceError::Timeout) => {
                    warn!("Surface timeout, skipping frame");
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
                Err(e) => {
                    error!("Rendering failed: {e}");
                    event_loop.exit();
                }
            },
            _ => {}
        }
    }
}

/// Create an event loop and run the viewer. Blocks until the window closes.
pub fn run(config: Config) -> Result<(), winit::error::EventLoopError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)
}
