use anyhow::Result;
use clap::Parser;
use orrery_input::OrbitController;
use orrery_render::{BloomSettings, Viewport};
use orrery_render_wgpu::{BloomComposer, OrbitCamera};
use orrery_scene::{presets, Scene};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "orrery-desktop", about = "Animated sun and moon scene with bloom")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 720)]
    height: u32,
}

/// Application state outside the GPU handles.
struct AppState {
    scene: Scene,
    controller: OrbitController,
    camera: OrbitCamera,
    last_frame: Instant,
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
}

impl AppState {
    fn new() -> Self {
        let (scene, _handles) = presets::sun_and_moon();
        Self {
            scene,
            controller: OrbitController::default(),
            camera: OrbitCamera::default(),
            last_frame: Instant::now(),
            dragging: false,
            last_cursor: None,
        }
    }

    /// One frame-loop tick. Fixed order: damped controller step, camera
    /// sync, then scene tracks and timers. The caller renders strictly
    /// afterwards, so a frame never shows a half-applied tick.
    fn update(&mut self, dt: f32) {
        self.controller.update();
        self.camera.set_orbit(
            self.controller.yaw(),
            self.controller.pitch(),
            self.controller.distance(),
        );
        self.scene.advance(dt);
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    composer: Option<BloomComposer>,
    initial_size: LogicalSize<u32>,
}

impl GpuApp {
    fn new(width: u32, height: u32) -> Self {
        Self {
            state: AppState::new(),
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            composer: None,
            initial_size: LogicalSize::new(width, height),
        }
    }

    /// Apply a viewport snapshot to every consumer in one synchronous
    /// batch: surface configuration, composer targets, camera projection.
    /// Nothing renders until all of them reflect the same snapshot.
    fn apply_resize(&mut self, physical_width: u32, physical_height: u32) {
        let (Some(window), Some(surface), Some(device), Some(config)) = (
            &self.window,
            &self.surface,
            &self.device,
            &mut self.config,
        ) else {
            return;
        };

        config.width = physical_width.max(1);
        config.height = physical_height.max(1);
        surface.configure(device, config);

        let viewport =
            Viewport::from_physical(physical_width, physical_height, window.scale_factor());
        if let Some(composer) = &mut self.composer {
            composer.resize(device, viewport);
        }
        self.state.camera.set_viewport(&viewport);
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Orrery")
            .with_inner_size(self.initial_size);
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("orrery_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let viewport = Viewport::from_physical(size.width, size.height, window.scale_factor());
        self.state.camera.set_viewport(&viewport);

        let composer =
            BloomComposer::new(&device, surface_format, viewport, BloomSettings::default());

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.composer = Some(composer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.apply_resize(new_size.width, new_size.height);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                self.state.dragging = btn_state == ElementState::Pressed;
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.state.dragging {
                    if let Some((last_x, last_y)) = self.state.last_cursor {
                        self.state.controller.apply_drag(
                            (position.x - last_x) as f32,
                            (position.y - last_y) as f32,
                        );
                    }
                }
                self.state.last_cursor = Some((position.x, position.y));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 120.0,
                };
                self.state.controller.apply_zoom(scroll);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.state.last_frame).as_secs_f32().min(0.1);
                self.state.last_frame = now;
                self.state.update(dt);

                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
                        return;
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                if let Some(composer) = &self.composer {
                    composer.render(device, queue, &view, &self.state.camera, &self.state.scene);
                }

                output.present();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Continuous loop: every pass through the event queue queues the
        // next frame. The host schedules it at its own cadence.
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("orrery-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(cli.width, cli.height);
    event_loop.run_app(&mut app)?;

    Ok(())
}
