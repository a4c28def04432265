//! Lissajous - audio-reactive line renderer
//!
//! Captures a loopback device and draws Lissajous trails whose speed,
//! density and glow follow the loudness of whatever is playing.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context};
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use lissajous_scope::audio::{
    list_devices, probe_input_device, AudioError, CaptureStream, SharedAmplitude, DEVICE_HINT,
};
use lissajous_scope::cli::VisualArgs;
use lissajous_scope::params::{CaptureConfig, ParticleConfig, ReactiveMapping, RenderConfig};
use lissajous_scope::rendering::{LineUniforms, RenderSystem};
use lissajous_scope::visual::{AmplitudeFollower, LineVertex, ParticleField};

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,
    render_config: RenderConfig,

    // Audio
    capture: Option<CaptureStream>,
    amplitude: SharedAmplitude,

    // Animation
    follower: AmplitudeFollower,
    particles: ParticleField,
    vertices: Vec<LineVertex>,
    max_vertices: usize,

    // Time tracking
    last_frame: Instant,

    /// First unrecoverable error, reported after the event loop returns
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(
        capture: CaptureStream,
        mapping: ReactiveMapping,
        particle_config: &ParticleConfig,
        render_config: RenderConfig,
    ) -> Self {
        let amplitude = capture.amplitude().clone();
        let particles = ParticleField::new(particle_config, &mut rand::thread_rng());

        Self {
            window: None,
            render_system: None,
            render_config,
            capture: Some(capture),
            amplitude,
            follower: AmplitudeFollower::new(mapping, particle_config),
            particles,
            vertices: Vec::with_capacity(particle_config.max_vertices()),
            max_vertices: particle_config.max_vertices(),
            last_frame: Instant::now(),
            fatal: None,
        }
    }

    /// Stop the capture stream (idempotent)
    fn shutdown(&mut self) {
        if let Some(capture) = self.capture.take() {
            if let Err(e) = capture.stop() {
                log::warn!("{}", e);
            }
        }
    }

    /// Record a fatal error, release audio, and leave the event loop
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        self.fatal.get_or_insert(error);
        self.shutdown();
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        // Create window
        let window_attributes = Window::default_attributes()
            .with_title(self.render_config.title.clone())
            .with_resizable(false)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, anyhow!(e).context("Failed to create window"));
                return;
            }
        };

        // Initialize rendering system
        let render_system = match pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.render_config,
            self.max_vertices,
        )) {
            Ok(render_system) => render_system,
            Err(e) => {
                self.fail(event_loop, anyhow!(e).context("Failed to initialize renderer"));
                return;
            }
        };

        println!("\nLissajous is running!");
        println!("Press ESC to quit\n");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.last_frame = Instant::now();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                self.shutdown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render_frame() {
                    self.fail(event_loop, e);
                }
            }
            _ => {}
        }
    }
}

impl App {
    /// Advance the animation by one frame and draw it
    fn render_frame(&mut self) -> anyhow::Result<()> {
        let Some(ref render_system) = self.render_system else {
            return Ok(());
        };

        let now = Instant::now();
        let dt_s = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        // Latest block level from the capture thread
        let frame = self.follower.update(self.amplitude.load(), dt_s);

        self.particles
            .write_segments(frame.active_count, frame.animation_time, &mut self.vertices);

        render_system.update_vertices(&self.vertices);
        render_system.update_uniforms(&LineUniforms::new(&self.render_config, frame.brightness));

        match render_system.render(self.vertices.len()) {
            Ok(()) => Ok(()),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_system.reconfigure();
                Ok(())
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err(anyhow!("GPU out of memory")),
            Err(e) => {
                log::warn!("Render error: {:?}", e);
                Ok(())
            }
        }
    }
}

fn print_devices(host: &cpal::Host) -> anyhow::Result<()> {
    println!("Audio devices ({}):", host.id().name());
    for device in list_devices(host)? {
        println!("{}", device);
    }
    Ok(())
}

fn run(args: VisualArgs) -> anyhow::Result<()> {
    let host = cpal::default_host();

    if args.list_devices {
        return print_devices(&host);
    }

    let particle_config = args.particle_config().map_err(anyhow::Error::msg)?;
    let mapping = ReactiveMapping::default();
    mapping.validate().map_err(anyhow::Error::msg)?;

    // Detect sample rate
    let probed = probe_input_device(&host, args.device)
        .with_context(|| format!("Error querying device {}", args.device))?;
    println!("Device '{}' found at {} Hz", probed.name, probed.sample_rate);

    // Audio stream
    let capture = CaptureStream::open(
        &probed,
        &CaptureConfig::low_latency(args.device),
        SharedAmplitude::new(),
    )?;
    capture.start()?;
    println!("Audio stream started successfully.");

    let mut app = App::new(capture, mapping, &particle_config, RenderConfig::default());
    let event_loop = EventLoop::new()?;
    let result = event_loop.run_app(&mut app);

    // Covers exits that bypass the close handler
    app.shutdown();
    result?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(VisualArgs::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            if e.downcast_ref::<AudioError>().is_some() {
                eprintln!("{}", DEVICE_HINT);
            }
            ExitCode::FAILURE
        }
    }
}
