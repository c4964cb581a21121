use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use vello::peniko::Color as PenikoColor;
use vello::util::{RenderContext, RenderSurface};
use vello::{AaConfig, AaSupport, RenderParams, Renderer, RendererOptions};
use winit::{
    dpi::PhysicalSize,
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowBuilder},
};

use traffic_canvas::{
    graphics::SceneCanvas,
    Animation, FrameHandle, FrameScheduler, SceneConfig, SceneKind, Stage, SurfaceError,
    SurfaceSize, TrafficPreset,
};

#[derive(Parser)]
#[command(name = "traffic-canvas")]
#[command(about = "Animated traffic and particle backgrounds rendered with vello")]
struct Args {
    /// Scene configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Traffic preset; replaces the traffic and road sections of the configuration
    #[arg(short, long, value_enum)]
    preset: Option<TrafficPreset>,

    /// Animation to show
    #[arg(long, value_enum, default_value_t = SceneKind::Traffic)]
    scene: SceneKind,

    /// Random seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 1200)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<SceneConfig> {
    let mut config = match &args.config {
        Some(path) => SceneConfig::load_from_file(path)?,
        None => SceneConfig::default(),
    };

    if let Some(preset) = args.preset {
        let bundle = SceneConfig::preset(preset);
        config.traffic = bundle.traffic;
        config.road = bundle.road;
    }

    if args.seed.is_some() {
        config.random.seed = args.seed;
    }

    Ok(config)
}

/// Maps frame requests onto window redraw requests.
struct RedrawScheduler {
    window: Arc<Window>,
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameScheduler for RedrawScheduler {
    type Handle = FrameHandle;

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending = Some(handle);
        self.window.request_redraw();
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

struct Application {
    window: Arc<Window>,
    render_cx: RenderContext,
    surface: RenderSurface<'static>,
    renderer: Renderer,
    stage: Stage<Box<dyn Animation>, SceneCanvas, RedrawScheduler>,
    scroll_y: f32,
}

impl Application {
    /// Returns `None` when no drawing surface could be created.
    fn new(args: &Args, event_loop: &EventLoop<()>) -> Result<Option<Self>> {
        let config = load_config(args)?;
        info!("Scene: {:?}, {} configured vehicles", args.scene, config.traffic.vehicle_count);
        if let Some(seed) = config.random.seed {
            info!("Random Seed: {}", seed);
        }

        let window = Arc::new(
            WindowBuilder::new()
                .with_title("Traffic Canvas")
                .with_inner_size(PhysicalSize::new(args.width, args.height))
                .build(event_loop)
                .context("failed to create window")?,
        );
        let inner = window.inner_size();
        let size = SurfaceSize::new(inner.width, inner.height);

        let mut render_cx = RenderContext::new();
        let surface = pollster::block_on(render_cx.create_surface(
            window.clone(),
            size.width,
            size.height,
            wgpu::PresentMode::AutoVsync,
        ))
        .map_err(|e| SurfaceError::ContextUnavailable(e.to_string()));

        let canvas = match &surface {
            Ok(_) => Ok(SceneCanvas::new(size)),
            Err(e) => Err(e.clone()),
        };
        let scheduler = RedrawScheduler {
            window: window.clone(),
            next_id: 0,
            pending: None,
        };
        let animation = args.scene.build(&config, size);
        let Some(stage) = Stage::mount(animation, canvas, scheduler) else {
            return Ok(None);
        };
        let surface = surface?;

        let device = &render_cx.devices[surface.dev_id].device;
        let renderer = Renderer::new(
            device,
            RendererOptions {
                surface_format: Some(surface.format),
                use_cpu: false,
                antialiasing_support: AaSupport::area_only(),
                num_init_threads: None,
            },
        )
        .map_err(|e| anyhow!("failed to create renderer: {e}"))?;
        info!("Graphics system initialized ({}x{})", size.width, size.height);

        Ok(Some(Self {
            window,
            render_cx,
            surface,
            renderer,
            stage,
            scroll_y: 0.0,
        }))
    }

    fn redraw(&mut self) -> Result<()> {
        let Some(handle) = self.stage.scheduler().pending else {
            return Ok(());
        };

        self.stage.canvas_mut().reset();
        if !self.stage.on_frame(handle) {
            return Ok(());
        }

        let device_handle = &self.render_cx.devices[self.surface.dev_id];
        let surface_texture = self
            .surface
            .surface
            .get_current_texture()
            .context("failed to acquire surface texture")?;

        self.renderer
            .render_to_surface(
                &device_handle.device,
                &device_handle.queue,
                self.stage.canvas().scene(),
                &surface_texture,
                &RenderParams {
                    base_color: PenikoColor::BLACK,
                    width: self.surface.config.width,
                    height: self.surface.config.height,
                    antialiasing_method: AaConfig::Area,
                },
            )
            .map_err(|e| anyhow!("failed to render frame: {e}"))?;

        self.window.pre_present_notify();
        surface_texture.present();
        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width > 0 && size.height > 0 {
            self.render_cx
                .resize_surface(&mut self.surface, size.width, size.height);
        }
        self.stage.on_resize(SurfaceSize::new(size.width, size.height));
    }

    fn scroll(&mut self, delta: MouseScrollDelta) {
        let pixels = match delta {
            MouseScrollDelta::LineDelta(_, lines) => lines * 40.0,
            MouseScrollDelta::PixelDelta(position) => position.y as f32,
        };
        self.scroll_y = (self.scroll_y - pixels).max(0.0);
        debug!("scroll position {}", self.scroll_y);
        self.stage.on_scroll(self.scroll_y);
    }

    /// Returns true if the event should close the window.
    fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested");
                true
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                info!("ESC pressed - exiting");
                true
            }
            WindowEvent::Resized(size) => {
                self.resize(*size);
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll(*delta);
                false
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    log::error!("Render error: {:#}", e);
                }
                false
            }
            _ => false,
        }
    }
}

fn run(args: Args) -> Result<()> {
    let event_loop = EventLoop::new()?;
    let Some(mut app) = Application::new(&args, &event_loop)? else {
        warn!("No drawing surface available; nothing to animate");
        return Ok(());
    };

    info!("Starting interactive mode...");

    event_loop.run(move |event, control_flow| {
        if let Event::WindowEvent { ref event, window_id } = event {
            if window_id == app.window.id() && app.handle_event(event) {
                app.stage.unmount();
                control_flow.exit();
            }
        }
    })?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .init();
    info!("Starting Traffic Canvas");

    run(args)
}
