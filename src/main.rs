use glam::Vec2;
use stardrift::palette::Palette;
use stardrift::viewport::logical_point;
use stardrift::{PointerTracker, RenderLoop, Renderer, Settings, Startup, Surface};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

struct App {
    settings: Settings,
    palette: Palette,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    pointer: PointerTracker,
    render_loop: Option<RenderLoop>,
}

impl App {
    fn new(settings: Settings, palette: Palette) -> Self {
        Self {
            settings,
            palette,
            window: None,
            renderer: None,
            pointer: PointerTracker::centered(Default::default()),
            render_loop: None,
        }
    }

    /// Without a drawing surface the backdrop stays off; the window still runs
    fn start_backdrop(&mut self, window: &Arc<Window>) {
        let renderer = pollster::block_on(Renderer::new(window.clone(), self.palette.main_bg_blue));
        let mut renderer = match renderer {
            Ok(renderer) => renderer,
            Err(e) => {
                log::warn!("Particle backdrop disabled: {}", e);
                return;
            }
        };

        let viewport = renderer.canvas_mut().viewport();
        self.pointer = PointerTracker::centered(viewport);
        let startup = Startup {
            reduced_motion: self.settings.reduced_motion,
            logical_width: viewport.width as f64,
        };
        let render_loop = RenderLoop::start(
            startup,
            &self.palette,
            renderer.canvas_mut(),
            &self.pointer,
            &mut rand::thread_rng(),
        );

        self.render_loop = Some(render_loop);
        self.renderer = Some(renderer);
        window.request_redraw();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(renderer), Some(render_loop), Some(window)) =
            (&mut self.renderer, &mut self.render_loop, &self.window)
        else {
            return;
        };

        // Static backdrops skip the tick and just show the retained fill again
        render_loop.frame(renderer.canvas_mut(), &self.pointer, &|| window.request_redraw());

        match renderer.present() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => renderer.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory; shutting down");
                render_loop.stop_handle().stop();
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(render_loop) = &self.render_loop {
            render_loop.stop_handle().stop();
            log::info!("Stopped after {} frames", render_loop.frames_rendered());
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("Stardrift")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.settings.window_width,
                self.settings.window_height,
            ));
        #[cfg(target_arch = "wasm32")]
        let window_attributes = {
            use winit::platform::web::WindowAttributesExtWebSys;
            window_attributes.with_append(true)
        };

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        self.start_backdrop(&window);
        self.window = Some(window);
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
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.shutdown(event_loop),

            WindowEvent::CursorMoved { position, .. } => {
                let Some(window) = &self.window else { return };
                let physical = Vec2::new(position.x as f32, position.y as f32);
                self.pointer
                    .on_move(logical_point(physical, window.scale_factor()), Vec2::ZERO);
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.set_scale_factor(scale_factor);
                }
            }

            // Resizing never re-seeds; particles wrap into the new bounds
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Set up logging
    env_logger::init();

    let settings = Settings::from_env();
    let args: Vec<String> = std::env::args().collect();

    if args.get(1).map(String::as_str) == Some("contact") {
        run_contact(&settings, &args[2..]);
    } else {
        run_backdrop(settings);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run_backdrop(settings: Settings) {
    use stardrift::palette::EnvStyle;

    let palette = Palette::from_style(&EnvStyle);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            eprintln!("Failed to start event loop: {}", e);
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(settings, palette);
    if let Err(e) = event_loop.run_app(&mut app) {
        eprintln!("Event loop error: {}", e);
        std::process::exit(1);
    }
}

/// `stardrift contact --name N --email E --message M [--hashid H]`
#[cfg(not(target_arch = "wasm32"))]
fn run_contact(settings: &Settings, args: &[String]) {
    use stardrift::FormClient;

    let form = match parse_contact_args(args, &settings.form_hashid) {
        Ok(form) => form,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Usage: stardrift contact --name N --email E --message M [--hashid H]");
            std::process::exit(2);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start async runtime: {}", e);
            std::process::exit(1);
        }
    };

    let client = FormClient::new(settings.form_endpoint.clone(), settings.form_hashid.clone());
    match rt.block_on(client.submit(&form)) {
        Ok(()) => println!("Message sent successfully!"),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_contact_args(args: &[String], default_hashid: &str) -> Result<stardrift::ContactForm, String> {
    let mut form = stardrift::ContactForm {
        hashid: default_hashid.to_string(),
        ..Default::default()
    };

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .ok_or_else(|| format!("Missing value for {}", flag))?
            .clone();
        match flag.as_str() {
            "--name" => form.name = value,
            "--email" => form.email = value,
            "--message" => form.message = value,
            "--hashid" => form.hashid = value,
            other => return Err(format!("Unknown option {}", other)),
        }
    }

    Ok(form)
}

// WebAssembly entry point
#[cfg(target_arch = "wasm32")]
fn main() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    console_log::init_with_level(log::Level::Warn).expect("Failed to initialize logger");

    wasm_bindgen_futures::spawn_local(run());
}

#[cfg(target_arch = "wasm32")]
async fn run() {
    let settings = Settings {
        reduced_motion: prefers_reduced_motion(),
        ..Settings::default()
    };

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Wait);
    let palette = Palette::from_style(&stardrift::palette::PageStyle);
    let mut app = App::new(settings, palette);

    event_loop.run_app(&mut app).expect("Event loop failed");
}

#[cfg(target_arch = "wasm32")]
fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}
