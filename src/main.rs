//! Clock App - analog and digital desktop clock

use clock_app::app::{self, App, AppResult};
use clock_app::persistence::{self, WindowState};
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use std::ffi::CString;
use std::num::NonZeroU32;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, ModifiersState, NamedKey};
use winit::window::{Window, WindowAttributes, WindowId};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut handler = AppHandler::new();
    event_loop.run_app(&mut handler).expect("Event loop failed");
}

struct AppHandler {
    state: Option<AppState>,
    modifiers: ModifiersState,
    mouse_position: (f64, f64),
}

struct AppState {
    window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    app: App,
}

impl AppHandler {
    fn new() -> Self {
        Self {
            state: None,
            modifiers: ModifiersState::default(),
            mouse_position: (0.0, 0.0),
        }
    }

    fn save_window_state(state: &AppState) {
        let size = state.window.inner_size();
        let Ok(position) = state.window.outer_position() else {
            return;
        };
        let window_state = WindowState {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        };
        if let Err(err) = persistence::save_window_state(window_state) {
            log::warn!("cannot save window state: {}", err);
        }
    }
}

fn translate_key(key: &Key) -> Option<app::Key> {
    Some(match key {
        Key::Named(NamedKey::Escape) => app::Key::Escape,
        Key::Named(NamedKey::Enter) => app::Key::Enter,
        Key::Named(NamedKey::Backspace) => app::Key::Backspace,
        Key::Named(NamedKey::Delete) => app::Key::Delete,
        Key::Named(NamedKey::ArrowLeft) => app::Key::ArrowLeft,
        Key::Named(NamedKey::ArrowRight) => app::Key::ArrowRight,
        Key::Named(NamedKey::ArrowUp) => app::Key::ArrowUp,
        Key::Named(NamedKey::ArrowDown) => app::Key::ArrowDown,
        Key::Named(NamedKey::Home) => app::Key::Home,
        Key::Named(NamedKey::End) => app::Key::End,
        Key::Named(NamedKey::Space) => app::Key::Space,
        Key::Character(c) => app::Key::Char(c.chars().next()?),
        _ => return None,
    })
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let mut window_attrs = WindowAttributes::default().with_title("Clock App");
        match persistence::load_window_state() {
            Some(saved) => {
                window_attrs = window_attrs
                    .with_inner_size(PhysicalSize::new(saved.width, saved.height))
                    .with_position(PhysicalPosition::new(saved.x, saved.y));
            }
            None => {
                window_attrs = window_attrs.with_inner_size(LogicalSize::new(420.0, 480.0));
            }
        }

        // OpenGL config with 4x MSAA for smooth hands and text
        let config_template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_multisampling(4);

        let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attrs));

        let (window, gl_config) = display_builder
            .build(event_loop, config_template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .expect("No GL configs found")
            })
            .expect("Failed to create window");

        let window = window.expect("Window not created");
        let gl_display = gl_config.display();

        let context_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(None))
            .build(Some(
                window
                    .window_handle()
                    .expect("Failed to get window handle")
                    .as_raw(),
            ));

        let gl_context = unsafe {
            gl_display
                .create_context(&gl_config, &context_attrs)
                .expect("Failed to create GL context")
        };

        let size = window.inner_size();
        let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            window
                .window_handle()
                .expect("Failed to get window handle")
                .as_raw(),
            NonZeroU32::new(size.width.max(1)).expect("nonzero width"),
            NonZeroU32::new(size.height.max(1)).expect("nonzero height"),
        );

        let gl_surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &surface_attrs)
                .expect("Failed to create surface")
        };

        let gl_context = gl_context
            .make_current(&gl_surface)
            .expect("Failed to make context current");

        let renderer = unsafe {
            femtovg::renderer::OpenGl::new_from_function_cstr(|name| {
                let cstr = CString::new(name.to_bytes()).expect("GL symbol name");
                gl_display.get_proc_address(&cstr) as *const _
            })
            .expect("Failed to create renderer")
        };

        let scale = window.scale_factor() as f32;
        let app = App::new(renderer, size.width as f32, size.height as f32, scale);
        log::info!("window ready at {}x{} (scale {})", size.width, size.height, scale);

        self.state = Some(AppState {
            window,
            gl_context,
            gl_surface,
            app,
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let state = match &mut self.state {
            Some(s) => s,
            None => return,
        };

        let result = match event {
            WindowEvent::CloseRequested => {
                Self::save_window_state(state);
                event_loop.exit();
                return;
            }

            WindowEvent::Resized(size) => {
                if let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
                    state.gl_surface.resize(&state.gl_context, width, height);
                    let scale = state.window.scale_factor() as f32;
                    state.app.resize(size.width as f32, size.height as f32, scale);
                    AppResult::Redraw
                } else {
                    AppResult::Ok
                }
            }

            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
                AppResult::Ok
            }

            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                let modifiers = app::Modifiers {
                    ctrl: self.modifiers.control_key(),
                    alt: self.modifiers.alt_key(),
                };
                match translate_key(&event.logical_key) {
                    Some(key) => match app::resolve(&app::KeyEvent::new(key, modifiers)) {
                        Some(action) => state.app.execute(action),
                        None => AppResult::Ok,
                    },
                    None => AppResult::Ok,
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = (position.x, position.y);
                state
                    .app
                    .handle_mouse_move(position.x as f32, position.y as f32)
            }

            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => {
                let (x, y) = self.mouse_position;
                match button_state {
                    ElementState::Pressed => state.app.mouse_down(x as f32, y as f32),
                    ElementState::Released => state.app.mouse_up(),
                }
            }

            WindowEvent::RedrawRequested => {
                state.app.render();
                if let Err(err) = state.gl_surface.swap_buffers(&state.gl_context) {
                    log::error!("failed to swap buffers: {}", err);
                }
                AppResult::Ok
            }

            _ => AppResult::Ok,
        };

        if state.app.should_quit() {
            Self::save_window_state(state);
            event_loop.exit();
        } else if result.needs_redraw() {
            state.window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            if state.app.tick().needs_redraw() {
                state.window.request_redraw();
            }
            event_loop.set_control_flow(ControlFlow::WaitUntil(state.app.next_wakeup()));
        }
    }
}
