use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, DeviceEvents, EventLoop},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::{
    camera::CameraConfig,
    input::{Action, Bindings, InputState},
    prelude::ResultAny,
    util::{
        FrameClock,
        print::{Logger, RotatingFileSink, set_global_logger},
    },
};

pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "fpscam".to_string(),
            width: 800,
            height: 600,
        }
    }
}

pub struct EngineConfig {
    pub logger: Logger,
    pub window: WindowConfig,
    pub bindings: Bindings,
    pub camera: CameraConfig,
    /// read mouse look from raw device motion instead of cursor positions,
    /// required for a locked cursor which reports no new positions
    pub raw_mouse_motion: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let mut logger = Logger::console();
        if let Ok(file) = RotatingFileSink::new("logs/console.log", 1024 * 1024) {
            logger.sinks.push(Box::new(file));
        }
        Self {
            logger,
            window: WindowConfig::default(),
            bindings: Bindings::default(),
            camera: CameraConfig::default(),
            raw_mouse_motion: true,
        }
    }
}

/// State handed to the [`App`] on every tick.
pub struct AppContext {
    pub input: InputState,
    pub clock: FrameClock,
    pub camera: CameraConfig,
    /// cursor deltas come from `DeviceEvent::MouseMotion` only, never from `CursorMoved`
    pub raw_mouse_motion: bool,
    window: Option<Window>,
    exit: bool,
}

impl AppContext {
    pub fn new(bindings: Bindings, camera: CameraConfig) -> Self {
        Self {
            input: InputState::new(bindings),
            clock: FrameClock::new(),
            camera,
            raw_mouse_motion: true,
            window: None,
            exit: false,
        }
    }

    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }

    /// Width over height of the window, `1.0` without one.
    pub fn aspect(&self) -> f32 {
        self.window
            .as_ref()
            .map(|window| window.inner_size())
            .filter(|size| size.width > 0 && size.height > 0)
            .map_or(1.0, |size| size.width as f32 / size.height as f32)
    }

    pub fn exit(&mut self) {
        self.exit = true;
    }

    pub fn exiting(&self) -> bool {
        self.exit
    }

    /// Feeds a window event to the input state, skipping cursor positions
    /// when look input comes from raw motion.
    pub fn window_input(&mut self, event: &WindowEvent) {
        let is_cursor_move = matches!(event, WindowEvent::CursorMoved { .. });
        if self.raw_mouse_motion && is_cursor_move {
            return;
        }
        self.input.window_event(event);
    }

    pub fn device_input(&mut self, event: &DeviceEvent) {
        if !self.raw_mouse_motion {
            return;
        }
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = *event {
            self.input.accumulate_cursor(dx, dy);
        }
    }

    /// One simulation tick: time, then the single cursor checkpoint, then the app.
    pub fn step<A: App>(&mut self, app: &mut A, now: Instant) {
        self.clock.tick_at(now);
        self.input.checkpoint_cursor();
        if self.input.is_active(Action::Quit) && !self.exit {
            crate::info!("quit requested");
            self.exit = true;
        }
        app.update(self);
    }
}

pub trait App {
    fn new(context: &mut AppContext) -> Self
    where
        Self: Sized;
    fn update(&mut self, context: &mut AppContext);
    fn on_event(&mut self, context: &mut AppContext, event: &WindowEvent) {
        _ = (context, event);
    }
}

/// Drives an [`App`] from the winit event loop.
pub struct Engine<A: App> {
    context: AppContext,
    window_config: WindowConfig,
    app: Option<A>,
}

impl<A: App> Engine<A> {
    pub fn run(config: EngineConfig) -> ResultAny {
        set_global_logger(config.logger)?;
        crate::info!("starting event loop");

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.listen_device_events(DeviceEvents::WhenFocused);

        let mut context = AppContext::new(config.bindings, config.camera);
        context.raw_mouse_motion = config.raw_mouse_motion;
        let mut engine = Self {
            context,
            window_config: config.window,
            app: None,
        };
        event_loop.run_app(&mut engine)?;
        crate::info!("event loop finished after {} frames", engine.context.clock.frame());
        Ok(())
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> ResultAny {
        let attributes = Window::default_attributes()
            .with_title(self.window_config.title.clone())
            .with_inner_size(LogicalSize::new(
                self.window_config.width,
                self.window_config.height,
            ));
        let window = event_loop.create_window(attributes)?;
        crate::info!(
            "created window \"{}\" {}x{}",
            self.window_config.title,
            self.window_config.width,
            self.window_config.height
        );
        grab_cursor(&window);
        self.context.window = Some(window);
        Ok(())
    }
}

fn grab_cursor(window: &Window) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    if let Err(err) = grabbed {
        crate::warn!("failed to grab cursor: {err}");
    }
    window.set_cursor_visible(false);
}

impl<A: App> ApplicationHandler<()> for Engine<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.context.window.is_some() {
            return;
        }
        if let Err(err) = self.create_window(event_loop) {
            crate::err!("failed to create window: {err}");
            event_loop.exit();
            return;
        }
        self.context.clock = FrameClock::new();
        self.app = Some(A::new(&mut self.context));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.context.window_input(&event);

        let Some(app) = self.app.as_mut() else {
            return;
        };
        app.on_event(&mut self.context, &event);

        match event {
            WindowEvent::CloseRequested => self.context.exit(),
            WindowEvent::Focused(focused) => {
                crate::debug!("focus {}", if focused { "gained" } else { "lost" });
                if focused {
                    if let Some(window) = self.context.window.as_ref() {
                        grab_cursor(window);
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.context.step(app, Instant::now());
                if let Some(window) = self.context.window.as_ref() {
                    window.request_redraw();
                }
            }
            _ => {}
        }

        if self.context.exit {
            event_loop.exit();
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        self.context.device_input(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.context.window.as_ref() {
            window.request_redraw();
        }
    }
}
