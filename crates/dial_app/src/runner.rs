//! winit event loop → `WatchFace` triggers.
//!
//! | winit                       | face                                   |
//! |-----------------------------|----------------------------------------|
//! | `resumed`                   | `on_context_created` + `on_surface_resized` |
//! | `suspended`                 | `on_context_lost`                      |
//! | `Resized` (non-zero)        | `on_surface_resized`                   |
//! | `Focused(f)`                | `on_mode_changed(ambient = !f)`        |
//! | `Occluded(o)`               | `on_visibility_changed(!o)`            |
//! | `RedrawRequested`           | `request_frame`                        |
//! | `WaitUntil` deadline        | `on_time_tick`                         |
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use dial_core::{LocalClock, WallClock};
use dial_renderer::{ComplicationDrawer, NextFrame, Redraw, WatchFace, WgpuBackend};

use crate::builder::AppConfig;
use crate::graphics;

/// A deadline closer than this is treated as already passed, so an early
/// wake-up does not fire the same tick twice.
const TICK_SLACK: Duration = Duration::from_millis(50);

struct Runner {
    config: AppConfig,
    face: WatchFace<WgpuBackend, LocalClock>,
    window: Option<Arc<Window>>,
    next_tick: Instant,
    error: Option<anyhow::Error>,
}

impl Runner {
    fn new(config: AppConfig, drawer: Box<dyn ComplicationDrawer>) -> Self {
        let mut face = WatchFace::new(config.face.clone(), LocalClock);
        face.set_complication_drawer(drawer);
        // no window yet: start_context requests the first frame either way
        if config.always_ambient && face.on_mode_changed(true).is_requested() {
            log::debug!("starting in ambient mode");
        }
        let next_tick = Instant::now() + next_tick_in(face.time_tick_interval());
        Self { config, face, window: None, next_tick, error: None }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn redraw_if(&self, redraw: Redraw) {
        if redraw.is_requested() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    /// Creates the window on first use, then a fresh graphics context for it.
    fn start_context(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window = match &self.window {
            Some(window) => window.clone(),
            None => {
                let attributes = Window::default_attributes()
                    .with_title(&self.config.title)
                    .with_resizable(self.config.resizable)
                    .with_inner_size(winit::dpi::PhysicalSize::new(
                        self.config.width,
                        self.config.height,
                    ));
                let window = Arc::new(
                    event_loop
                        .create_window(attributes)
                        .context("failed to create window")?,
                );
                self.window = Some(window.clone());
                window
            }
        };

        let size = window.inner_size();
        let (width, height) = if size.width > 0 && size.height > 0 {
            (size.width, size.height)
        } else {
            (self.config.width, self.config.height)
        };

        let backend = pollster::block_on(graphics::create_backend(
            window.clone(),
            width,
            height,
            self.config.vsync,
        ))?;
        self.face.on_context_created(backend)?;
        self.face.on_surface_resized(width, height)?;
        window.request_redraw();
        Ok(())
    }
}

impl ApplicationHandler for Runner {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.face.is_initialized() {
            return;
        }
        if let Err(err) = self.start_context(event_loop) {
            self.fail(event_loop, err.context("could not start the face"));
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        // the window survives; its surface and every GPU resource do not
        drop(self.face.on_context_lost());
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Err(err) = self.face.on_surface_resized(size.width, size.height) {
                    self.fail(event_loop, err.into());
                    return;
                }
                self.redraw_if(Redraw::Requested);
            }
            WindowEvent::Focused(focused) => {
                if !self.config.always_ambient {
                    let redraw = self.face.on_mode_changed(!focused);
                    self.redraw_if(redraw);
                }
            }
            WindowEvent::Occluded(occluded) => {
                let redraw = self.face.on_visibility_changed(!occluded);
                self.redraw_if(redraw);
            }
            WindowEvent::RedrawRequested => {
                if !self.face.is_initialized() {
                    return;
                }
                match self.face.request_frame() {
                    Ok(outcome) => {
                        if outcome.next == NextFrame::Continuous {
                            self.redraw_if(Redraw::Requested);
                        }
                    }
                    Err(err) => self.fail(event_loop, anyhow::Error::new(err).context("frame failed")),
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now + TICK_SLACK >= self.next_tick {
            let wait = next_tick_in(self.face.time_tick_interval());
            self.next_tick = now + if wait < TICK_SLACK { wait + self.face.time_tick_interval() } else { wait };
            let redraw = self.face.on_time_tick();
            self.redraw_if(redraw);
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
    }
}

/// Time until the wall clock next crosses a multiple of `interval`.
fn next_tick_in(interval: Duration) -> Duration {
    LocalClock.now().until_next_boundary(interval)
}

pub(crate) fn run_internal(config: AppConfig, drawer: Box<dyn ComplicationDrawer>) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    // nothing spins: redraws are requested explicitly, ticks use WaitUntil
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut runner = Runner::new(config, drawer);
    event_loop
        .run_app(&mut runner)
        .context("event loop terminated abnormally")?;

    match runner.error.take() {
        Some(err) => Err(err),
        None => {
            log::info!("window closed");
            Ok(())
        }
    }
}
