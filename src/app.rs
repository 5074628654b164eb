use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::animator::{Animator, TickOutcome};
use crate::config::AnimatorConfig;
use crate::core::FpsCounter;
use crate::renderer::Renderer;
use crate::window::WinitHost;

/// How often a hidden window re-checks whether it is visible again
const HIDDEN_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Native shell: one window, one animator
pub struct App {
    config: AnimatorConfig,
    host: Option<WinitHost>,
    animator: Option<Animator<Renderer>>,
    fps: FpsCounter,
}

impl App {
    pub fn new(config: AnimatorConfig) -> Self {
        Self {
            config,
            host: None,
            animator: None,
            fps: FpsCounter::new(),
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let (Some(animator), Some(host)) = (&mut self.animator, &mut self.host) {
            animator.stop(host);
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.host.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(self.config.title.clone())
                .with_inner_size(winit::dpi::LogicalSize::new(self.config.width, self.config.height)),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let mut host = WinitHost::new(window, self.config.surface_id.clone(), self.config.shadows);
        let mut animator = match Animator::init(&mut host, &self.config) {
            Ok(animator) => animator,
            Err(e) => {
                log::error!("failed to initialize hero scene: {e}");
                event_loop.exit();
                return;
            }
        };
        animator.start(&mut host);

        self.host = Some(host);
        self.animator = Some(animator);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
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
            } => self.shutdown(event_loop),
            WindowEvent::Resized(_) => {
                // Restoring a minimized window may only show up as a resize
                if let (Some(animator), Some(host)) = (&mut self.animator, &mut self.host) {
                    animator.on_resize(&*host);
                    animator.on_visibility_change(&*host);
                    host.resume();
                }
            }
            WindowEvent::Occluded(occluded) => {
                if let (Some(animator), Some(host)) = (&mut self.animator, &mut self.host) {
                    host.set_occluded(occluded);
                    animator.on_visibility_change(&*host);
                    log::debug!("window {}", if occluded { "hidden" } else { "visible" });
                }
            }
            WindowEvent::RedrawRequested => {
                let (Some(animator), Some(host)) = (&mut self.animator, &mut self.host) else {
                    return;
                };
                if host.take_pending_frame().is_none() {
                    return;
                }
                if animator.tick(host) == TickOutcome::Rendered {
                    if let Some(fps) = self.fps.frame() {
                        let truck = animator.state().truck_position();
                        log::debug!("FPS: {fps:.1}, truck z={:.1}", truck.z);
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(animator), Some(host)) = (&mut self.animator, &mut self.host) else {
            return;
        };
        if !host.has_parked_frame() {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        }

        animator.on_visibility_change(&*host);
        if animator.state().visible {
            host.resume();
            event_loop.set_control_flow(ControlFlow::Wait);
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + HIDDEN_POLL_INTERVAL));
        }
    }
}

/// Opens the window and blocks until it closes
pub fn run(config: AnimatorConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(config);

    log::info!("Road Hero - Escape to quit");
    event_loop.run_app(&mut app).context("event loop terminated with an error")?;

    Ok(())
}
