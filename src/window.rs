use std::sync::Arc;

use winit::window::Window as WinitWindow;

use crate::config::ShadowConfig;
use crate::core::FrameScheduler;
use crate::error::{SceneError, SceneResult};
use crate::renderer::Renderer;
use crate::traits::{FrameHandle, Host, Viewport};

/// [`Host`] backed by a single winit window. The window is the only drawing
/// surface and answers to `surface_id`.
pub struct WinitHost {
    inner: Arc<WinitWindow>,
    surface_id: String,
    shadows: ShadowConfig,
    occluded: bool,
    frames: FrameScheduler,
}

impl WinitHost {
    pub fn new(window: Arc<WinitWindow>, surface_id: impl Into<String>, shadows: ShadowConfig) -> Self {
        Self {
            inner: window,
            surface_id: surface_id.into(),
            shadows,
            occluded: false,
            frames: FrameScheduler::new(),
        }
    }

    pub fn set_occluded(&mut self, occluded: bool) {
        self.occluded = occluded;
        self.resume();
    }

    /// Wakes a parked frame request once the window is visible again. Some
    /// platforms also drop redraw requests while occluded.
    pub fn resume(&mut self) {
        if !self.is_hidden() && self.frames.resume() {
            self.inner.request_redraw();
        }
    }

    /// A request is waiting for the window to become visible
    pub fn has_parked_frame(&self) -> bool {
        self.frames.is_parked()
    }

    /// Consumes the outstanding frame request, if any. A redraw with no
    /// pending request (e.g. one that was cancelled) must not tick.
    pub fn take_pending_frame(&mut self) -> Option<FrameHandle> {
        self.frames.take()
    }
}

impl Host for WinitHost {
    type Surface = Renderer;

    fn viewport(&self) -> Viewport {
        let size = self.inner.inner_size();
        Viewport::new(size.width, size.height)
    }

    fn is_hidden(&self) -> bool {
        self.occluded || self.inner.is_minimized().unwrap_or(false)
    }

    fn acquire_surface(&mut self, id: &str) -> SceneResult<Option<Renderer>> {
        if id != self.surface_id {
            return Ok(None);
        }

        pollster::block_on(Renderer::new(self.inner.clone(), &self.shadows))
            .map(Some)
            .map_err(|e| SceneError::Gpu(format!("{e:#}")))
    }

    fn request_frame(&mut self) -> FrameHandle {
        let (handle, wake) = self.frames.request(self.is_hidden());
        if wake {
            self.inner.request_redraw();
        }
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.cancel(handle);
    }
}
