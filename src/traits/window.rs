use crate::error::SceneResult;

use super::renderer::Rasterizer;

/// Viewport size in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Zero-sized viewports show up while a window is minimized
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Ticket for one pending "call me before the next repaint" request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// The environment the animator runs in: window system, refresh scheduler
/// and the registry of drawing surfaces
pub trait Host {
    type Surface: Rasterizer;

    /// Current viewport, read on demand
    fn viewport(&self) -> Viewport;

    /// Whether the output is currently hidden from the user
    fn is_hidden(&self) -> bool;

    /// Looks up a drawing surface by its logical identifier. `Ok(None)` means
    /// no such surface exists; errors mean it exists but could not be set up.
    fn acquire_surface(&mut self, id: &str) -> SceneResult<Option<Self::Surface>>;

    /// One-shot request to tick again before the next repaint
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraws a request made with [`Host::request_frame`]
    fn cancel_frame(&mut self, handle: FrameHandle);
}
