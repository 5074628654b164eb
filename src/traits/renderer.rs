use crate::scene::Scene;

use super::window::Viewport;

/// Drawing surface the animator owns for its whole lifetime
pub trait Rasterizer {
    /// Resize the backing surface. Calling it again with the same size must
    /// leave the surface unchanged.
    fn set_size(&mut self, viewport: Viewport);

    /// Draw one frame of the scene from its camera
    fn render(&mut self, scene: &Scene) -> anyhow::Result<()>;
}
