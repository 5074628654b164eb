use glam::Vec3;
use serde::Serialize;

use crate::camera::chase_pose;
use crate::config::{AnimatorConfig, MotionConfig};
use crate::error::{SceneError, SceneResult};
use crate::scene::Scene;
use crate::traits::{FrameHandle, Host, Rasterizer};

/// What a single tick ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// State advanced and a frame was drawn
    Rendered,
    /// State advanced but drawing failed; the loop keeps going
    RenderFailed,
    /// Output hidden: nothing advanced, nothing drawn, next tick requested
    Skipped,
    /// Animator was stopped; nothing requested
    Stopped,
}

/// Everything the tick mutates, without any rendering attached
pub struct AnimatorState {
    pub scene: Scene,
    pub time: f32,
    pub visible: bool,
    motion: MotionConfig,
    camera_rest: Vec3,
}

impl AnimatorState {
    pub fn new(config: &AnimatorConfig, aspect: f32) -> Self {
        Self {
            scene: Scene::new(config, aspect),
            time: 0.0,
            visible: true,
            motion: config.motion,
            camera_rest: Vec3::from_array(config.camera.position),
        }
    }

    pub fn truck_position(&self) -> Vec3 {
        self.scene.truck.position()
    }

    /// One step of the simulation. Motion is per tick, not per second, so
    /// perceived speed follows the display refresh rate.
    pub fn advance(&mut self) {
        let m = self.motion;

        self.time += m.time_step;
        self.scene.truck.advance(-m.truck_speed);
        self.scene.truck.spin_wheels(m.truck_speed * m.wheel_spin_factor);
        if self.scene.truck.wrap(-m.road_half_length, m.road_half_length) {
            log::debug!("truck wrapped back to z={}", m.road_half_length);
        }

        let pose = chase_pose(self.time, self.truck_position(), self.camera_rest, &m);
        self.scene.camera.apply_pose(pose);
    }

    pub fn snapshot(&self) -> StateSnapshot {
        let camera = &self.scene.camera;
        StateSnapshot {
            time: self.time,
            visible: self.visible,
            truck_position: self.truck_position().to_array(),
            wheel_spin: self
                .scene
                .truck
                .wheels()
                .next()
                .map_or(0.0, |w| w.transform.rotation.x),
            camera_position: camera.position.to_array(),
            camera_target: camera.target.to_array(),
            camera_aspect: camera.aspect,
        }
    }
}

/// Plain-data view of the animator state, for logging and the CLI
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StateSnapshot {
    pub time: f32,
    pub visible: bool,
    pub truck_position: [f32; 3],
    pub wheel_spin: f32,
    pub camera_position: [f32; 3],
    pub camera_target: [f32; 3],
    pub camera_aspect: f32,
}

/// Drives [`AnimatorState`] from host refresh callbacks and draws it
pub struct Animator<R: Rasterizer> {
    state: AnimatorState,
    rasterizer: R,
    pending: Option<FrameHandle>,
    stopped: bool,
    frames_rendered: u64,
}

impl<R: Rasterizer> Animator<R> {
    /// Takes ownership of the named surface and builds the scene
    pub fn init<H>(host: &mut H, config: &AnimatorConfig) -> SceneResult<Self>
    where
        H: Host<Surface = R>,
    {
        let rasterizer = host
            .acquire_surface(&config.surface_id)?
            .ok_or_else(|| SceneError::SurfaceNotFound {
                id: config.surface_id.clone(),
            })?;

        let viewport = host.viewport();
        let aspect = if viewport.is_degenerate() {
            config.width as f32 / config.height.max(1) as f32
        } else {
            viewport.aspect()
        };

        let mut animator = Self {
            state: AnimatorState::new(config, aspect),
            rasterizer,
            pending: None,
            stopped: false,
            frames_rendered: 0,
        };
        animator.on_resize(&*host);
        animator.on_visibility_change(&*host);

        log::info!(
            "hero scene ready on `{}` ({} meshes)",
            config.surface_id,
            animator.state.scene.drawables().len()
        );
        Ok(animator)
    }

    /// Runs the first tick right away; every later tick is host-driven
    pub fn start<H: Host>(&mut self, host: &mut H) -> TickOutcome {
        self.tick(host)
    }

    /// Re-arms first, then checks visibility, so a hidden phase never
    /// breaks the loop.
    pub fn tick<H: Host>(&mut self, host: &mut H) -> TickOutcome {
        if self.stopped {
            return TickOutcome::Stopped;
        }

        self.pending = Some(host.request_frame());

        if !self.state.visible {
            return TickOutcome::Skipped;
        }

        self.state.advance();

        match self.rasterizer.render(&self.state.scene) {
            Ok(()) => {
                self.frames_rendered += 1;
                TickOutcome::Rendered
            }
            Err(e) => {
                log::warn!("render error: {e:#}");
                TickOutcome::RenderFailed
            }
        }
    }

    pub fn on_resize<H: Host>(&mut self, host: &H) {
        let viewport = host.viewport();
        if viewport.is_degenerate() {
            log::debug!("ignoring resize to {}x{}", viewport.width, viewport.height);
            return;
        }

        self.state.scene.camera.set_aspect(viewport.aspect());
        self.rasterizer.set_size(viewport);
    }

    pub fn on_visibility_change<H: Host>(&mut self, host: &H) {
        self.state.visible = !host.is_hidden();
    }

    /// Cancels the outstanding frame request; later ticks do nothing
    pub fn stop<H: Host>(&mut self, host: &mut H) {
        if let Some(handle) = self.pending.take() {
            host.cancel_frame(handle);
        }
        if !self.stopped {
            log::info!("animator stopped after {} frames", self.frames_rendered);
        }
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn state(&self) -> &AnimatorState {
        &self.state
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }
}
