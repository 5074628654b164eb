//! Windowless host used by the `simulate` command: frames are "presented" by
//! counting them, and every requested frame is delivered immediately.

use crate::animator::{Animator, StateSnapshot, TickOutcome};
use crate::config::AnimatorConfig;
use crate::core::FrameScheduler;
use crate::error::SceneResult;
use crate::scene::Scene;
use crate::traits::{FrameHandle, Host, Rasterizer, Viewport};

#[derive(Debug, Default)]
pub struct CountingRasterizer {
    pub size: Option<Viewport>,
    pub frames: u64,
}

impl Rasterizer for CountingRasterizer {
    fn set_size(&mut self, viewport: Viewport) {
        self.size = Some(viewport);
    }

    fn render(&mut self, _scene: &Scene) -> anyhow::Result<()> {
        self.frames += 1;
        Ok(())
    }
}

pub struct HeadlessHost {
    surface_id: String,
    viewport: Viewport,
    hidden: bool,
    frames: FrameScheduler,
}

impl HeadlessHost {
    pub fn new(config: &AnimatorConfig) -> Self {
        Self {
            surface_id: config.surface_id.clone(),
            viewport: Viewport::new(config.width, config.height),
            hidden: false,
            frames: FrameScheduler::new(),
        }
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Parked requests are delivered too: the run is a fixed number of ticks
    pub fn take_pending_frame(&mut self) -> Option<FrameHandle> {
        self.frames.take()
    }
}

impl Host for HeadlessHost {
    type Surface = CountingRasterizer;

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn acquire_surface(&mut self, id: &str) -> SceneResult<Option<CountingRasterizer>> {
        Ok((id == self.surface_id).then(CountingRasterizer::default))
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.frames.request(self.hidden).0
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.cancel(handle);
    }
}

/// Result of a headless run
#[derive(Debug, Clone, serde::Serialize)]
pub struct SimulationReport {
    pub ticks: u64,
    pub frames_rendered: u64,
    pub skipped: u64,
    pub state: StateSnapshot,
}

/// Runs `ticks` ticks (the first one included) and stops the animator
pub fn simulate(config: &AnimatorConfig, ticks: u64, hidden: bool) -> SceneResult<SimulationReport> {
    let mut host = HeadlessHost::new(config);
    host.set_hidden(hidden);

    let mut animator = Animator::init(&mut host, config)?;
    let mut skipped = 0;
    let mut run = 0;

    while run < ticks {
        let outcome = if run == 0 {
            animator.start(&mut host)
        } else if host.take_pending_frame().is_some() {
            animator.tick(&mut host)
        } else {
            break;
        };
        if outcome == TickOutcome::Skipped {
            skipped += 1;
        }
        run += 1;
    }
    animator.stop(&mut host);

    Ok(SimulationReport {
        ticks: run,
        frames_rendered: animator.rasterizer().frames,
        skipped,
        state: animator.state().snapshot(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulate_counts_frames() {
        let report = simulate(&AnimatorConfig::default(), 10, false).unwrap();
        assert_eq!(report.ticks, 10);
        assert_eq!(report.frames_rendered, 10);
        assert_eq!(report.skipped, 0);
        assert!((report.state.truck_position[2] + 3.0).abs() < 1e-4);
    }

    #[test]
    fn hidden_simulation_never_moves() {
        let report = simulate(&AnimatorConfig::default(), 50, true).unwrap();
        assert_eq!(report.ticks, 50);
        assert_eq!(report.frames_rendered, 0);
        assert_eq!(report.skipped, 50);
        assert_eq!(report.state.truck_position, [0.0, 0.0, 0.0]);
        assert_eq!(report.state.wheel_spin, 0.0);
        assert_eq!(report.state.time, 0.0);
        assert!(!report.state.visible);
    }

    #[test]
    fn unknown_surface_fails_init() {
        let mut host = HeadlessHost::new(&AnimatorConfig::default());
        let config = AnimatorConfig {
            surface_id: "missing".to_string(),
            ..AnimatorConfig::default()
        };
        assert!(Animator::init(&mut host, &config).is_err());
    }
}
