use road_hero::animator::{Animator, AnimatorState, TickOutcome};
use road_hero::config::AnimatorConfig;
use road_hero::error::{SceneError, SceneResult};
use road_hero::scene::Scene;
use road_hero::traits::{FrameHandle, Host, Rasterizer, Viewport};

#[derive(Debug, Default)]
struct MockRasterizer {
    sizes: Vec<Viewport>,
    renders: u32,
    fail: bool,
}

impl Rasterizer for MockRasterizer {
    fn set_size(&mut self, viewport: Viewport) {
        self.sizes.push(viewport);
    }

    fn render(&mut self, _scene: &Scene) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("device lost");
        }
        self.renders += 1;
        Ok(())
    }
}

struct MockHost {
    viewport: Viewport,
    hidden: bool,
    has_surface: bool,
    failing_surface: bool,
    broken_renderer: bool,
    requested: u64,
    pending: Option<FrameHandle>,
    cancelled: Vec<FrameHandle>,
}

impl MockHost {
    fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            hidden: false,
            has_surface: true,
            failing_surface: false,
            broken_renderer: false,
            requested: 0,
            pending: None,
            cancelled: Vec::new(),
        }
    }

    /// Delivers the pending frame the way a refresh scheduler would
    fn fire(&mut self, animator: &mut Animator<MockRasterizer>) -> Option<TickOutcome> {
        self.pending.take()?;
        Some(animator.tick(self))
    }
}

impl Host for MockHost {
    type Surface = MockRasterizer;

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn acquire_surface(&mut self, id: &str) -> SceneResult<Option<MockRasterizer>> {
        if self.failing_surface {
            return Err(SceneError::Gpu("no adapter".to_string()));
        }
        let fail = self.broken_renderer;
        Ok((self.has_surface && id == "hero-canvas").then(|| MockRasterizer {
            fail,
            ..MockRasterizer::default()
        }))
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.requested += 1;
        let handle = FrameHandle(self.requested);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.cancelled.push(handle);
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

fn started(host: &mut MockHost) -> Animator<MockRasterizer> {
    let mut animator = Animator::init(host, &AnimatorConfig::default()).unwrap();
    animator.start(host);
    animator
}

#[cfg(test)]
mod animator_tests {
    use super::*;

    #[test]
    fn test_init_fails_without_surface() {
        let mut host = MockHost::new(800, 600);
        host.has_surface = false;

        match Animator::init(&mut host, &AnimatorConfig::default()) {
            Err(SceneError::SurfaceNotFound { id }) => assert_eq!(id, "hero-canvas"),
            other => panic!("expected SurfaceNotFound, got {:?}", other.err()),
        }
        assert_eq!(host.requested, 0);
    }

    #[test]
    fn test_init_propagates_gpu_errors() {
        let mut host = MockHost::new(800, 600);
        host.failing_surface = true;

        let err = Animator::init(&mut host, &AnimatorConfig::default()).err();
        assert!(matches!(err, Some(SceneError::Gpu(_))));
    }

    #[test]
    fn test_init_sizes_surface_and_camera() {
        let mut host = MockHost::new(1600, 800);
        let animator = Animator::init(&mut host, &AnimatorConfig::default()).unwrap();

        assert_eq!(animator.rasterizer().sizes, vec![Viewport::new(1600, 800)]);
        assert_eq!(animator.state().scene.camera.aspect, 2.0);
        assert_eq!(animator.pending_frame(), None);
        assert_eq!(animator.frames_rendered(), 0);
    }

    #[test]
    fn test_start_renders_first_frame_immediately() {
        let mut host = MockHost::new(800, 600);
        let animator = started(&mut host);

        assert_eq!(animator.frames_rendered(), 1);
        assert_eq!(animator.rasterizer().renders, 1);
        assert_eq!(host.requested, 1);
        assert_eq!(animator.pending_frame(), host.pending);
        assert!((animator.state().truck_position().z + 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_each_tick_moves_truck_and_spins_wheels() {
        let mut host = MockHost::new(800, 600);
        let mut animator = started(&mut host);
        for _ in 0..9 {
            assert_eq!(host.fire(&mut animator), Some(TickOutcome::Rendered));
        }

        let state = animator.state();
        assert!((state.time - 0.16).abs() < 1e-5);
        assert!((state.truck_position().z + 3.0).abs() < 1e-4);
        for wheel in state.scene.truck.wheels() {
            assert!((wheel.transform.rotation.x - 0.3).abs() < 1e-5);
        }
    }

    #[test]
    fn test_truck_wraps_on_tick_334_then_every_667() {
        let mut host = MockHost::new(800, 600);
        let mut animator = started(&mut host);
        let mut wraps = Vec::new();
        let mut previous = animator.state().truck_position().z;

        for tick in 2..=1001 {
            host.fire(&mut animator).unwrap();
            let z = animator.state().truck_position().z;
            assert!((-100.0..=100.0).contains(&z), "tick {tick}: z={z}");
            if z > previous {
                assert_eq!(z, 100.0);
                wraps.push(tick);
            }
            previous = z;
        }

        assert_eq!(wraps, vec![334, 1001]);
    }

    #[test]
    fn test_camera_follows_truck() {
        let mut host = MockHost::new(800, 600);
        let mut animator = started(&mut host);
        for _ in 0..99 {
            host.fire(&mut animator);
        }

        let state = animator.state();
        let camera = &state.scene.camera;
        let truck = state.truck_position();
        let expected_x = 5.0 * (state.time * 0.3).sin();

        assert!((camera.position.x - expected_x).abs() < 1e-4);
        assert_eq!(camera.position.y, 15.0);
        assert_eq!(camera.position.z, 30.0);
        assert!((camera.target - (truck + glam::Vec3::new(0.0, 5.0, 20.0))).length() < 1e-4);
    }

    #[test]
    fn test_hidden_output_freezes_state_but_keeps_loop_alive() {
        let mut host = MockHost::new(800, 600);
        let mut animator = started(&mut host);
        let before = animator.state().snapshot();

        host.hidden = true;
        animator.on_visibility_change(&host);
        for _ in 0..20 {
            assert_eq!(host.fire(&mut animator), Some(TickOutcome::Skipped));
        }

        let after = animator.state().snapshot();
        assert_eq!(after.truck_position, before.truck_position);
        assert_eq!(after.wheel_spin, before.wheel_spin);
        assert_eq!(after.time, before.time);
        assert!(!animator.state().visible);
        assert_eq!(animator.frames_rendered(), 1);
        assert_eq!(host.requested, 21);
        assert!(host.pending.is_some());

        host.hidden = false;
        animator.on_visibility_change(&host);
        assert_eq!(host.fire(&mut animator), Some(TickOutcome::Rendered));
        assert!(animator.state().time > before.time);
    }

    #[test]
    fn test_starting_hidden_skips_first_tick() {
        let mut host = MockHost::new(800, 600);
        host.hidden = true;
        let animator = started(&mut host);

        assert!(!animator.state().visible);
        assert_eq!(animator.frames_rendered(), 0);
        assert_eq!(animator.state().time, 0.0);
        assert!(host.pending.is_some());
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut host = MockHost::new(800, 600);
        let mut animator = started(&mut host);

        host.viewport = Viewport::new(1920, 1080);
        animator.on_resize(&host);
        let first = animator.state().scene.camera.projection();
        animator.on_resize(&host);

        assert_eq!(animator.state().scene.camera.projection(), first);
        assert_eq!(animator.state().scene.camera.aspect, 1920.0 / 1080.0);
        assert_eq!(animator.rasterizer().sizes.last(), Some(&Viewport::new(1920, 1080)));
    }

    #[test]
    fn test_zero_size_resize_is_ignored() {
        let mut host = MockHost::new(800, 600);
        let mut animator = started(&mut host);
        let sizes_before = animator.rasterizer().sizes.len();

        host.viewport = Viewport::new(0, 0);
        animator.on_resize(&host);

        let aspect = animator.state().scene.camera.aspect;
        assert!(aspect.is_finite());
        assert_eq!(aspect, 800.0 / 600.0);
        assert_eq!(animator.rasterizer().sizes.len(), sizes_before);
    }

    #[test]
    fn test_render_failure_keeps_loop_running() {
        let mut host = MockHost::new(800, 600);
        host.broken_renderer = true;
        let mut animator = started(&mut host);

        for _ in 0..5 {
            assert_eq!(host.fire(&mut animator), Some(TickOutcome::RenderFailed));
        }

        assert_eq!(animator.frames_rendered(), 0);
        assert!(host.pending.is_some());
        assert!(!animator.is_stopped());
        assert!((animator.state().truck_position().z + 1.8).abs() < 1e-4);
    }

    #[test]
    fn test_stop_cancels_pending_frame() {
        let mut host = MockHost::new(800, 600);
        let mut animator = started(&mut host);
        let pending = host.pending.unwrap();

        animator.stop(&mut host);

        assert!(animator.is_stopped());
        assert_eq!(host.cancelled, vec![pending]);
        assert_eq!(host.pending, None);
        assert_eq!(host.fire(&mut animator), None);
    }

    #[test]
    fn test_ticks_after_stop_do_nothing() {
        let mut host = MockHost::new(800, 600);
        let mut animator = started(&mut host);
        animator.stop(&mut host);
        let requested = host.requested;
        let time = animator.state().time;

        assert_eq!(animator.tick(&mut host), TickOutcome::Stopped);
        assert_eq!(host.requested, requested);
        assert_eq!(animator.state().time, time);

        animator.stop(&mut host);
        assert_eq!(host.cancelled.len(), 1);
    }

    #[test]
    fn test_truck_stays_on_road_for_any_valid_speed() {
        for speed in [0.0, 0.3, 7.5, 250.0] {
            let json = format!(r#"{{ "motion": {{ "truck_speed": {speed} }} }}"#);
            let config = AnimatorConfig::from_json(&json).unwrap();
            config.validate().unwrap();

            let mut state = AnimatorState::new(&config, 1.0);
            for tick in 1..=1000 {
                state.advance();
                let z = state.truck_position().z;
                assert!((-100.0..=100.0).contains(&z), "speed {speed}, tick {tick}: z={z}");
            }
        }
    }

    #[test]
    fn test_backwards_speed_never_reaches_the_loop() {
        let config = AnimatorConfig::from_json(r#"{ "motion": { "truck_speed": -0.3 } }"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(SceneError::InvalidConfig { field: "motion.truck_speed", .. })
        ));
    }

    #[test]
    fn test_state_advances_without_renderer() {
        let config = AnimatorConfig::default();
        let mut state = AnimatorState::new(&config, 16.0 / 9.0);
        for _ in 0..334 {
            state.advance();
        }
        assert_eq!(state.truck_position().z, 100.0);

        let snapshot = state.snapshot();
        assert_eq!(snapshot.truck_position[2], 100.0);
        assert!(snapshot.visible);
    }
}
