use glam::{Mat4, Vec3};

use crate::config::{CameraConfig, MotionConfig};

/// Where the camera sits and what it looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

/// Chase-cam pose for a given time accumulator and truck position.
/// The camera sways sideways on a sinusoid while keeping its height and
/// distance; the target leads the truck by `look_ahead`.
pub fn chase_pose(time: f32, truck_position: Vec3, rest: Vec3, motion: &MotionConfig) -> CameraPose {
    let sway = (time * motion.sway_frequency).sin() * motion.sway_amplitude;

    CameraPose {
        position: Vec3::new(sway, rest.y, rest.z),
        target: truck_position + Vec3::from_array(motion.look_ahead),
    }
}

pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self {
            position: Vec3::from_array(config.position),
            target: Vec3::from_array(config.target),
            fov: config.fov_degrees.to_radians(),
            aspect,
            near: config.near,
            far: config.far,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far);
    }

    pub fn apply_pose(&mut self, pose: CameraPose) {
        self.position = pose.position;
        self.target = pose.target;
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_camera_uses_configured_intrinsics() {
        let camera = PerspectiveCamera::new(&CameraConfig::default(), 16.0 / 9.0);
        assert!((camera.fov - 75f32.to_radians()).abs() < 1e-6);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 1000.0);
        assert_eq!(camera.position, Vec3::new(0.0, 15.0, 30.0));
        assert_eq!(camera.target, Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn set_aspect_rebuilds_projection() {
        let mut camera = PerspectiveCamera::new(&CameraConfig::default(), 1.0);
        let before = camera.projection();
        camera.set_aspect(2.0);
        assert_eq!(camera.aspect, 2.0);
        assert_ne!(before, camera.projection());

        let expected = Mat4::perspective_rh(camera.fov, 2.0, camera.near, camera.far);
        assert_eq!(camera.projection(), expected);
    }

    #[test]
    fn chase_pose_sways_and_leads_truck() {
        let motion = MotionConfig::default();
        let rest = Vec3::new(0.0, 15.0, 30.0);

        let at_zero = chase_pose(0.0, Vec3::ZERO, rest, &motion);
        assert_eq!(at_zero.position, Vec3::new(0.0, 15.0, 30.0));
        assert_eq!(at_zero.target, Vec3::new(0.0, 5.0, 20.0));

        // sin(0.3 * t) peaks at t = pi / 0.6
        let peak = chase_pose(std::f32::consts::PI / 0.6, Vec3::new(0.0, 0.0, -40.0), rest, &motion);
        assert!((peak.position.x - 5.0).abs() < 1e-4);
        assert_eq!(peak.target, Vec3::new(0.0, 5.0, -20.0));
    }

    #[test]
    fn chase_pose_is_deterministic() {
        let motion = MotionConfig::default();
        let rest = Vec3::new(0.0, 15.0, 30.0);
        let samples = [(0.016, -0.3), (1.5, -25.0), (11.0, 80.0)];

        let first: Vec<_> = samples
            .iter()
            .map(|&(t, z)| chase_pose(t, Vec3::new(0.0, 0.0, z), rest, &motion))
            .collect();
        let replay: Vec<_> = samples
            .iter()
            .map(|&(t, z)| chase_pose(t, Vec3::new(0.0, 0.0, z), rest, &motion))
            .collect();

        assert_eq!(first, replay);
    }

    #[test]
    fn view_centers_target_in_front() {
        let camera = PerspectiveCamera::new(&CameraConfig::default(), 1.0);
        let target = camera.view().transform_point3(camera.target);
        assert!(target.x.abs() < 1e-4);
        assert!(target.y.abs() < 1e-4);
        assert!(target.z < 0.0);
    }
}
