use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

pub const DEFAULT_SURFACE_ID: &str = "hero-canvas";
pub const INITIAL_WINDOW_WIDTH: u32 = 1280;
pub const INITIAL_WINDOW_HEIGHT: u32 = 720;

/// Truck and camera motion constants. All per-tick values assume ~60 ticks/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Added to the time accumulator on every visible tick
    pub time_step: f32,
    /// Travel-axis distance the truck covers per tick
    pub truck_speed: f32,
    /// Wheel spin per tick is `truck_speed * wheel_spin_factor`
    pub wheel_spin_factor: f32,
    /// Truck position wraps from `-road_half_length` back to `+road_half_length`
    pub road_half_length: f32,
    pub sway_amplitude: f32,
    pub sway_frequency: f32,
    /// Camera look-at target relative to the truck
    pub look_ahead: [f32; 3],
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            time_step: 0.016,
            truck_speed: 0.3,
            wheel_spin_factor: 0.1,
            road_half_length: 100.0,
            sway_amplitude: 5.0,
            sway_frequency: 0.3,
            look_ahead: [0.0, 5.0, 20.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 15.0, 30.0],
            target: [0.0, 5.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    pub enabled: bool,
    pub map_size: u32,
}

impl ShadowConfig {
    /// Side of the shadow map texture, capped at the device limit. A 1x1 map
    /// keeps the bind group valid when shadows are off.
    pub fn extent(&self, max_dimension: u32) -> u32 {
        if self.enabled {
            self.map_size.clamp(1, max_dimension.max(1))
        } else {
            1
        }
    }
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            map_size: 2048,
        }
    }
}

/// Everything the hero scene can be tuned with. Loaded from an optional JSON
/// file; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    pub surface_id: String,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub motion: MotionConfig,
    pub camera: CameraConfig,
    pub shadows: ShadowConfig,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            surface_id: DEFAULT_SURFACE_ID.to_string(),
            title: "Road Hero".to_string(),
            width: INITIAL_WINDOW_WIDTH,
            height: INITIAL_WINDOW_HEIGHT,
            motion: MotionConfig::default(),
            camera: CameraConfig::default(),
            shadows: ShadowConfig::default(),
        }
    }
}

impl AnimatorConfig {
    pub fn load(path: &Path) -> SceneResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| SceneError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?
        .validated()
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Rejects values the tick loop or the renderer cannot work with
    pub fn validate(&self) -> SceneResult<()> {
        let m = &self.motion;
        let c = &self.camera;

        let finite = [
            ("motion.time_step", m.time_step),
            ("motion.truck_speed", m.truck_speed),
            ("motion.wheel_spin_factor", m.wheel_spin_factor),
            ("motion.road_half_length", m.road_half_length),
            ("motion.sway_amplitude", m.sway_amplitude),
            ("motion.sway_frequency", m.sway_frequency),
            ("camera.fov_degrees", c.fov_degrees),
            ("camera.near", c.near),
            ("camera.far", c.far),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return invalid(field, "must be a finite number");
            }
        }
        let vectors = [
            ("motion.look_ahead", m.look_ahead),
            ("camera.position", c.position),
            ("camera.target", c.target),
        ];
        for (field, value) in vectors {
            if value.iter().any(|v| !v.is_finite()) {
                return invalid(field, "must contain finite numbers");
            }
        }

        if m.time_step < 0.0 {
            return invalid("motion.time_step", "must not be negative");
        }
        if m.truck_speed < 0.0 {
            return invalid("motion.truck_speed", "must not be negative");
        }
        if m.road_half_length <= 0.0 {
            return invalid("motion.road_half_length", "must be positive");
        }
        if c.fov_degrees <= 0.0 || c.fov_degrees >= 180.0 {
            return invalid("camera.fov_degrees", "must be between 0 and 180");
        }
        if c.near <= 0.0 {
            return invalid("camera.near", "must be positive");
        }
        if c.far <= c.near {
            return invalid("camera.far", "must be greater than camera.near");
        }
        if self.width == 0 || self.height == 0 {
            return invalid("width/height", "must be non-zero");
        }
        if self.shadows.enabled && self.shadows.map_size == 0 {
            return invalid("shadows.map_size", "must be non-zero");
        }

        Ok(())
    }

    fn validated(self) -> SceneResult<Self> {
        self.validate()?;
        Ok(self)
    }
}

fn invalid(field: &'static str, reason: &'static str) -> SceneResult<()> {
    Err(SceneError::InvalidConfig { field, reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let config = AnimatorConfig::from_json("{}").unwrap();
        assert_eq!(config, AnimatorConfig::default());
    }

    #[test]
    fn partial_motion_override_keeps_other_fields() {
        let config = AnimatorConfig::from_json(r#"{ "motion": { "truck_speed": 0.5 } }"#).unwrap();
        assert_eq!(config.motion.truck_speed, 0.5);
        assert_eq!(config.motion.time_step, 0.016);
        assert_eq!(config.motion.road_half_length, 100.0);
        assert_eq!(config.surface_id, DEFAULT_SURFACE_ID);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(AnimatorConfig::from_json("{ \"width\": \"wide\" }").is_err());
    }

    fn rejected_field(json: &str) -> &'static str {
        let config = AnimatorConfig::from_json(json).unwrap();
        match config.validate() {
            Err(SceneError::InvalidConfig { field, .. }) => field,
            other => panic!("expected InvalidConfig for {json}, got {other:?}"),
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(AnimatorConfig::default().validate().is_ok());
    }

    #[test]
    fn negative_speed_is_rejected() {
        assert_eq!(rejected_field(r#"{ "motion": { "truck_speed": -0.3 } }"#), "motion.truck_speed");
    }

    #[test]
    fn zero_speed_parks_the_truck() {
        let config = AnimatorConfig::from_json(r#"{ "motion": { "truck_speed": 0.0 } }"#).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn bad_motion_values_are_rejected() {
        assert_eq!(rejected_field(r#"{ "motion": { "road_half_length": 0.0 } }"#), "motion.road_half_length");
        assert_eq!(rejected_field(r#"{ "motion": { "road_half_length": -5.0 } }"#), "motion.road_half_length");
        assert_eq!(rejected_field(r#"{ "motion": { "time_step": -0.016 } }"#), "motion.time_step");

        let mut config = AnimatorConfig::default();
        config.motion.time_step = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(SceneError::InvalidConfig { field: "motion.time_step", .. })
        ));
    }

    #[test]
    fn bad_camera_values_are_rejected() {
        assert_eq!(rejected_field(r#"{ "camera": { "fov_degrees": 0.0 } }"#), "camera.fov_degrees");
        assert_eq!(rejected_field(r#"{ "camera": { "fov_degrees": 180.0 } }"#), "camera.fov_degrees");
        assert_eq!(rejected_field(r#"{ "camera": { "near": 0.0 } }"#), "camera.near");
        assert_eq!(rejected_field(r#"{ "camera": { "near": 10.0, "far": 5.0 } }"#), "camera.far");
    }

    #[test]
    fn zero_size_window_and_shadow_map_are_rejected() {
        assert_eq!(rejected_field(r#"{ "width": 0 }"#), "width/height");
        assert_eq!(rejected_field(r#"{ "shadows": { "map_size": 0 } }"#), "shadows.map_size");
        let off = AnimatorConfig::from_json(r#"{ "shadows": { "enabled": false, "map_size": 0 } }"#).unwrap();
        assert!(off.validate().is_ok());
    }

    #[test]
    fn shadow_extent_is_capped_at_device_limit() {
        let big = ShadowConfig {
            enabled: true,
            map_size: 16384,
        };
        assert_eq!(big.extent(8192), 8192);
        assert_eq!(ShadowConfig::default().extent(8192), 2048);
        let off = ShadowConfig {
            enabled: false,
            ..big
        };
        assert_eq!(off.extent(8192), 1);
    }

    #[test]
    fn load_validates_file_contents() {
        let path = std::env::temp_dir().join(format!("road-hero-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "motion": { "truck_speed": -1.0 } }"#).unwrap();
        let err = AnimatorConfig::load(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, SceneError::InvalidConfig { field: "motion.truck_speed", .. }));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AnimatorConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, SceneError::ConfigRead { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
