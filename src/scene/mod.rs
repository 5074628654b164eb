pub mod geometry;
pub mod road;
pub mod truck;

use std::f32::consts::PI;
use std::sync::Arc;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::camera::PerspectiveCamera;
use crate::config::AnimatorConfig;
use crate::types::hex_color;

pub use geometry::{Geometry, Primitive, Topology};
pub use road::Road;
pub use truck::{Truck, WheelHandle};

pub const SKY_COLOR: u32 = 0x87ceeb;

/// Local transform with XYZ-ordered Euler rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lit, shadow-aware surface
    Standard {
        color: [f32; 3],
        roughness: f32,
        metalness: f32,
        opacity: f32,
    },
    /// Flat unlit color
    Basic { color: [f32; 3] },
    Line { color: [f32; 3] },
}

impl Material {
    pub fn standard(hex: u32, roughness: f32, metalness: f32) -> Self {
        Material::Standard {
            color: hex_color(hex),
            roughness,
            metalness,
            opacity: 1.0,
        }
    }

    pub fn color(&self) -> [f32; 3] {
        match *self {
            Material::Standard { color, .. } | Material::Basic { color } | Material::Line { color } => color,
        }
    }

    pub fn opacity(&self) -> f32 {
        match *self {
            Material::Standard { opacity, .. } => opacity,
            _ => 1.0,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity() < 1.0
    }

    pub fn is_lit(&self) -> bool {
        matches!(self, Material::Standard { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: &'static str,
    pub geometry: Arc<Geometry>,
    pub material: Material,
    pub transform: Transform,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Mesh {
    pub fn new(name: &'static str, geometry: Arc<Geometry>, material: Material) -> Self {
        Self {
            name,
            geometry,
            material,
            transform: Transform::IDENTITY,
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn shadows(mut self, cast: bool, receive: bool) -> Self {
        self.cast_shadow = cast;
        self.receive_shadow = receive;
        self
    }
}

/// A mesh paired with its world matrix, in a stable order
pub struct Drawable<'a> {
    pub mesh: &'a Mesh,
    pub world: Mat4,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Orthographic volume the directional light renders its shadow map from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowFrustum {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
    pub map_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub cast_shadow: bool,
    pub shadow: ShadowFrustum,
}

impl DirectionalLight {
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    pub fn view_proj(&self) -> Mat4 {
        let s = &self.shadow;
        let projection = Mat4::orthographic_rh(s.left, s.right, s.bottom, s.top, s.near, s.far);
        projection * Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: [f32; 3],
    pub near: f32,
    pub far: f32,
}

/// Ownership root of everything that gets drawn
pub struct Scene {
    pub background: [f32; 3],
    pub fog: Fog,
    pub camera: PerspectiveCamera,
    pub ambient: AmbientLight,
    pub sun: DirectionalLight,
    pub sky: Mesh,
    pub road: Road,
    pub truck: Truck,
}

impl Scene {
    pub fn new(config: &AnimatorConfig, aspect: f32) -> Self {
        let sky = Mesh::new(
            "sky",
            Arc::new(Geometry::sphere(400.0, 32, 32)),
            Material::Basic {
                color: hex_color(SKY_COLOR),
            },
        );

        Self {
            background: hex_color(SKY_COLOR),
            fog: Fog {
                color: hex_color(SKY_COLOR),
                near: 500.0,
                far: 1000.0,
            },
            camera: PerspectiveCamera::new(&config.camera, aspect),
            ambient: AmbientLight {
                color: [1.0; 3],
                intensity: 0.6,
            },
            sun: DirectionalLight {
                color: [1.0; 3],
                intensity: 0.8,
                position: Vec3::new(50.0, 50.0, 30.0),
                target: Vec3::ZERO,
                cast_shadow: config.shadows.enabled,
                shadow: ShadowFrustum {
                    left: -100.0,
                    right: 100.0,
                    top: 100.0,
                    bottom: -100.0,
                    near: 0.5,
                    far: 500.0,
                    map_size: config.shadows.map_size,
                },
            },
            sky,
            road: Road::new(),
            truck: Truck::new(),
        }
    }

    /// Every mesh with its world transform. The order never changes for the
    /// lifetime of a scene, so renderers may index GPU resources by position.
    pub fn drawables(&self) -> Vec<Drawable<'_>> {
        let mut out = Vec::with_capacity(4 + self.truck.parts().len());

        out.push(Drawable {
            mesh: &self.sky,
            world: self.sky.transform.matrix(),
        });

        let road_world = self.road.surface.transform.matrix();
        out.push(Drawable {
            mesh: &self.road.surface,
            world: road_world,
        });
        out.push(Drawable {
            mesh: &self.road.lane_markings,
            world: road_world * self.road.lane_markings.transform.matrix(),
        });

        let truck_world = self.truck.transform.matrix();
        out.extend(self.truck.parts().iter().map(|part| Drawable {
            mesh: part,
            world: truck_world * part.transform.matrix(),
        }));

        out
    }
}

/// Quarter turn, used by several parts to lay primitives on their side
pub const QUARTER_TURN: f32 = PI / 2.0;
