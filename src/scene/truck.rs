use std::sync::Arc;

use glam::Vec3;

use super::{Geometry, Material, Mesh, Transform, QUARTER_TURN};
use crate::types::hex_color;

pub const WHEEL_RADIUS: f32 = 2.0;
const WHEEL_WIDTH: f32 = 3.0;
const WHEEL_SEGMENTS: u32 = 16;

/// Front axle, then the two rear axles
const WHEEL_POSITIONS: [[f32; 3]; 6] = [
    [-5.0, 2.0, 4.0],
    [5.0, 2.0, 4.0],
    [-5.0, 2.0, -2.0],
    [5.0, 2.0, -2.0],
    [-5.0, 2.0, -6.0],
    [5.0, 2.0, -6.0],
];

/// Index of a wheel within [`Truck::parts`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelHandle(usize);

/// Rigid composite that only ever moves along z
pub struct Truck {
    pub transform: Transform,
    parts: Vec<Mesh>,
    wheels: Vec<WheelHandle>,
}

impl Truck {
    pub fn new() -> Self {
        let mut parts = Vec::new();

        parts.push(
            Mesh::new(
                "body",
                Arc::new(Geometry::cuboid(8.0, 8.0, 16.0)),
                Material::standard(0xff6b35, 0.5, 0.3),
            )
            .at(Vec3::new(0.0, 5.0, 0.0))
            .shadows(true, true),
        );

        parts.push(
            Mesh::new(
                "cabin",
                Arc::new(Geometry::cuboid(8.0, 6.0, 6.0)),
                Material::standard(0xcc4422, 0.4, 0.4),
            )
            .at(Vec3::new(0.0, 4.0, 9.0))
            .shadows(true, true),
        );

        parts.push(
            Mesh::new(
                "windshield",
                Arc::new(Geometry::cuboid(7.0, 3.0, 1.0)),
                Material::Standard {
                    color: hex_color(0x1a1a2e),
                    roughness: 0.1,
                    metalness: 0.8,
                    opacity: 0.6,
                },
            )
            .at(Vec3::new(0.0, 5.5, 11.5)),
        );

        let wheel_geometry = Arc::new(Geometry::cylinder(WHEEL_RADIUS, WHEEL_WIDTH, WHEEL_SEGMENTS));
        let wheel_material = Material::standard(0x222222, 0.7, 0.6);
        let mut wheels = Vec::with_capacity(WHEEL_POSITIONS.len());
        for position in WHEEL_POSITIONS {
            wheels.push(WheelHandle(parts.len()));
            parts.push(
                Mesh::new("wheel", wheel_geometry.clone(), wheel_material)
                    .at(Vec3::from_array(position))
                    .rotated(Vec3::new(0.0, 0.0, QUARTER_TURN))
                    .shadows(true, true),
            );
        }

        parts.push(
            Mesh::new(
                "hitch",
                Arc::new(Geometry::cuboid(2.0, 1.0, 1.0)),
                Material::standard(0x555555, 1.0, 0.0),
            )
            .at(Vec3::new(0.0, 2.0, -9.0)),
        );

        Self {
            transform: Transform::IDENTITY,
            parts,
            wheels,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Moves the truck along the travel axis by `delta`
    pub fn advance(&mut self, delta: f32) {
        self.transform.position.z += delta;
    }

    /// Sends the truck back to `upper` once it has passed `lower`.
    /// Returns true when a wrap happened.
    pub fn wrap(&mut self, lower: f32, upper: f32) -> bool {
        if self.transform.position.z < lower {
            self.transform.position.z = upper;
            true
        } else {
            false
        }
    }

    pub fn spin_wheels(&mut self, angle: f32) {
        for &WheelHandle(index) in &self.wheels {
            self.parts[index].transform.rotation.x += angle;
        }
    }

    pub fn wheels(&self) -> impl Iterator<Item = &Mesh> + '_ {
        self.wheels.iter().map(|&WheelHandle(index)| &self.parts[index])
    }

    pub fn wheel_handles(&self) -> &[WheelHandle] {
        &self.wheels
    }

    pub fn parts(&self) -> &[Mesh] {
        &self.parts
    }
}

impl Default for Truck {
    fn default() -> Self {
        Self::new()
    }
}
