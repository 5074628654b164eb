//! Procedural primitives. Every shape is centered on its local origin and
//! follows the usual conventions: cylinders stand along +Y, planes lie in XY
//! facing +Z, spheres are UV-tessellated.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::types::Vertex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Triangles,
    Lines,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Cuboid { width: f32, height: f32, depth: f32 },
    Cylinder { radius: f32, height: f32, segments: u32 },
    Plane { width: f32, height: f32 },
    Sphere { radius: f32, width_segments: u32, height_segments: u32 },
    Segments { count: usize },
}

#[derive(Debug, Clone)]
pub struct Geometry {
    pub primitive: Primitive,
    pub topology: Topology,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let half = Vec3::new(width, height, depth) * 0.5;
        let (min, max) = (-half, half);

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        let faces: [([[f32; 3]; 4], [f32; 3]); 6] = [
            // -Z
            (
                [[min.x, min.y, min.z], [min.x, max.y, min.z], [max.x, max.y, min.z], [max.x, min.y, min.z]],
                [0.0, 0.0, -1.0],
            ),
            // +Z
            (
                [[min.x, min.y, max.z], [max.x, min.y, max.z], [max.x, max.y, max.z], [min.x, max.y, max.z]],
                [0.0, 0.0, 1.0],
            ),
            // -X
            (
                [[min.x, min.y, min.z], [min.x, min.y, max.z], [min.x, max.y, max.z], [min.x, max.y, min.z]],
                [-1.0, 0.0, 0.0],
            ),
            // +X
            (
                [[max.x, min.y, max.z], [max.x, min.y, min.z], [max.x, max.y, min.z], [max.x, max.y, max.z]],
                [1.0, 0.0, 0.0],
            ),
            // +Y
            (
                [[min.x, max.y, max.z], [max.x, max.y, max.z], [max.x, max.y, min.z], [min.x, max.y, min.z]],
                [0.0, 1.0, 0.0],
            ),
            // -Y
            (
                [[min.x, min.y, min.z], [max.x, min.y, min.z], [max.x, min.y, max.z], [min.x, min.y, max.z]],
                [0.0, -1.0, 0.0],
            ),
        ];

        for (corners, normal) in faces {
            let base = vertices.len() as u32;
            vertices.extend(corners.iter().map(|&p| Vertex::new(p, normal)));
            indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self {
            primitive: Primitive::Cuboid { width, height, depth },
            topology: Topology::Triangles,
            vertices,
            indices,
        }
    }

    /// Closed cylinder along +Y with flat caps
    pub fn cylinder(radius: f32, height: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let half = height * 0.5;
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        let ring = |i: u32| {
            let theta = i as f32 / segments as f32 * TAU;
            (theta.sin(), theta.cos())
        };

        // Side wall: one top/bottom pair per seam position
        for i in 0..=segments {
            let (s, c) = ring(i);
            let normal = [s, 0.0, c];
            vertices.push(Vertex::new([radius * s, half, radius * c], normal));
            vertices.push(Vertex::new([radius * s, -half, radius * c], normal));
        }
        for i in 0..segments {
            let top = i * 2;
            let bottom = top + 1;
            let next_top = top + 2;
            let next_bottom = top + 3;
            indices.extend([top, bottom, next_bottom, top, next_bottom, next_top]);
        }

        for (y, normal_y) in [(half, 1.0), (-half, -1.0)] {
            let center = vertices.len() as u32;
            vertices.push(Vertex::new([0.0, y, 0.0], [0.0, normal_y, 0.0]));
            for i in 0..=segments {
                let (s, c) = ring(i);
                vertices.push(Vertex::new([radius * s, y, radius * c], [0.0, normal_y, 0.0]));
            }
            for i in 0..segments {
                let a = center + 1 + i;
                let b = a + 1;
                if normal_y > 0.0 {
                    indices.extend([center, a, b]);
                } else {
                    indices.extend([center, b, a]);
                }
            }
        }

        Self {
            primitive: Primitive::Cylinder { radius, height, segments },
            topology: Topology::Triangles,
            vertices,
            indices,
        }
    }

    /// Single quad in the XY plane facing +Z
    pub fn plane(width: f32, height: f32) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        let normal = [0.0, 0.0, 1.0];
        let vertices = vec![
            Vertex::new([-hw, -hh, 0.0], normal),
            Vertex::new([hw, -hh, 0.0], normal),
            Vertex::new([hw, hh, 0.0], normal),
            Vertex::new([-hw, hh, 0.0], normal),
        ];

        Self {
            primitive: Primitive::Plane { width, height },
            topology: Topology::Triangles,
            vertices,
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);
        let columns = width_segments + 1;

        let mut vertices = Vec::with_capacity((columns * (height_segments + 1)) as usize);
        for row in 0..=height_segments {
            let theta = row as f32 / height_segments as f32 * PI;
            for col in 0..=width_segments {
                let phi = col as f32 / width_segments as f32 * TAU;
                let normal = Vec3::new(-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin());
                vertices.push(Vertex::new((normal * radius).to_array(), normal.to_array()));
            }
        }

        let mut indices = Vec::new();
        for row in 0..height_segments {
            for col in 0..width_segments {
                let a = row * columns + col;
                let b = a + columns;
                // Poles collapse to a single triangle per column
                if row != 0 {
                    indices.extend([a, b, a + 1]);
                }
                if row != height_segments - 1 {
                    indices.extend([b, b + 1, a + 1]);
                }
            }
        }

        Self {
            primitive: Primitive::Sphere {
                radius,
                width_segments,
                height_segments,
            },
            topology: Topology::Triangles,
            vertices,
            indices,
        }
    }

    /// Independent line segments, one per endpoint pair
    pub fn segments(pairs: &[(Vec3, Vec3)]) -> Self {
        let normal = [0.0, 0.0, 1.0];
        let vertices = pairs
            .iter()
            .flat_map(|&(a, b)| [Vertex::new(a.to_array(), normal), Vertex::new(b.to_array(), normal)])
            .collect::<Vec<_>>();
        let indices = (0..vertices.len() as u32).collect();

        Self {
            primitive: Primitive::Segments { count: pairs.len() },
            topology: Topology::Lines,
            vertices,
            indices,
        }
    }

    /// Axis-aligned local bounds as (min, max)
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.vertices.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), v| (min.min(v.position()), max.max(v.position())),
        )
    }

    pub fn triangle_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => self.indices.len() / 3,
            Topology::Lines => 0,
        }
    }
}
