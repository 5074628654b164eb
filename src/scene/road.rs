use std::sync::Arc;

use glam::Vec3;

use super::{Geometry, Material, Mesh, QUARTER_TURN};
use crate::types::hex_color;

pub const ROAD_WIDTH: f32 = 40.0;
pub const ROAD_LENGTH: f32 = 200.0;
const MARKING_HALF_SPAN: f32 = 15.0;
const MARKING_SPACING: usize = 5;
const MARKING_LIFT: f32 = 0.01;

/// Static road surface. The lane markings live in the surface's local frame,
/// so they follow it when it is laid flat.
pub struct Road {
    pub surface: Mesh,
    pub lane_markings: Mesh,
}

impl Road {
    pub fn new() -> Self {
        let surface = Mesh::new(
            "road",
            Arc::new(Geometry::plane(ROAD_WIDTH, ROAD_LENGTH)),
            Material::standard(0x333333, 0.8, 0.1),
        )
        .rotated(Vec3::new(-QUARTER_TURN, 0.0, 0.0))
        .shadows(false, true);

        let lane_markings = Mesh::new(
            "lane-markings",
            Arc::new(Geometry::segments(&marking_segments())),
            Material::Line {
                color: hex_color(0xffff00),
            },
        );

        Self {
            surface,
            lane_markings,
        }
    }
}

impl Default for Road {
    fn default() -> Self {
        Self::new()
    }
}

/// Cross-road stripes every few units along the road's length, slightly
/// above the surface (+Z in plane space) to avoid z-fighting. These are
/// separate flat crossbars in the road's own frame, not one polyline
/// standing upright in the rotated plane.
fn marking_segments() -> Vec<(Vec3, Vec3)> {
    let half_length = (ROAD_LENGTH / 2.0) as i32;
    (-half_length..=half_length)
        .step_by(MARKING_SPACING)
        .map(|i| {
            let along = i as f32;
            (
                Vec3::new(-MARKING_HALF_SPAN, along, MARKING_LIFT),
                Vec3::new(MARKING_HALF_SPAN, along, MARKING_LIFT),
            )
        })
        .collect()
}
