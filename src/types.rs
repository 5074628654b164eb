use glam::{Mat4, Vec3};

/// Mesh vertex as uploaded to the GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Per-frame scene data shared by every draw call
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalsUniform {
    pub view_proj: [[f32; 4]; 4],
    pub light_view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    /// rgb * intensity, w unused
    pub ambient: [f32; 4],
    /// Direction the light travels, normalized
    pub sun_direction: [f32; 4],
    pub sun_color: [f32; 4],
    pub fog_color: [f32; 4],
    /// x = fog near, y = fog far, z = 1.0 when shadows are enabled
    pub fog_shadow: [f32; 4],
}

/// Per-mesh data: transforms plus material parameters
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    /// rgb + opacity
    pub color: [f32; 4],
    /// x = roughness, y = metalness, z = 1.0 if lit, w = 1.0 if receives shadows
    pub material: [f32; 4],
}

impl ObjectUniform {
    pub fn new(model: Mat4, color: [f32; 4], material: [f32; 4]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            color,
            material,
        }
    }
}

/// Splits a 0xRRGGBB literal into sRGB floats in [0, 1]
pub const fn hex_color(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Exact sRGB decoding curve for one channel
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
