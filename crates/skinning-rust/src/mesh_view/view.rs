use spirv_std::glam::{Mat4, Vec3, Vec4};

#[derive(Default, Copy, Clone, PartialEq)]
#[repr(C)]
pub struct View {
    pub view_proj: Mat4,
    pub inverse_view_proj: Mat4,
    pub view: Mat4,
    pub inverse_view: Mat4,
    pub projection: Mat4,
    pub inverse_projection: Mat4,
    pub world_position: Vec3,
    // viewport(x_origin, y_origin, width, height)
    pub viewport: Vec4,
}

impl View {
    pub fn mesh_position_world_to_clip(&self, world_position: Vec4) -> Vec4 {
        self.view_proj * world_position
    }
}

/// View projection of the previous frame, bound alongside [`View`] in the
/// motion vector prepass.
#[derive(Default, Copy, Clone, PartialEq)]
#[repr(C)]
pub struct PreviousViewProjection {
    pub view_proj: Mat4,
}

