pub mod bindings;
pub mod entry_points;
pub mod skinned_mesh;
pub mod skinning;
pub mod vertex_previous_position;

use spirv_std::glam::{Mat3, Mat4, Vec3, Vec4};

#[allow(unused_imports)]
use spirv_std::num_traits::Float;

pub fn mesh_position_local_to_world(model: Mat4, vertex_position: Vec4) -> Vec4 {
    model * vertex_position
}

#[derive(Default, Copy, Clone, PartialEq)]
#[repr(C)]
pub struct Mesh {
    pub model: Mat4,
    // Model matrix of the previous frame, read by the motion vector prepass.
    pub previous_model: Mat4,
    pub inverse_transpose_model: Mat4,
    // 'flags' is a bit field indicating various options. u32 is 32 bits so we have up to 32 options.
    pub flags: u32,
}

impl Mesh {
    pub fn mesh_normal_local_to_world(&self, vertex_normal: Vec3) -> Vec3 {
        // NOTE: The mikktspace method of normal mapping requires that the world normal is
        // re-normalized in the vertex shader to match the way mikktspace bakes vertex tangents
        // and normal maps so that the exact inverse process is applied when shading.
        // http://www.mikktspace.com/
        (Mat3 {
            x_axis: self.inverse_transpose_model.x_axis.truncate(),
            y_axis: self.inverse_transpose_model.y_axis.truncate(),
            z_axis: self.inverse_transpose_model.z_axis.truncate(),
        } * vertex_normal)
            .normalize()
    }
}

#[cfg(test)]
mod tests {
    use spirv_std::glam::{Mat4, Vec3, Vec4};

    use super::{mesh_position_local_to_world, Mesh};

    #[test]
    fn position_uses_model_translation() {
        let model = Mat4::from_translation(Vec3::new(1.0, -2.0, 3.0));
        let world = mesh_position_local_to_world(model, Vec4::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(world, Vec4::new(2.0, -1.0, 4.0, 1.0));
    }

    #[test]
    fn unskinned_normal_uses_uploaded_inverse_transpose() {
        let model = Mat4::from_scale(Vec3::new(1.0, 2.0, 1.0));
        let mesh = Mesh {
            model,
            previous_model: model,
            inverse_transpose_model: model.inverse().transpose(),
            flags: 0,
        };
        let normal = mesh.mesh_normal_local_to_world(Vec3::new(1.0, 1.0, 0.0).normalize());
        assert!(normal.abs_diff_eq(Vec3::new(2.0, 1.0, 0.0).normalize(), 1e-5));
    }
}
